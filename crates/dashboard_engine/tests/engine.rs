use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use dashboard_engine::{
    ApiCall, ChannelEventSink, ClientSettings, EngineEvent, EngineHandle, FailureKind,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collect(rx: &mpsc::Receiver<EngineEvent>, count: usize) -> HashMap<u64, EngineEvent> {
    (0..count)
        .map(|_| {
            let event = rx.recv_timeout(Duration::from_secs(5)).expect("engine event");
            let call_id = match &event {
                EngineEvent::CallCompleted { call_id, .. } => *call_id,
            };
            (call_id, event)
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn every_call_completes_once_with_its_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/test-sbis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/check-now"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        ClientSettings::with_base_url(server.uri()),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .unwrap();
    engine.submit(1, ApiCall::get("/test-sbis")).unwrap();
    engine.submit(2, ApiCall::post("/check-now")).unwrap();

    let events = tokio::task::spawn_blocking(move || collect(&rx, 2)).await.unwrap();

    match &events[&1] {
        EngineEvent::CallCompleted { result, .. } => {
            assert_eq!(result.as_ref().unwrap()["status"], "success");
        }
    }
    match &events[&2] {
        EngineEvent::CallCompleted { result, .. } => {
            let err = result.as_ref().unwrap_err();
            assert_eq!(err.kind, FailureKind::HttpStatus(503));
            assert_eq!(err.message, "HTTP 503");
        }
    }
}
