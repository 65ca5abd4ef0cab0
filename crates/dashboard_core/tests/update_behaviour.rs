use std::sync::Once;

use chrono::Local;
use dashboard_core::{
    descriptor, render, update, ApiRequest, DashboardState, Effect, HttpMethod, Msg, PanelId,
    Phase, TransportFailure, COUNT_LOADING,
};
use serde_json::{json, Value};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn trigger(state: DashboardState, panel: PanelId) -> (DashboardState, Vec<Effect>) {
    update(state, Msg::Triggered(panel))
}

fn respond(
    state: DashboardState,
    panel: PanelId,
    outcome: Result<Value, TransportFailure>,
) -> DashboardState {
    let (state, effects) = update(
        state,
        Msg::ResponseReceived {
            panel,
            outcome,
            received_at: Local::now(),
        },
    );
    assert!(effects.is_empty());
    state
}

fn html(state: &DashboardState, panel: PanelId) -> String {
    state.view().panel(panel).unwrap().html.clone()
}

#[test]
fn trigger_shows_loading_before_any_response() {
    init_logging();
    for panel in PanelId::ALL {
        let (state, effects) = trigger(DashboardState::new(), panel);
        let view = state.view();
        let panel_view = view.panel(panel).unwrap();

        assert_eq!(panel_view.phase, Phase::Loading);
        assert!(panel_view.html.contains("class=\"loading\""));
        assert!(panel_view
            .html
            .contains(descriptor(panel).loading_caption));
        assert!(!panel_view.control.enabled);
        assert_eq!(effects.len(), 1, "one request per trigger for {panel}");
    }
}

#[test]
fn trigger_requests_the_panel_endpoint() {
    init_logging();
    let (_, effects) = trigger(DashboardState::new(), PanelId::CheckNow);
    assert_eq!(
        effects,
        vec![Effect::Request {
            panel: PanelId::CheckNow,
            request: ApiRequest {
                method: HttpMethod::Post,
                path: "/check-now",
                query: Vec::new(),
            },
        }]
    );

    let (_, effects) = trigger(DashboardState::new(), PanelId::ProcessingLogs);
    assert_eq!(
        effects,
        vec![Effect::Request {
            panel: PanelId::ProcessingLogs,
            request: ApiRequest {
                method: HttpMethod::Get,
                path: "/logs/",
                query: vec![("limit", "20".to_string())],
            },
        }]
    );
}

#[test]
fn second_trigger_while_loading_is_ignored() {
    init_logging();
    let (state, effects) = trigger(DashboardState::new(), PanelId::Status);
    assert_eq!(effects.len(), 1);

    let (state, effects) = trigger(state, PanelId::Status);
    assert!(effects.is_empty());
    assert_eq!(state.panel(PanelId::Status).phase(), Phase::Loading);
}

#[test]
fn panels_load_independently() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::Status);
    let (state, effects) = trigger(state, PanelId::ConnectorTest);
    assert_eq!(effects.len(), 1);

    let state = respond(
        state,
        PanelId::ConnectorTest,
        Err(TransportFailure::network("connection refused")),
    );
    assert_eq!(state.panel(PanelId::Status).phase(), Phase::Loading);
    assert_eq!(state.panel(PanelId::ConnectorTest).phase(), Phase::Error);
    assert_eq!(state.panel(PanelId::CheckNow).phase(), Phase::Idle);
}

#[test]
fn check_now_control_is_restored_after_success() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::CheckNow);
    let busy = state.control(PanelId::CheckNow);
    assert!(!busy.enabled);
    assert_eq!(busy.label, "Checking...");

    let state = respond(
        state,
        PanelId::CheckNow,
        Ok(json!({"status": "success", "result": {"new_documents": 1, "total_processed": 1}})),
    );
    let control = state.control(PanelId::CheckNow);
    assert!(control.enabled);
    assert_eq!(control.label, "Check for new documents");
}

#[test]
fn check_now_control_is_restored_after_every_failure_path() {
    init_logging();
    let outcomes = vec![
        Ok(json!({"status": "error", "detail": "celery timeout"})),
        Err(TransportFailure::http_status(502)),
        Err(TransportFailure::network("connection reset")),
    ];
    for outcome in outcomes {
        let (state, _) = trigger(DashboardState::new(), PanelId::CheckNow);
        let state = respond(state, PanelId::CheckNow, outcome);

        assert_eq!(state.panel(PanelId::CheckNow).phase(), Phase::Error);
        let control = state.control(PanelId::CheckNow);
        assert!(control.enabled);
        assert_eq!(control.label, "Check for new documents");
    }
}

#[test]
fn check_now_application_error_uses_server_detail() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::CheckNow);
    let state = respond(
        state,
        PanelId::CheckNow,
        Ok(json!({"status": "error", "detail": "Check failed: <timeout>"})),
    );
    assert_eq!(
        html(&state, PanelId::CheckNow),
        "<div class=\"error\">Error: Check failed: &lt;timeout&gt;</div>"
    );
}

#[test]
fn stray_response_is_dropped() {
    init_logging();
    let mut state = DashboardState::new();
    assert!(state.consume_dirty());

    let mut state = respond(state, PanelId::Status, Ok(json!({})));
    assert_eq!(state.panel(PanelId::Status).phase(), Phase::Idle);
    assert!(!state.consume_dirty());
}

#[test]
fn exactly_one_terminal_state_per_invocation() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::ConnectorTest);
    let state = respond(
        state,
        PanelId::ConnectorTest,
        Ok(json!({"status": "success", "documents_found": 3})),
    );
    let settled = html(&state, PanelId::ConnectorTest);

    // A late duplicate completion must not replace the terminal view.
    let state = respond(
        state,
        PanelId::ConnectorTest,
        Err(TransportFailure::http_status(500)),
    );
    assert_eq!(html(&state, PanelId::ConnectorTest), settled);
    assert_eq!(state.panel(PanelId::ConnectorTest).phase(), Phase::Success);
}

#[test]
fn connector_success_shows_count_and_positive_indicator() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::ConnectorTest);
    let state = respond(state, PanelId::ConnectorTest, Ok(json!({"status": "success"})));
    let html = html(&state, PanelId::ConnectorTest);

    assert!(html.contains("<span class=\"status-active\">Connection OK</span>"));
    assert!(html.contains("<span>Documents found:</span><span>0</span>"));
    assert!(html.contains("Checked at:"));
}

#[test]
fn connector_failures_share_the_negative_view() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::ConnectorTest);
    let state = respond(
        state,
        PanelId::ConnectorTest,
        Ok(json!({"status": "error", "message": "SBIS authorization failed"})),
    );
    let application = html(&state, PanelId::ConnectorTest);
    assert!(application.contains("<span class=\"status-inactive\">Connection failed</span>"));
    assert!(application.contains("<div class=\"error\">SBIS authorization failed</div>"));

    let (state, _) = trigger(state, PanelId::ConnectorTest);
    let state = respond(
        state,
        PanelId::ConnectorTest,
        Err(TransportFailure::network("dns error")),
    );
    let transport = html(&state, PanelId::ConnectorTest);
    assert!(transport.contains("<span class=\"status-inactive\">Connection failed</span>"));
    assert!(transport.contains("<div class=\"error\">dns error</div>"));

    let (state, _) = trigger(state, PanelId::ConnectorTest);
    let state = respond(state, PanelId::ConnectorTest, Ok(json!({"status": "error"})));
    assert!(html(&state, PanelId::ConnectorTest).contains("Unknown error"));
}

#[test]
fn malformed_status_body_is_an_error_view() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::Status);
    let state = respond(state, PanelId::Status, Ok(json!(["not", "a", "snapshot"])));

    assert_eq!(state.panel(PanelId::Status).phase(), Phase::Error);
    assert!(html(&state, PanelId::Status).starts_with("<div class=\"error\">Error: malformed response"));
    assert!(state.control(PanelId::Status).enabled);
}

#[test]
fn new_trigger_replaces_previous_result() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::CheckNow);
    let state = respond(state, PanelId::CheckNow, Err(TransportFailure::http_status(500)));
    assert!(html(&state, PanelId::CheckNow).contains("HTTP 500"));

    let (state, _) = trigger(state, PanelId::CheckNow);
    assert!(!html(&state, PanelId::CheckNow).contains("HTTP 500"));
    let state = respond(
        state,
        PanelId::CheckNow,
        Ok(json!({"status": "success", "result": {"new_documents": 0, "total_processed": 9}})),
    );
    let html = html(&state, PanelId::CheckNow);
    assert!(!html.contains("error"));
    assert!(html.contains("<span>Total processed:</span><span>9</span>"));
}

#[test]
fn documents_count_indicator_follows_request() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::Documents);
    assert_eq!(state.docs_count(), COUNT_LOADING);
    assert_eq!(state.control(PanelId::Documents).label, "Loading...");

    let state = respond(
        state,
        PanelId::Documents,
        Ok(json!([{"subject": "a", "is_from_fns": true}, {"subject": "b", "is_from_fns": false}])),
    );
    assert_eq!(state.docs_count(), "2");
    assert_eq!(state.control(PanelId::Documents).label, "Get documents");
    assert!(state.control(PanelId::Documents).enabled);
}

#[test]
fn documents_request_carries_filters() {
    init_logging();
    let (state, _) = update(DashboardState::new(), Msg::DaysBackChanged(" 30 ".to_string()));
    let (state, _) = update(state, Msg::FnsOnlyToggled(true));
    let (_, effects) = trigger(state, PanelId::Documents);

    assert_eq!(
        effects,
        vec![Effect::Request {
            panel: PanelId::Documents,
            request: ApiRequest {
                method: HttpMethod::Get,
                path: "/documents/",
                query: vec![
                    ("days_back", "30".to_string()),
                    ("fns_only", "true".to_string()),
                    ("limit", "20".to_string()),
                ],
            },
        }]
    );
}

#[test]
fn invalid_days_back_fails_without_request() {
    init_logging();
    for raw in ["0", "-3", "abc", ""] {
        let (state, _) = update(DashboardState::new(), Msg::DaysBackChanged(raw.to_string()));
        let (state, effects) = trigger(state, PanelId::Documents);

        assert!(effects.is_empty(), "no request for {raw:?}");
        assert_eq!(state.panel(PanelId::Documents).phase(), Phase::Error);
        assert_eq!(state.docs_count(), "0");
        assert!(state.control(PanelId::Documents).enabled);
        assert!(html(&state, PanelId::Documents).contains("days back must be a positive integer"));
    }
}

#[test]
fn processing_log_rows_render_in_backend_order() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::ProcessingLogs);
    let state = respond(
        state,
        PanelId::ProcessingLogs,
        Ok(json!([
            {"id": 2, "task_id": "beat", "total_documents": 4, "fns_documents": 1,
             "status": "success", "error_message": null, "processed_at": "2024-05-02T08:00:00"},
            {"id": 1, "task_id": null, "total_documents": 0, "fns_documents": 0,
             "status": "error", "error_message": "auth failed", "processed_at": "2024-05-01T08:00:00"}
        ])),
    );
    let html = html(&state, PanelId::ProcessingLogs);

    let first = html.find("02.05.2024, 08:00:00").unwrap();
    let second = html.find("01.05.2024, 08:00:00").unwrap();
    assert!(first < second);
    assert!(html.contains("<td class=\"status-active\">success</td>"));
    assert!(html.contains("<td class=\"status-inactive\">error</td><td>0</td><td>0</td><td>auth failed</td>"));
}

#[test]
fn empty_processing_log_shows_placeholder() {
    init_logging();
    let (state, _) = trigger(DashboardState::new(), PanelId::ProcessingLogs);
    let state = respond(state, PanelId::ProcessingLogs, Ok(json!([])));
    assert_eq!(
        html(&state, PanelId::ProcessingLogs),
        format!("<div class=\"loading\">{}</div>", render::NO_LOG_ENTRIES)
    );
}
