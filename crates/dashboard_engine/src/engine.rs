use std::sync::{mpsc, Arc};
use std::thread;

use dashboard_logging::{dash_debug, dash_warn};

use crate::transport::{ApiTransport, ClientSettings, ReqwestTransport};
use crate::{ApiCall, CallId, EngineError, EngineEvent};

/// Receives engine completions. Called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Call { call_id: CallId, call: ApiCall },
}

/// Runs calls on a background tokio runtime. Every submitted call produces
/// exactly one `EngineEvent::CallCompleted`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport), sink)
    }

    pub fn with_transport(
        transport: Arc<dyn ApiTransport>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("dashboard-engine")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), sink.as_ref(), command).await;
                });
            }
            dash_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, call_id: CallId, call: ApiCall) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Call { call_id, call })
            .map_err(|_| EngineError::Closed)
    }
}

async fn handle_command(transport: &dyn ApiTransport, sink: &dyn EventSink, command: EngineCommand) {
    match command {
        EngineCommand::Call { call_id, call } => {
            let result = transport.call(&call).await;
            if let Err(err) = &result {
                dash_warn!("call {} {} failed ({}): {}", call_id, call.path, err.kind, err);
            }
            sink.emit(EngineEvent::CallCompleted { call_id, result });
        }
    }
}
