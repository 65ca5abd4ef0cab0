use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use chrono::{DateTime, Local};
use dashboard_core::{ApiRequest, Effect, Msg, PanelId, TransportFailure};
use dashboard_engine::{
    ApiCall, ApiTransport, CallId, ClientSettings, EngineError, EngineEvent, EngineHandle,
    EventSink, HttpMethod, TransportError,
};
use dashboard_logging::{dash_info, dash_warn};

use super::app::AppEvent;

pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

type PendingCalls = Arc<Mutex<HashMap<CallId, PanelId>>>;

/// Executes controller effects. Each effect results in exactly one
/// `AppEvent::Runner` message back on the event loop.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: PendingCalls,
    next_call_id: CallId,
    outstanding: usize,
    clock: Clock,
    tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        tx: mpsc::Sender<AppEvent>,
        clock: Clock,
    ) -> Result<Self, EngineError> {
        let pending = PendingCalls::default();
        let sink = Arc::new(RunnerSink {
            pending: pending.clone(),
            clock: clock.clone(),
            tx: Mutex::new(tx.clone()),
        });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self::assemble(engine, pending, clock, tx))
    }

    /// Same as [`EffectRunner::new`] over a caller-supplied transport.
    pub fn with_transport(
        transport: Arc<dyn ApiTransport>,
        tx: mpsc::Sender<AppEvent>,
        clock: Clock,
    ) -> Result<Self, EngineError> {
        let pending = PendingCalls::default();
        let sink = Arc::new(RunnerSink {
            pending: pending.clone(),
            clock: clock.clone(),
            tx: Mutex::new(tx.clone()),
        });
        let engine = EngineHandle::with_transport(transport, sink)?;
        Ok(Self::assemble(engine, pending, clock, tx))
    }

    fn assemble(
        engine: EngineHandle,
        pending: PendingCalls,
        clock: Clock,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            engine,
            pending,
            next_call_id: 1,
            outstanding: 0,
            clock,
            tx,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.outstanding += 1;
            match effect {
                Effect::Request { panel, request } => self.submit(panel, request),
                Effect::ScheduleTrigger { panel, delay } => {
                    let tx = self.tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = tx.send(AppEvent::Runner(Msg::Triggered(panel)));
                    });
                }
            }
        }
    }

    /// Called by the event loop for every `AppEvent::Runner` it receives.
    pub fn settled(&mut self) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }

    /// No scheduled trigger or request is waiting to report back.
    pub fn is_idle(&self) -> bool {
        self.outstanding == 0
    }

    fn submit(&mut self, panel: PanelId, request: ApiRequest) {
        let call_id = self.next_call_id;
        self.next_call_id += 1;
        if let Ok(mut pending) = self.pending.lock() {
            pending.insert(call_id, panel);
        }

        dash_info!(panel: panel, "submitting call {}", call_id);
        if let Err(err) = self.engine.submit(call_id, to_call(request)) {
            dash_warn!(panel: panel, "call {} not submitted: {}", call_id, err);
            if let Ok(mut pending) = self.pending.lock() {
                pending.remove(&call_id);
            }
            let _ = self.tx.send(AppEvent::Runner(Msg::ResponseReceived {
                panel,
                outcome: Err(TransportFailure::network(err.to_string())),
                received_at: (self.clock)(),
            }));
        }
    }
}

struct RunnerSink {
    pending: PendingCalls,
    clock: Clock,
    tx: Mutex<mpsc::Sender<AppEvent>>,
}

impl EventSink for RunnerSink {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::CallCompleted { call_id, result } => {
                let panel = self
                    .pending
                    .lock()
                    .ok()
                    .and_then(|mut pending| pending.remove(&call_id));
                let Some(panel) = panel else {
                    dash_warn!("completion for unknown call {}", call_id);
                    return;
                };
                let msg = Msg::ResponseReceived {
                    panel,
                    outcome: result.map_err(to_failure),
                    received_at: (self.clock)(),
                };
                if let Ok(tx) = self.tx.lock() {
                    let _ = tx.send(AppEvent::Runner(msg));
                }
            }
        }
    }
}

fn to_call(request: ApiRequest) -> ApiCall {
    let method = match request.method {
        dashboard_core::HttpMethod::Get => HttpMethod::Get,
        dashboard_core::HttpMethod::Post => HttpMethod::Post,
    };
    ApiCall {
        method,
        path: request.path.to_string(),
        query: request
            .query
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    }
}

fn to_failure(err: TransportError) -> TransportFailure {
    TransportFailure {
        status: err.status(),
        message: err.message,
    }
}
