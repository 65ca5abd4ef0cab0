//! Dashboard engine: HTTP transport and background call execution.
mod engine;
mod transport;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use transport::{ApiTransport, ClientSettings, ReqwestTransport};
pub use types::{
    ApiCall, CallId, EngineError, EngineEvent, FailureKind, HttpMethod, TransportError,
};
