use chrono::{DateTime, Local};
use serde_json::Value;

use crate::PanelId;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A panel's action control was clicked, or the initial refresh fired.
    Triggered(PanelId),
    /// User edited the days-back numeric input.
    DaysBackChanged(String),
    /// User toggled the FNS-only checkbox.
    FnsOnlyToggled(bool),
    /// The request issued for `panel` settled.
    ResponseReceived {
        panel: PanelId,
        outcome: Result<Value, TransportFailure>,
        received_at: DateTime<Local>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Network error or non-2xx status, already reduced to the text shown to the
/// operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl TransportFailure {
    pub fn http_status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: format!("HTTP {status}"),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}
