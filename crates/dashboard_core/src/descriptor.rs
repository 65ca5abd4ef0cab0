//! Declarative per-panel configuration.
//!
//! One generic controller drives every panel; what differs between panels
//! (endpoint, method, how a body is judged and decoded, captions) lives in
//! the static table below.

use chrono::{DateTime, Local};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::anchors;
use crate::model::{CheckReport, ConnectorReport, StatusSnapshot};
use crate::panel::{PanelData, PanelId};

/// Page size sent with every list request.
pub const PAGE_LIMIT: u32 = 20;

/// Fallback for application-level failures without a server message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// One HTTP request as the controller asks for it; paths are relative to the
/// versioned API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
}

/// The action button bound to a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpec {
    pub id: &'static str,
    pub idle_label: &'static str,
    /// Caption while loading; `None` keeps the idle caption.
    pub busy_label: Option<&'static str>,
}

type Decoder = fn(Value, DateTime<Local>) -> Result<PanelData, String>;

pub struct PanelDescriptor {
    pub panel: PanelId,
    pub method: HttpMethod,
    pub path: &'static str,
    pub region: &'static str,
    pub loading_caption: &'static str,
    pub control: ControlSpec,
    decode: Decoder,
}

impl PanelDescriptor {
    /// Turns a 2xx body into panel data, or into the message of an error view.
    pub fn decode(&self, body: Value, received_at: DateTime<Local>) -> Result<PanelData, String> {
        (self.decode)(body, received_at)
    }
}

static DESCRIPTORS: [PanelDescriptor; 5] = [
    PanelDescriptor {
        panel: PanelId::Status,
        method: HttpMethod::Get,
        path: "/status",
        region: anchors::STATUS_REGION,
        loading_caption: "Loading...",
        control: ControlSpec {
            id: anchors::STATUS_BUTTON,
            idle_label: "Refresh status",
            busy_label: None,
        },
        decode: decode_status,
    },
    PanelDescriptor {
        panel: PanelId::ConnectorTest,
        method: HttpMethod::Get,
        path: "/test-sbis",
        region: anchors::CONNECTOR_REGION,
        loading_caption: "Checking connection...",
        control: ControlSpec {
            id: anchors::CONNECTOR_BUTTON,
            idle_label: "Test SBIS connection",
            busy_label: None,
        },
        decode: decode_connector,
    },
    PanelDescriptor {
        panel: PanelId::CheckNow,
        method: HttpMethod::Post,
        path: "/check-now",
        region: anchors::CHECK_REGION,
        loading_caption: "Running document check...",
        control: ControlSpec {
            id: anchors::CHECK_BUTTON,
            idle_label: "Check for new documents",
            busy_label: Some("Checking..."),
        },
        decode: decode_check,
    },
    PanelDescriptor {
        panel: PanelId::Documents,
        method: HttpMethod::Get,
        path: "/documents/",
        region: anchors::DOCUMENTS_REGION,
        loading_caption: "Searching documents...",
        control: ControlSpec {
            id: anchors::DOCUMENTS_BUTTON,
            idle_label: "Get documents",
            busy_label: Some("Loading..."),
        },
        decode: decode_documents,
    },
    PanelDescriptor {
        panel: PanelId::ProcessingLogs,
        method: HttpMethod::Get,
        path: "/logs/",
        region: anchors::LOGS_REGION,
        loading_caption: "Loading...",
        control: ControlSpec {
            id: anchors::LOGS_BUTTON,
            idle_label: "Show processing log",
            busy_label: Some("Loading..."),
        },
        decode: decode_logs,
    },
];

pub fn descriptor(panel: PanelId) -> &'static PanelDescriptor {
    match panel {
        PanelId::Status => &DESCRIPTORS[0],
        PanelId::ConnectorTest => &DESCRIPTORS[1],
        PanelId::CheckNow => &DESCRIPTORS[2],
        PanelId::Documents => &DESCRIPTORS[3],
        PanelId::ProcessingLogs => &DESCRIPTORS[4],
    }
}

fn decode_status(body: Value, _received_at: DateTime<Local>) -> Result<PanelData, String> {
    parse_body::<StatusSnapshot>(body).map(PanelData::Status)
}

fn decode_connector(body: Value, received_at: DateTime<Local>) -> Result<PanelData, String> {
    if !is_success(&body) {
        return Err(server_message(&body, &["message"]));
    }
    Ok(PanelData::Connector(ConnectorReport {
        documents_found: count_at(&body, &["documents_found"]),
        checked_at: received_at,
    }))
}

fn decode_check(body: Value, received_at: DateTime<Local>) -> Result<PanelData, String> {
    if !is_success(&body) {
        return Err(server_message(&body, &["detail", "message"]));
    }
    Ok(PanelData::Check(CheckReport {
        new_documents: count_at(&body, &["result", "new_documents"]),
        total_processed: count_at(&body, &["result", "total_processed"]),
        checked_at: received_at,
        server_timestamp: non_empty_str(body.get("timestamp")).map(str::to_owned),
    }))
}

fn decode_documents(body: Value, _received_at: DateTime<Local>) -> Result<PanelData, String> {
    if !body.is_array() {
        return Err("malformed response: expected a list of documents".to_string());
    }
    parse_body(body).map(PanelData::Documents)
}

fn decode_logs(body: Value, _received_at: DateTime<Local>) -> Result<PanelData, String> {
    if !body.is_array() {
        return Err("malformed response: expected a list of log entries".to_string());
    }
    parse_body(body).map(PanelData::ProcessingLogs)
}

fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, String> {
    serde_json::from_value(body).map_err(|err| format!("malformed response: {err}"))
}

fn is_success(body: &Value) -> bool {
    body.get("status").and_then(Value::as_str) == Some("success")
}

/// First non-empty string among `fields`, else [`UNKNOWN_ERROR`].
fn server_message(body: &Value, fields: &[&str]) -> String {
    fields
        .iter()
        .find_map(|field| non_empty_str(body.get(*field)))
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}

/// Non-negative integer at a nested path; absent, null or non-numeric reads as 0.
fn count_at(body: &Value, path: &[&str]) -> u64 {
    path.iter()
        .try_fold(body, |value, key| value.get(*key))
        .and_then(Value::as_u64)
        .unwrap_or(0)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}
