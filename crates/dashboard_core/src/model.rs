//! Response payloads as the backend sends them.
//!
//! Everything here is read-only and lives for a single render; the
//! controller never keeps a payload across triggers.

use chrono::{DateTime, Local};
use serde::Deserialize;

/// Body of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusSnapshot {
    pub status: String,
    pub celery_status: String,
    pub statistics: DocumentStatistics,
    #[serde(default)]
    pub last_check: Option<String>,
    #[serde(default)]
    pub config: Option<ServiceConfig>,
    #[serde(default)]
    pub processed_documents_count: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DocumentStatistics {
    pub total_documents: u64,
    pub fns_documents: u64,
    pub regular_documents: u64,
}

/// Scheduler settings echoed back by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub check_interval_minutes: Option<u32>,
    #[serde(default)]
    pub documents_period_days: Option<u32>,
    #[serde(default)]
    pub sbis_login: Option<String>,
}

/// One ingested document from `GET /documents/`.
///
/// Every field may be missing or null; rendering substitutes placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub sender_inn: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_from_fns: bool,
    #[serde(default)]
    pub filename: Option<String>,
}

/// One row from `GET /logs/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessingLogEntry {
    pub id: i64,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub fns_documents: u64,
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub processed_at: Option<String>,
}

/// Successful connector probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorReport {
    pub documents_found: u64,
    pub checked_at: DateTime<Local>,
}

/// Successful on-demand check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub new_documents: u64,
    pub total_processed: u64,
    pub checked_at: DateTime<Local>,
    pub server_timestamp: Option<String>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
