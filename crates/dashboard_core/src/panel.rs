use std::fmt;

use crate::model::{CheckReport, ConnectorReport, DocumentRecord, ProcessingLogEntry, StatusSnapshot};

/// The fixed set of panels on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelId {
    Status,
    ConnectorTest,
    CheckNow,
    Documents,
    ProcessingLogs,
}

impl PanelId {
    pub const ALL: [PanelId; 5] = [
        PanelId::Status,
        PanelId::ConnectorTest,
        PanelId::CheckNow,
        PanelId::Documents,
        PanelId::ProcessingLogs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PanelId::Status => "status",
            PanelId::ConnectorTest => "connector-test",
            PanelId::CheckNow => "check-now",
            PanelId::Documents => "documents",
            PanelId::ProcessingLogs => "processing-logs",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Decoded payload of a successful response, one variant per panel kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelData {
    Status(StatusSnapshot),
    Connector(ConnectorReport),
    Check(CheckReport),
    Documents(Vec<DocumentRecord>),
    ProcessingLogs(Vec<ProcessingLogEntry>),
}

/// Complete state of one panel. A new value replaces the old one outright.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Loading,
    Success(PanelData),
    Error(String),
}

impl PanelState {
    pub fn phase(&self) -> Phase {
        match self {
            PanelState::Idle => Phase::Idle,
            PanelState::Loading => Phase::Loading,
            PanelState::Success(_) => Phase::Success,
            PanelState::Error(_) => Phase::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }
}

/// Enabled flag and caption of a panel's action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: &'static str,
}
