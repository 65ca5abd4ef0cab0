//! Pure rendering: panel state in, region HTML out.
//!
//! Class names (`status-item`, `status-active`, `document-fns`, ...) are
//! shared with the page stylesheet. Every server-supplied string goes
//! through [`escape_html`].

use crate::format::{escape_html, format_date, format_local, format_timestamp};
use crate::model::{CheckReport, ConnectorReport, DocumentRecord, ProcessingLogEntry, StatusSnapshot};
use crate::{descriptor, PanelData, PanelId, PanelState};

pub const NEVER_RUN: &str = "Never run";
pub const NO_SUBJECT: &str = "No subject";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_DOCUMENTS: &str = "No documents found";
pub const NO_LOG_ENTRIES: &str = "No log entries";

pub fn render_panel(panel: PanelId, state: &PanelState) -> String {
    match state {
        PanelState::Idle => String::new(),
        PanelState::Loading => loading(descriptor(panel).loading_caption),
        PanelState::Success(data) => render_data(data),
        PanelState::Error(message) if panel == PanelId::ConnectorTest => {
            connector_failure(message)
        }
        PanelState::Error(message) => error(message),
    }
}

fn render_data(data: &PanelData) -> String {
    match data {
        PanelData::Status(snapshot) => status(snapshot),
        PanelData::Connector(report) => connector(report),
        PanelData::Check(report) => check(report),
        PanelData::Documents(documents) => document_list(documents),
        PanelData::ProcessingLogs(entries) => log_table(entries),
    }
}

fn loading(caption: &str) -> String {
    format!("<div class=\"loading\">{}</div>", escape_html(caption))
}

fn error(message: &str) -> String {
    format!("<div class=\"error\">Error: {}</div>", escape_html(message))
}

fn item(label: &str, value_html: &str) -> String {
    format!("<div class=\"status-item\"><span>{label}</span><span>{value_html}</span></div>")
}

fn styled_item(label: &str, class: &str, value: &str) -> String {
    format!(
        "<div class=\"status-item\"><span>{label}</span><span class=\"{class}\">{}</span></div>",
        escape_html(value)
    )
}

fn state_class(value: &str) -> &'static str {
    if value == "active" {
        "status-active"
    } else {
        "status-inactive"
    }
}

fn status(snapshot: &StatusSnapshot) -> String {
    let stats = &snapshot.statistics;
    let last_check = snapshot
        .last_check
        .as_deref()
        .filter(|raw| !raw.is_empty())
        .map_or_else(|| NEVER_RUN.to_string(), format_timestamp);

    let mut html = String::new();
    html.push_str(&styled_item("System:", state_class(&snapshot.status), &snapshot.status));
    html.push_str(&styled_item(
        "Celery:",
        state_class(&snapshot.celery_status),
        &snapshot.celery_status,
    ));
    html.push_str(&item("Total documents:", &stats.total_documents.to_string()));
    html.push_str(&item("FNS documents:", &stats.fns_documents.to_string()));
    html.push_str(&item("Regular documents:", &stats.regular_documents.to_string()));
    html.push_str(&item("Last check:", &escape_html(&last_check)));

    if let Some(config) = &snapshot.config {
        if let Some(minutes) = config.check_interval_minutes {
            html.push_str(&item("Check interval:", &format!("{minutes} min")));
        }
        if let Some(days) = config.documents_period_days {
            html.push_str(&item("Retention window:", &format!("{days} days")));
        }
    }
    html
}

fn connector(report: &ConnectorReport) -> String {
    let mut html = styled_item("Status:", "status-active", "Connection OK");
    html.push_str(&item("Documents found:", &report.documents_found.to_string()));
    html.push_str(&item("Checked at:", &format_local(&report.checked_at)));
    html
}

fn connector_failure(message: &str) -> String {
    let mut html = styled_item("Status:", "status-inactive", "Connection failed");
    html.push_str(&format!("<div class=\"error\">{}</div>", escape_html(message)));
    html
}

fn check(report: &CheckReport) -> String {
    let mut html = item("Last check:", &format_local(&report.checked_at));
    html.push_str(&item("New documents:", &report.new_documents.to_string()));
    html.push_str(&item("Total processed:", &report.total_processed.to_string()));
    html
}

fn document_list(documents: &[DocumentRecord]) -> String {
    if documents.is_empty() {
        return loading(NO_DOCUMENTS);
    }
    documents.iter().map(document_entry).collect()
}

fn document_entry(doc: &DocumentRecord) -> String {
    let (class, kind) = if doc.is_from_fns {
        ("document-fns", "FNS")
    } else {
        ("document-regular", "Regular")
    };
    let date = present(doc.date.as_deref()).map_or_else(|| NOT_SPECIFIED.to_string(), format_date);

    format!(
        "<div class=\"document-item {class}\">\
         <div class=\"document-header\">{subject}</div>\
         <div class=\"document-meta\">Date: {date} | INN: {inn} | {kind}</div>\
         <div class=\"document-meta\">File: {file}</div>\
         </div>",
        subject = escape_html(present(doc.subject.as_deref()).unwrap_or(NO_SUBJECT)),
        date = escape_html(&date),
        inn = escape_html(present(doc.sender_inn.as_deref()).unwrap_or(NOT_SPECIFIED)),
        file = escape_html(present(doc.filename.as_deref()).unwrap_or(NOT_SPECIFIED)),
    )
}

fn log_table(entries: &[ProcessingLogEntry]) -> String {
    if entries.is_empty() {
        return loading(NO_LOG_ENTRIES);
    }
    let mut html = String::from(
        "<table class=\"log-table\"><tr><th>Processed</th><th>Status</th>\
         <th>Total</th><th>FNS</th><th>Error</th></tr>",
    );
    for entry in entries {
        let class = if entry.status == "success" {
            "status-active"
        } else {
            "status-inactive"
        };
        let processed = present(entry.processed_at.as_deref())
            .map_or_else(|| NOT_SPECIFIED.to_string(), format_timestamp);
        html.push_str(&format!(
            "<tr><td>{}</td><td class=\"{class}\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&processed),
            escape_html(&entry.status),
            entry.total_documents,
            entry.fns_documents,
            escape_html(present(entry.error_message.as_deref()).unwrap_or("")),
        ));
    }
    html.push_str("</table>");
    html
}

/// Treats empty strings like missing values.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
