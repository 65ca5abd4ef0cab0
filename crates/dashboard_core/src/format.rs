use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Day-first layout the operators read timestamps in.
pub const DATETIME_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn format_local(at: &DateTime<Local>) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// Formats a backend timestamp with date and time. Offset-carrying values are
/// shifted to local time; naive ones are taken as local already. Text that is
/// not a timestamp is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|naive| naive.format(DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Like [`format_timestamp`] but date only.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|naive| naive.format(DATE_FORMAT).to_string())
        .or_else(|| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .ok()
                .map(|date| date.format(DATE_FORMAT).to_string())
        })
        .unwrap_or_else(|| raw.to_string())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .into_iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
}
