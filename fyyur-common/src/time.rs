//! Timestamp utilities

use chrono::{DateTime, NaiveDateTime, Utc};

/// Machine-readable format carried by show history records
pub const MACHINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display styles for show start times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Tuesday May, 21, 2019 at 9:30PM"
    Full,
    /// "Tue 05, 21, 2019 9:30PM"
    Medium,
}

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Format a start time for display
pub fn format_datetime(value: &DateTime<Utc>, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

/// Format a start time as `YYYY-MM-DD HH:MM:SS`
pub fn format_machine(value: &DateTime<Utc>) -> String {
    value.format(MACHINE_FORMAT).to_string()
}

/// Parse a submitted start time, interpreted as UTC
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM`, the HTML
/// `datetime-local` forms (`T` separator) and full RFC 3339.
pub fn parse_start_time(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}
