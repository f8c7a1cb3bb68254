use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::block::BlockTimestamp;

/// Placeholder shown when a block timestamp is absent or cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Renders a block timestamp for display.
///
/// Numbers (and numeric strings) are epoch milliseconds. Strings are tried as
/// RFC 3339 first, then as zone-less date-times, which are read as UTC.
/// Zero, empty and unparsable values render as [`INVALID_DATE`].
pub fn format_timestamp(timestamp: Option<&BlockTimestamp>) -> String {
    parse_timestamp(timestamp)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

pub fn parse_timestamp(timestamp: Option<&BlockTimestamp>) -> Option<DateTime<Utc>> {
    match timestamp? {
        BlockTimestamp::Millis(0) => None,
        BlockTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        BlockTimestamp::FractionalMillis(ms) => from_fractional_millis(*ms),
        BlockTimestamp::Text(text) => parse_text(text.trim()),
    }
}

fn from_fractional_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() || ms.trunc() == 0.0 || ms.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(ms.trunc() as i64)
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }
    if let Ok(ms) = text.parse::<i64>() {
        return if ms == 0 { None } else { DateTime::from_timestamp_millis(ms) };
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
}
