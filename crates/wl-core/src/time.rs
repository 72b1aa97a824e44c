//! Timestamp parsing and rendering for the flat files.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Naive layouts accepted when a timestamp carries no offset. They are read as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A timestamp string that matched none of the supported layouts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "invalid timestamp: {value:?}, expected ISO 8601 (e.g., 2024-01-01T09:00:00Z or 2024-01-01 09:00)"
)]
pub struct TimestampError {
    pub value: String,
}

/// Parses a timestamp as written by GitHub or by hand.
///
/// Supports:
/// - RFC 3339: "2024-01-01T09:00:00Z", "2024-01-01 09:00:00+00:00"
/// - Naive, read as UTC: "2024-01-01T09:00", "2024-01-01 09:00:00.5"
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError {
            value: s.to_string(),
        })
}

/// Renders a timestamp the way the flat files store it ("2024-01-01T09:00:00Z").
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
