//! Time utilities

use chrono::{SecondsFormat, TimeZone, Utc};

/// Convert a Unix timestamp to an ISO 8601 UTC datetime string
///
/// # Examples
/// ```
/// use counterparty_decoder::utils::time::timestamp_to_iso;
/// assert_eq!(timestamp_to_iso(0), "1970-01-01T00:00:00.000Z");
/// assert_eq!(timestamp_to_iso(1609459200), "2021-01-01T00:00:00.000Z");
/// ```
pub fn timestamp_to_iso(timestamp: i64) -> String {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "1970-01-01T00:00:00.000Z".to_string())
}
