//! Capture timestamp rendering.

use chrono::{DateTime, SecondsFormat, Utc};

/// Render microseconds since the Unix epoch as RFC 3339 UTC.
///
/// # Example
///
/// ```
/// use wpansniff_core::format::format_timestamp;
///
/// assert_eq!(format_timestamp(1_500_000_000_250_000), "2017-07-14T02:40:00.250000Z");
/// ```
pub fn format_timestamp(timestamp_us: i64) -> String {
    DateTime::<Utc>::from_timestamp_micros(timestamp_us)
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Micros, true))
        .unwrap_or_default()
}
