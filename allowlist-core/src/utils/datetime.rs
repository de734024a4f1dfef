//! Millisecond timestamps.
//!
//! The cache timestamp is stored as Unix milliseconds; these helpers convert
//! it for display.

use chrono::{DateTime, Utc};

/// Current Unix time in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// RFC3339 rendering of a Unix millisecond timestamp.
pub fn format_millis(ts: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ts).map(|dt| dt.to_rfc3339())
}

/// Human readable age of `ts` relative to `now`, e.g. `"42 min ago"`.
pub fn describe_age(ts: i64, now: i64) -> String {
    let secs = (now - ts).max(0) / 1000;
    match secs {
        0..=59 => format!("{secs} s ago"),
        60..=3599 => format!("{} min ago", secs / 60),
        _ => format!("{} h {} min ago", secs / 3600, (secs % 3600) / 60),
    }
}
