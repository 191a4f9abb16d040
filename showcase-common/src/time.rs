//! Timestamp utilities
//!
//! Timestamps are persisted as INTEGER Unix milliseconds so that ordering in
//! SQL matches chronological ordering.

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert a timestamp to its stored representation (Unix milliseconds)
pub fn to_millis(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

/// Convert stored Unix milliseconds back to a timestamp
///
/// Out-of-range values fall back to the Unix epoch rather than failing a
/// whole row decode.
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}
