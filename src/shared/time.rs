//! Timestamp helpers.
//!
//! Timestamps are persisted as integer Unix milliseconds so that SQLite
//! compares them numerically.

use chrono::{DateTime, Utc};

/// Convert stored milliseconds to a UTC timestamp.
pub fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Convert a UTC timestamp to stored milliseconds.
pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}
