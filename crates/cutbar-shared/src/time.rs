//! Relative "time ago" rendering.
//!
//! Every view record (message, post, comment) carries its timestamp in this
//! form. Granularity stops at days: a post from last month reads
//! `"31 days ago"`.

use chrono::{DateTime, Utc};

/// Render `timestamp` relative to the current time.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, Utc::now())
}

/// Render `timestamp` relative to an explicit `now`.
///
/// Timestamps in the future (clock skew) read as `"Just now"`.
pub fn format_timestamp_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return ago(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return ago(hours, "hour");
    }

    ago(hours / 24, "day")
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
