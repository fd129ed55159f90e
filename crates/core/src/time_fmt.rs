// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamp and duration formatting for display.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format epoch milliseconds as an RFC 3339 UTC timestamp with millisecond precision.
pub fn format_rfc3339(epoch_ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms as i64)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format epoch milliseconds as a wall-clock `HH:MM:SS` (UTC).
pub fn format_clock(epoch_ms: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms as i64)
        .unwrap_or_default()
        .format("%H:%M:%S")
        .to_string()
}

/// Format a duration in milliseconds as a compact string (`850ms`, `12s`, `3m 4s`, `2h 5m`).
pub fn format_elapsed_ms(ms: u64) -> String {
    if ms < 1_000 {
        return format!("{}ms", ms);
    }
    let secs = ms / 1_000;
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3_599 => format!("{}m {}s", secs / 60, secs % 60),
        _ => format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
