//! Wall-clock formatting for a remote location.
//!
//! The provider reports instants as UTC seconds plus a per-location UTC
//! offset. Display strings are produced by shifting the instant by that
//! offset and rendering the result as if it were UTC, so the clock of the
//! machine running the dashboard never leaks into the output.

use chrono::{DateTime, Utc};

const FALLBACK: &str = "--:--";

fn shifted(ts_utc_sec: i64, tz_offset_sec: i64) -> Option<DateTime<Utc>> {
    ts_utc_sec
        .checked_add(tz_offset_sec)
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// 12-hour `HH:MM AM/PM` at the location. Never panics; inputs outside the
/// representable range fall back to a placeholder.
pub fn local_time(ts_utc_sec: i64, tz_offset_sec: i64) -> String {
    shifted(ts_utc_sec, tz_offset_sec)
        .map(|d| d.format("%I:%M %p").to_string())
        .unwrap_or_else(|| FALLBACK.to_string())
}

/// Short weekday, month, day and 12-hour time at the location.
pub fn local_date_time(ts_utc_sec: i64, tz_offset_sec: i64) -> String {
    shifted(ts_utc_sec, tz_offset_sec)
        .map(|d| d.format("%a, %b %-d, %I:%M %p").to_string())
        .unwrap_or_else(|| FALLBACK.to_string())
}
