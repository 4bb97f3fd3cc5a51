//! Human display formatting for file sizes and timestamps.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format a byte count as `B`/`KB`/`MB`/`GB` with one decimal above bytes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn file_size(bytes: i64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let clamped = bytes.max(0);
    let b = clamped as f64;
    if b < KB {
        format!("{clamped} B")
    } else if b < MB {
        format!("{:.1} KB", b / KB)
    } else if b < GB {
        format!("{:.1} MB", b / MB)
    } else {
        format!("{:.1} GB", b / GB)
    }
}

/// Relative age of an ISO 8601 timestamp: `just now` under a minute, then
/// minutes/hours/days, then an absolute date past a week. Unparseable input
/// is returned as-is.
#[must_use]
pub fn relative_time(iso: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(iso) else {
        return iso.to_owned();
    };
    let secs = (now - then).num_seconds();
    if secs < 60 {
        return "just now".to_owned();
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{mins}m ago");
    }
    let hours = mins / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    then.format("%b %-d, %Y").to_string()
}

/// [`relative_time`] against the current clock.
#[must_use]
pub fn relative_time_now(iso: &str) -> String {
    relative_time(iso, Utc::now())
}

/// Accepts RFC 3339 and the offset-less shape some timestamp columns
/// serialize to.
fn parse_timestamp(iso: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
