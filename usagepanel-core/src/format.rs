//! Reset countdown formatting.
//!
//! Converts a remaining duration into a short, human-scale string such as
//! `"1d 1h"`, `"2h 5m"` or `"<1m"`. Only the two coarsest units are kept,
//! so the output is exact to the displayed unit and nothing finer.

use chrono::{DateTime, Utc};

use crate::error::CoreError;

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_MINUTE: i64 = 60;

/// Formats a number of remaining seconds.
///
/// ```
/// use usagepanel_core::format_seconds;
///
/// assert_eq!(format_seconds(0), "now");
/// assert_eq!(format_seconds(90_000), "1d 1h");
/// assert_eq!(format_seconds(5_400), "1h 30m");
/// assert_eq!(format_seconds(45), "<1m");
/// ```
pub fn format_seconds(seconds: i64) -> String {
    if seconds <= 0 {
        return "now".to_string();
    }

    let days = seconds / SECS_PER_DAY;
    let hours = (seconds % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (seconds % SECS_PER_HOUR) / SECS_PER_MINUTE;

    if days > 0 {
        if hours > 0 {
            format!("{days}d {hours}h")
        } else {
            format!("{days}d")
        }
    } else if hours > 0 {
        if minutes > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{hours}h")
        }
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "<1m".to_string()
    }
}

/// Formats the time left until `reset_at`, measured from `now`.
pub fn format_reset_at(reset_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_seconds((reset_at - now).num_seconds())
}

/// Parses an RFC 3339 / ISO 8601 timestamp into UTC.
///
/// # Errors
///
/// Returns `CoreError::InvalidTimestamp` if the string is not a valid
/// RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidTimestamp(format!("{value}: {e}")))
}

/// Formats the time left until an ISO timestamp. Unparseable input yields
/// `None` so the caller simply omits the countdown.
pub fn format_reset_iso(value: &str, now: DateTime<Utc>) -> Option<String> {
    parse_timestamp(value)
        .ok()
        .map(|reset_at| format_reset_at(reset_at, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_format_seconds_non_positive() {
        assert_eq!(format_seconds(0), "now");
        assert_eq!(format_seconds(-30), "now");
    }

    #[test]
    fn test_format_seconds_units() {
        assert_eq!(format_seconds(45), "<1m");
        assert_eq!(format_seconds(60), "1m");
        assert_eq!(format_seconds(5_400), "1h 30m");
        assert_eq!(format_seconds(7_200), "2h");
        assert_eq!(format_seconds(7_259), "2h");
        assert_eq!(format_seconds(86_400), "1d");
        assert_eq!(format_seconds(90_000), "1d 1h");
        // minutes are dropped once days are shown
        assert_eq!(format_seconds(86_400 + 59 * 60), "1d");
        assert_eq!(format_seconds(6 * 86_400 + 23 * 3_600 + 59 * 60), "6d 23h");
    }

    #[test]
    fn test_format_reset_at() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_reset_at(now + Duration::minutes(125), now), "2h 5m");
        assert_eq!(format_reset_at(now - Duration::minutes(5), now), "now");
    }

    #[test]
    fn test_format_reset_iso() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            format_reset_iso("2025-01-01T17:00:00Z", now),
            Some("5h".to_string())
        );
        assert_eq!(
            format_reset_iso("2025-01-01T13:30:00.123456+00:00", now),
            Some("1h 30m".to_string())
        );
        assert_eq!(format_reset_iso("tomorrow", now), None);
        assert!(parse_timestamp("").is_err());
    }
}
