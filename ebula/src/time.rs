//! Time-of-day arithmetic for the in-world clock.
//!
//! The simulator clock is a plain 24h wall clock without a date, so all
//! helpers here work on [`NaiveTime`] and treat a backwards jump as a
//! midnight crossing. Every function is fail-soft: malformed input yields
//! `None` or the input unchanged, never a panic.

use chrono::{NaiveTime, Timelike};

/// Number of seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Parse a `"HH:mm"` (or `"HH:mm:ss"`) time of day.
///
/// Returns `None` for blank or malformed input.
///
/// # Example
///
/// ```
/// use ebula::time::parse_time_of_day;
///
/// assert!(parse_time_of_day("09:43").is_some());
/// assert!(parse_time_of_day("").is_none());
/// assert!(parse_time_of_day("25:00").is_none());
/// ```
pub fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

/// Seconds from `from` to `to`, wrapping across midnight.
///
/// The result is always in `0..86400`: if `to` is earlier on the clock than
/// `from`, the difference is taken as running through midnight.
pub fn seconds_between(from: NaiveTime, to: NaiveTime) -> i64 {
    let diff =
        i64::from(to.num_seconds_from_midnight()) - i64::from(from.num_seconds_from_midnight());
    if diff < 0 {
        diff + SECONDS_PER_DAY
    } else {
        diff
    }
}

/// Format a time of day as `"HH:mm"`, or `"HH:mm:ss"` when seconds are set.
pub fn format_time_of_day(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

/// Advance a time string by `seconds`, modulo one day.
///
/// Malformed input is returned unchanged so a broken clock string survives
/// for display instead of turning into a fake time.
///
/// # Example
///
/// ```
/// use ebula::time::advance_by_seconds;
///
/// assert_eq!(advance_by_seconds("23:59", 60), "00:00");
/// assert_eq!(advance_by_seconds("08:15", 1), "08:15:01");
/// assert_eq!(advance_by_seconds("soon", 60), "soon");
/// ```
pub fn advance_by_seconds(time_str: &str, seconds: i64) -> String {
    let Some(time) = parse_time_of_day(time_str) else {
        return time_str.to_string();
    };

    let total = (i64::from(time.num_seconds_from_midnight()) + seconds).rem_euclid(SECONDS_PER_DAY);
    match NaiveTime::from_num_seconds_from_midnight_opt(total as u32, 0) {
        Some(advanced) => format_time_of_day(advanced),
        None => time_str.to_string(),
    }
}
