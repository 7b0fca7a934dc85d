//! Timestamps for result records.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current time as Unix seconds. Falls back to 0 if the clock is before 1970.
#[must_use]
pub fn now_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Format a Unix timestamp as `YYYY-MM-DD HH:MM:SS` (UTC) using simple arithmetic.
///
/// Any `u64` is accepted; years past 9999 are printed with more digits.
#[must_use]
pub fn format_timestamp(secs: u64) -> String {
    const SECS_PER_DAY: u64 = 86400;
    const SECS_PER_HOUR: u64 = 3600;
    const SECS_PER_MIN: u64 = 60;
    // Every run of 400 Gregorian years has the same number of days
    const DAYS_PER_400_YEARS: u64 = 146_097;

    let time_of_day = secs % SECS_PER_DAY;
    let hour = time_of_day / SECS_PER_HOUR;
    let min = (time_of_day % SECS_PER_HOUR) / SECS_PER_MIN;
    let sec = time_of_day % SECS_PER_MIN;

    let days = secs / SECS_PER_DAY;
    let mut year: u64 = 1970 + 400 * (days / DAYS_PER_400_YEARS);
    let mut days = days % DAYS_PER_400_YEARS;
    while days >= days_in_year(year) {
        days -= days_in_year(year);
        year += 1;
    }

    let days_in_months: [u64; 12] = if is_leap(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 0;
    while month < 12 && days >= days_in_months[month] {
        days -= days_in_months[month];
        month += 1;
    }
    let day = days + 1;

    let month = month + 1;
    format!("{year:04}-{month:02}-{day:02} {hour:02}:{min:02}:{sec:02}")
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_year(year: u64) -> u64 {
    if is_leap(year) { 366 } else { 365 }
}
