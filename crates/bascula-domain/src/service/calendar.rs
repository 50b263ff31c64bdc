//! Calendar helpers operating on plain dates

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// Dates in `[start, end]`, chronological, optionally without Sundays.
///
/// Empty when `end < start`.
pub fn build_date_list(start: NaiveDate, end: NaiveDate, skip_sundays: bool) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !(skip_sundays && is_sunday(*d)))
        .collect()
}

/// Length of `build_date_list(start, end, skip_sundays)` without building it
pub fn count_included_days(start: NaiveDate, end: NaiveDate, skip_sundays: bool) -> u64 {
    if end < start {
        return 0;
    }
    let total = (end - start).num_days() as u64 + 1;
    if !skip_sundays {
        return total;
    }
    let full_weeks = total / 7;
    let remainder = total % 7;
    let trailing_sundays = (0..remainder)
        .filter(|offset| is_sunday(start + Duration::days((full_weeks * 7 + offset) as i64)))
        .count() as u64;
    total - full_weeks - trailing_sundays
}

/// `D/M/YYYY` without zero padding, as written in the report date column
pub fn format_date_dmy(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// `DD-MM-YYYY`, used in report titles
pub fn format_date_title(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}
