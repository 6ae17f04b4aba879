//! English month/day name tables and date formatting.
//!
//! The grammar only ever targets English names, so these are module-owned
//! constants rather than a runtime locale lookup.

use chrono::{Datelike, NaiveDate, Weekday};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Abbreviated month names as they appear in obituary prose
/// ("died Jan. 2", "died on Oct. 1").
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Full month name for a 1-based month number. Empty string out of range.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize - 1).copied().unwrap_or("")
}

/// Abbreviated month name for a 1-based month number. Empty string out of range.
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS
        .get(month as usize - 1)
        .copied()
        .unwrap_or("")
}

/// Number of days in a month, leap-year aware. 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

/// English day name for a date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Wiki citation date form: `29 January 2006`.
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_basics() {
        assert_eq!(days_in_month(2006, 1), 31);
        assert_eq!(days_in_month(2006, 4), 30);
        assert_eq!(days_in_month(2006, 2), 28);
        assert_eq!(days_in_month(2004, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28); // century, not a leap year
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2006, 12), 31);
        assert_eq!(days_in_month(2006, 13), 0);
    }

    #[test]
    fn weekday_names() {
        let d = NaiveDate::from_ymd_opt(2006, 1, 29).unwrap();
        assert_eq!(weekday_name(d), "Sunday");
        assert_eq!(weekday_name(d.succ_opt().unwrap()), "Monday");
    }

    #[test]
    fn long_date_format() {
        let d = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        assert_eq!(long_date(d), "2 January 2006"); // day is never zero-padded
    }
}
