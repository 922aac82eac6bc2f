//! Calendar feature derivation.
//!
//! Every function here is pure and total over valid calendar dates: no
//! clock, no locale, no external state. Weekday names come from a fixed
//! English table so that grouping keys never depend on the host locale.

use chrono::{Datelike, NaiveDate, Weekday};

/// Calendar features derived from a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// ISO weekday.
    pub weekday: Weekday,
    /// Fixed English weekday name ("Monday".."Sunday").
    pub weekday_name: &'static str,
    /// Month number (1-12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Week-of-month index (1-6).
    pub week_of_month: u32,
}

/// Derive calendar features from a date.
pub fn enrich(date: NaiveDate) -> CalendarFeatures {
    let weekday = date.weekday();
    CalendarFeatures {
        weekday,
        weekday_name: weekday_name(weekday),
        month: date.month(),
        year: date.year(),
        week_of_month: week_of_month(date),
    }
}

/// Week-of-month index of a date.
///
/// Defined as `((day_of_month - 1 + offset) / 7) + 1` where `offset` is the
/// position of the first of the month in a Monday=0..Sunday=6 week. The
/// result is always in 1..=6, and is 1 for the first of any month.
pub fn week_of_month(date: NaiveDate) -> u32 {
    let first_of_month = date.with_day(1).expect("day 1 exists in every month");
    let offset = first_of_month.weekday().num_days_from_monday();
    (date.day() - 1 + offset) / 7 + 1
}

/// Fixed English weekday name, independent of host locale.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
