//! Aggregation of dated records into per-calendar-key summaries.
//!
//! The three alignment strategies (weekday-only, exact date, month plus
//! week-of-month plus weekday) are one capability: calendar key extraction.
//! Aggregation, alignment and anomaly detection are written once against
//! [`CalendarKey`] and reused across all three.

use crate::calendar::{week_of_month, weekday_name};
use chrono::{Datelike, NaiveDate, Weekday};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Grouping identity used to align two dated series that may not share
/// exact dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarKey {
    /// Coarsest grouping: weekday only.
    Weekday(Weekday),
    /// Finest grouping: the exact calendar date.
    Date(NaiveDate),
    /// The primary alignment key: "third Saturday of March" rather than
    /// pure weekday or exact date, matching how retail patterns recur.
    MonthWeekWeekday {
        /// Month number (1-12).
        month: u32,
        /// Week-of-month index (1-6).
        week_of_month: u32,
        /// ISO weekday.
        weekday: Weekday,
    },
}

impl CalendarKey {
    fn sort_key(&self) -> (u8, i64, u32, u32, u32) {
        match *self {
            CalendarKey::Weekday(w) => (0, 0, 0, 0, w.num_days_from_monday()),
            CalendarKey::Date(d) => (1, d.num_days_from_ce() as i64, 0, 0, 0),
            CalendarKey::MonthWeekWeekday {
                month,
                week_of_month,
                weekday,
            } => (2, 0, month, week_of_month, weekday.num_days_from_monday()),
        }
    }
}

impl Ord for CalendarKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for CalendarKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CalendarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CalendarKey::Weekday(w) => f.write_str(weekday_name(w)),
            CalendarKey::Date(d) => write!(f, "{d}"),
            CalendarKey::MonthWeekWeekday {
                month,
                week_of_month,
                weekday,
            } => write!(f, "month {month} week {week_of_month} {}", weekday_name(weekday)),
        }
    }
}

/// Which calendar key variant to extract from a date.
///
/// Both series of an analysis use the same strategy so their keys share one
/// key space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrategy {
    /// Weekday only. Coarse baseline ignoring month and week placement.
    Weekday,
    /// Exact calendar date. Only useful when both series cover the same
    /// concrete dates; disjoint ranges produce a sparse or empty alignment.
    Date,
    /// Month, week-of-month and weekday. The intended strategy: aligns the
    /// same relative day across recurring months even when the two series
    /// cover different date ranges.
    #[default]
    MonthWeekWeekday,
}

impl KeyStrategy {
    /// Extract the calendar key for a date under this strategy.
    pub fn key_for(self, date: NaiveDate) -> CalendarKey {
        match self {
            KeyStrategy::Weekday => CalendarKey::Weekday(date.weekday()),
            KeyStrategy::Date => CalendarKey::Date(date),
            KeyStrategy::MonthWeekWeekday => CalendarKey::MonthWeekWeekday {
                month: date.month(),
                week_of_month: week_of_month(date),
                weekday: date.weekday(),
            },
        }
    }
}

/// Reduction policy applied to all values sharing a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    /// Sum of values (staff counts).
    Sum,
    /// Arithmetic mean of values (sales).
    Mean,
}

/// Per-key numeric summaries with stable (ordered) iteration.
pub type AggregatedSeries = BTreeMap<CalendarKey, f64>;

/// Reduce raw records into per-key summaries.
///
/// Every distinct key present in the input appears exactly once in the
/// output. Sum and mean are order-independent, so permuting the input never
/// changes the result. Empty input yields an empty series.
pub fn aggregate<R>(
    records: &[R],
    key_fn: impl Fn(&R) -> CalendarKey,
    value_fn: impl Fn(&R) -> f64,
    reducer: Reducer,
) -> AggregatedSeries {
    let mut groups: BTreeMap<CalendarKey, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key_fn(record)).or_insert((0.0, 0));
        entry.0 += value_fn(record);
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(key, (sum, count))| {
            let value = match reducer {
                Reducer::Sum => sum,
                Reducer::Mean => sum / count as f64,
            };
            (key, value)
        })
        .collect()
}
