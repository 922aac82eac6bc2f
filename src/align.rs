//! Alignment of two aggregated series on a shared calendar key space.

use crate::aggregate::{AggregatedSeries, CalendarKey};
use std::collections::BTreeSet;

/// How keys present in only one series are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Emit only keys present in both series. Used for exact-date
    /// comparison.
    Inner,
    /// Emit the union of keys; a missing value defaults to 0 before the
    /// ratio is computed. Used for month/week/weekday comparison, so a
    /// staffed day with no historical sales on record still appears (as
    /// zero) rather than vanishing.
    OuterFillZero,
}

/// One joined observation: sales and staff values for a calendar key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedRecord {
    pub key: CalendarKey,
    /// Aggregated sales value (zero-filled under [`JoinPolicy::OuterFillZero`]).
    pub sales: f64,
    /// Aggregated staff value (zero-filled under [`JoinPolicy::OuterFillZero`]).
    pub staff: f64,
    /// Sales per staff member. `None` when the staff value is zero: the
    /// ratio is undefined, not a division error, and such records are
    /// excluded from statistics downstream.
    pub ratio: Option<f64>,
}

impl AlignedRecord {
    fn new(key: CalendarKey, sales: f64, staff: f64) -> Self {
        let ratio = if staff > 0.0 { Some(sales / staff) } else { None };
        Self {
            key,
            sales,
            staff,
            ratio,
        }
    }
}

/// Join two aggregated series into a sequence of aligned records.
///
/// Output is ordered by key. Inner join emits the intersection of the two
/// key sets; outer-fill-zero emits exactly the union.
pub fn align(
    sales: &AggregatedSeries,
    staff: &AggregatedSeries,
    policy: JoinPolicy,
) -> Vec<AlignedRecord> {
    match policy {
        JoinPolicy::Inner => sales
            .iter()
            .filter_map(|(key, &sales_value)| {
                staff
                    .get(key)
                    .map(|&staff_value| AlignedRecord::new(*key, sales_value, staff_value))
            })
            .collect(),
        JoinPolicy::OuterFillZero => {
            let keys: BTreeSet<&CalendarKey> = sales.keys().chain(staff.keys()).collect();
            keys.into_iter()
                .map(|key| {
                    let sales_value = sales.get(key).copied().unwrap_or(0.0);
                    let staff_value = staff.get(key).copied().unwrap_or(0.0);
                    AlignedRecord::new(*key, sales_value, staff_value)
                })
                .collect()
        }
    }
}
