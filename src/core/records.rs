//! Input record types.
//!
//! Records are immutable once constructed. Domain checks happen at
//! construction so that the pipeline can assume well-formed input: a
//! negative or non-finite sales amount is a precondition violation and is
//! rejected loudly, while a staff count of zero is in-domain (it yields an
//! undefined ratio downstream, not an error).

use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One historical sales observation for a single store.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// Store identifier (e.g. "MIL").
    pub store_id: String,
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Sales amount, finite and non-negative.
    pub sales_amount: f64,
}

impl SalesRecord {
    /// Create a sales record, validating the amount.
    pub fn new(store_id: impl Into<String>, date: NaiveDate, sales_amount: f64) -> Result<Self> {
        if !sales_amount.is_finite() {
            return Err(AnalysisError::NonFiniteSales {
                date,
                amount: sales_amount,
            });
        }
        if sales_amount < 0.0 {
            return Err(AnalysisError::NegativeSales {
                date,
                amount: sales_amount,
            });
        }
        Ok(Self {
            store_id: store_id.into(),
            date,
            sales_amount,
        })
    }
}

/// One scheduled day with the number of people rostered on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRecord {
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Number of people scheduled. Zero is allowed and yields an undefined
    /// ratio downstream; negative counts are unrepresentable.
    pub staff_count: u32,
}

impl ScheduleRecord {
    pub fn new(date: NaiveDate, staff_count: u32) -> Self {
        Self { date, staff_count }
    }
}

/// Collapse a raw roster (one entry per scheduled person per date) into one
/// record per date carrying the person count. Output is date-sorted.
pub fn collapse_roster(shift_dates: &[NaiveDate]) -> Vec<ScheduleRecord> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for &date in shift_dates {
        *counts.entry(date).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(date, staff_count)| ScheduleRecord { date, staff_count })
        .collect()
}
