//! # shiftlens
//!
//! Compares a retail store's staffing schedule against its historical sales
//! and flags days where the sales-per-staff ratio deviates abnormally from
//! the norm.
//!
//! Two independently-dated datasets (historical sales records and a staffing
//! schedule) are aligned by calendar semantics — raw date, weekday, or
//! weekday-within-week-of-month — reduced to per-key summaries, joined, and
//! scored: records whose sales-per-staff ratio deviates from the population
//! mean by more than a configurable multiple of the standard deviation are
//! reported as anomalies.
//!
//! The whole pipeline is a pure function over immutable inputs: no shared
//! state, no I/O, one batch computation per call.
//!
//! ```
//! use chrono::NaiveDate;
//! use shiftlens::prelude::*;
//!
//! let sales = vec![
//!     SalesRecord::new("MIL", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 900.0).unwrap(),
//!     SalesRecord::new("MIL", NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 950.0).unwrap(),
//! ];
//! let schedule = vec![
//!     ScheduleRecord::new(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap(), 3),
//!     ScheduleRecord::new(NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(), 4),
//! ];
//!
//! let report = analyze(&sales, &schedule, &AnalysisConfig::default()).unwrap();
//! for row in &report.rows {
//!     println!("{}: ratio {:?}", row.key, row.ratio);
//! }
//! ```

pub mod aggregate;
pub mod align;
pub mod analysis;
pub mod calendar;
pub mod core;
pub mod detection;
pub mod error;
pub mod stats;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::aggregate::{aggregate, AggregatedSeries, CalendarKey, KeyStrategy, Reducer};
    pub use crate::align::{align, AlignedRecord, JoinPolicy};
    pub use crate::analysis::{
        analyze, compare_schedule, AnalysisConfig, AnalysisReport, AnalysisRow, ScheduleDayRow,
    };
    pub use crate::calendar::{enrich, week_of_month, CalendarFeatures};
    pub use crate::core::{collapse_roster, SalesRecord, ScheduleRecord};
    pub use crate::detection::{detect_anomalies, AnomalyConfig, AnomalyRecord, AnomalyReport};
    pub use crate::error::{AnalysisError, Result};
}
