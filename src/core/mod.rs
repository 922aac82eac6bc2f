//! Core data model for sales and schedule series.

mod records;

pub use records::{collapse_roster, SalesRecord, ScheduleRecord};
