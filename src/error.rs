//! Error types for the shiftlens library.
//!
//! Data-shape edge cases (missing join keys, zero staff counts, degenerate
//! statistics, empty inputs) are not errors: they resolve to join policy,
//! undefined ratios, or empty results. Errors are reserved for precondition
//! violations the ingestion layer should have caught.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during an analysis run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A sales amount outside the documented domain (negative).
    #[error("sales amount must be non-negative: got {amount} on {date}")]
    NegativeSales { date: NaiveDate, amount: f64 },

    /// A sales amount that is NaN or infinite.
    #[error("sales amount must be finite: got {amount} on {date}")]
    NonFiniteSales { date: NaiveDate, amount: f64 },
}
