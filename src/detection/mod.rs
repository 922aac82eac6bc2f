//! Ratio anomaly detection over aligned records.

mod anomaly;

pub use anomaly::{detect_anomalies, AnomalyConfig, AnomalyRecord, AnomalyReport};
