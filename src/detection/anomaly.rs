//! Standard-deviation-based anomaly flagging of sales-per-staff ratios.
//!
//! A record is an anomaly when its ratio deviates from the population mean
//! by more than `threshold` sample standard deviations. The multiplier is
//! fixed configuration, not learned. Thresholding against the standard
//! deviation assumes a roughly normal ratio distribution; for very small
//! samples a robust statistic (MAD) may behave better, but mean/std is what
//! the population statistics here are defined over.

use crate::align::AlignedRecord;
use crate::stats::{mean, std_dev};

/// Configuration for anomaly detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyConfig {
    /// Deviation threshold in standard-deviation units.
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { threshold: 1.5 }
    }
}

impl AnomalyConfig {
    /// Use the given threshold (default 1.5).
    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }
}

/// An aligned record flagged as anomalous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyRecord {
    /// The underlying aligned observation.
    pub record: AlignedRecord,
    /// Signed deviation of the ratio from the population mean, in
    /// standard-deviation units.
    pub deviation_std: f64,
}

/// Result of anomaly detection over one aligned set.
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyReport {
    /// Mean of all defined ratios. `None` when no record has a defined
    /// ratio.
    pub mean_ratio: Option<f64>,
    /// Sample standard deviation of all defined ratios. `None` with fewer
    /// than two observations.
    pub std_ratio: Option<f64>,
    /// Number of records with a defined ratio.
    pub observations: usize,
    /// Flagged records, a subset of the records with defined ratios.
    pub anomalies: Vec<AnomalyRecord>,
    /// Threshold used for flagging.
    pub threshold: f64,
}

impl AnomalyReport {
    fn empty(threshold: f64) -> Self {
        Self {
            mean_ratio: None,
            std_ratio: None,
            observations: 0,
            anomalies: Vec::new(),
            threshold,
        }
    }

    /// Number of anomalies flagged.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }

    /// Deviation of a ratio from the population, when the statistics are
    /// well defined and the variance is nonzero.
    pub fn deviation_of(&self, ratio: f64) -> Option<f64> {
        let mean = self.mean_ratio?;
        let std = self.std_ratio?;
        if std > 0.0 {
            Some((ratio - mean) / std)
        } else {
            None
        }
    }
}

/// Flag aligned records whose ratio deviates from the population mean by
/// more than `threshold` standard deviations.
///
/// Only records with a defined ratio enter the statistics. Degenerate
/// inputs — fewer than two observations, or zero variance — yield an empty
/// anomaly set rather than an error.
pub fn detect_anomalies(records: &[AlignedRecord], config: &AnomalyConfig) -> AnomalyReport {
    let ratios: Vec<f64> = records.iter().filter_map(|r| r.ratio).collect();

    if ratios.is_empty() {
        return AnomalyReport::empty(config.threshold);
    }

    let mean_ratio = mean(&ratios);
    if ratios.len() < 2 {
        return AnomalyReport {
            mean_ratio: Some(mean_ratio),
            observations: ratios.len(),
            ..AnomalyReport::empty(config.threshold)
        };
    }

    let std_ratio = std_dev(&ratios);

    let anomalies = if std_ratio > 0.0 {
        records
            .iter()
            .filter_map(|record| {
                let ratio = record.ratio?;
                let deviation_std = (ratio - mean_ratio) / std_ratio;
                (deviation_std.abs() > config.threshold).then_some(AnomalyRecord {
                    record: *record,
                    deviation_std,
                })
            })
            .collect()
    } else {
        // All ratios identical: nothing deviates, regardless of threshold.
        Vec::new()
    };

    AnomalyReport {
        mean_ratio: Some(mean_ratio),
        std_ratio: Some(std_ratio),
        observations: ratios.len(),
        anomalies,
        threshold: config.threshold,
    }
}
