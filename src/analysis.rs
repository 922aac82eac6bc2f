//! End-to-end analysis pipeline.
//!
//! Wires the calendar enricher, aggregator, aligner and anomaly detector
//! into one batch computation: raw sales and schedule records in, a
//! well-formed result table out. Each call is independent and stateless; no
//! data-shape edge case is fatal, and the pipeline always returns a
//! (possibly empty) report.

use crate::aggregate::{aggregate, CalendarKey, KeyStrategy, Reducer};
use crate::align::{align, JoinPolicy};
use crate::calendar::weekday_name;
use crate::core::{SalesRecord, ScheduleRecord};
use crate::detection::{detect_anomalies, AnomalyConfig};
use crate::error::{AnalysisError, Result};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Configuration for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Calendar key variant used for both series.
    pub strategy: KeyStrategy,
    /// Join policy applied when the two key sets differ.
    pub join: JoinPolicy,
    /// Anomaly threshold in standard-deviation units.
    pub threshold: f64,
}

impl Default for AnalysisConfig {
    /// The primary analysis: month/week-of-month/weekday alignment with
    /// outer zero-fill and the 1.5-sigma threshold.
    fn default() -> Self {
        Self::by_month_week_weekday()
    }
}

impl AnalysisConfig {
    /// Coarse weekday-only baseline.
    pub fn by_weekday() -> Self {
        Self {
            strategy: KeyStrategy::Weekday,
            join: JoinPolicy::Inner,
            threshold: 1.5,
        }
    }

    /// Exact-date comparison. Only meaningful when the schedule covers the
    /// same concrete dates as the historical sales.
    pub fn by_date() -> Self {
        Self {
            strategy: KeyStrategy::Date,
            join: JoinPolicy::Inner,
            threshold: 1.5,
        }
    }

    /// Month + week-of-month + weekday alignment, the intended strategy.
    pub fn by_month_week_weekday() -> Self {
        Self {
            strategy: KeyStrategy::MonthWeekWeekday,
            join: JoinPolicy::OuterFillZero,
            threshold: 1.5,
        }
    }

    /// Override the anomaly threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

/// One row of the result table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRow {
    /// Calendar key the row is aligned on.
    pub key: CalendarKey,
    /// Aggregated staff value for the key.
    pub staff_count: f64,
    /// Aggregated historical sales value for the key.
    pub sales_value: f64,
    /// Sales per staff member; `None` when the staff value is zero.
    pub ratio: Option<f64>,
    /// Deviation from the population mean in standard-deviation units,
    /// present only on rows flagged as anomalous.
    pub deviation_std: Option<f64>,
}

impl AnalysisRow {
    /// Whether this row was flagged as an anomaly.
    pub fn is_anomaly(&self) -> bool {
        self.deviation_std.is_some()
    }
}

/// Result of one analysis run: the full aligned table plus the population
/// statistics the anomaly flags were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// All aligned rows, ordered by key.
    pub rows: Vec<AnalysisRow>,
    /// Mean of all defined ratios.
    pub mean_ratio: Option<f64>,
    /// Sample standard deviation of all defined ratios.
    pub std_ratio: Option<f64>,
}

impl AnalysisReport {
    fn empty() -> Self {
        Self {
            rows: Vec::new(),
            mean_ratio: None,
            std_ratio: None,
        }
    }

    /// Rows flagged as anomalous.
    pub fn anomalies(&self) -> impl Iterator<Item = &AnalysisRow> {
        self.rows.iter().filter(|r| r.is_anomaly())
    }
}

/// Run the full pipeline: enrich, aggregate (mean sales, summed staff),
/// align, and flag ratio anomalies.
///
/// Either input being empty yields an empty report, not an error. A
/// negative or non-finite sales amount is a precondition violation and is
/// rejected before any computation.
pub fn analyze(
    sales: &[SalesRecord],
    schedule: &[ScheduleRecord],
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    validate_sales(sales)?;

    if sales.is_empty() || schedule.is_empty() {
        return Ok(AnalysisReport::empty());
    }

    let sales_series = aggregate(
        sales,
        |r| config.strategy.key_for(r.date),
        |r| r.sales_amount,
        Reducer::Mean,
    );
    let staff_series = aggregate(
        schedule,
        |r| config.strategy.key_for(r.date),
        |r| f64::from(r.staff_count),
        Reducer::Sum,
    );

    let aligned = align(&sales_series, &staff_series, config.join);
    let report = detect_anomalies(&aligned, &AnomalyConfig::with_threshold(config.threshold));

    let deviations: HashMap<CalendarKey, f64> = report
        .anomalies
        .iter()
        .map(|a| (a.record.key, a.deviation_std))
        .collect();

    let rows = aligned
        .into_iter()
        .map(|record| AnalysisRow {
            key: record.key,
            staff_count: record.staff,
            sales_value: record.sales,
            ratio: record.ratio,
            deviation_std: deviations.get(&record.key).copied(),
        })
        .collect();

    Ok(AnalysisReport {
        rows,
        mean_ratio: report.mean_ratio,
        std_ratio: report.std_ratio,
    })
}

/// One concrete schedule date compared against the historical mean sales
/// for its month/week-of-month/weekday key.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDayRow {
    /// The scheduled date.
    pub date: NaiveDate,
    /// Fixed English weekday name for display.
    pub weekday_name: &'static str,
    /// People scheduled on the date.
    pub staff_count: u32,
    /// Historical mean sales for the date's calendar key; `None` when no
    /// historical record shares that key.
    pub expected_sales: Option<f64>,
    /// Expected sales per scheduled person.
    pub ratio: Option<f64>,
}

/// Compare each scheduled date against the historical mean sales of its
/// month/week-of-month/weekday key (left join on the schedule side).
///
/// This is the per-date table the presentation layer renders as parallel
/// chart series: a sales-magnitude series and a staff-count series over
/// the same date axis. Output is date-sorted.
pub fn compare_schedule(
    sales: &[SalesRecord],
    schedule: &[ScheduleRecord],
) -> Result<Vec<ScheduleDayRow>> {
    validate_sales(sales)?;

    let strategy = KeyStrategy::MonthWeekWeekday;
    let sales_series = aggregate(
        sales,
        |r| strategy.key_for(r.date),
        |r| r.sales_amount,
        Reducer::Mean,
    );

    let mut rows: Vec<ScheduleDayRow> = schedule
        .iter()
        .map(|record| {
            let expected_sales = sales_series.get(&strategy.key_for(record.date)).copied();
            let ratio = match expected_sales {
                Some(sales_value) if record.staff_count > 0 => {
                    Some(sales_value / f64::from(record.staff_count))
                }
                _ => None,
            };
            ScheduleDayRow {
                date: record.date,
                weekday_name: weekday_name(record.date.weekday()),
                staff_count: record.staff_count,
                expected_sales,
                ratio,
            }
        })
        .collect();
    rows.sort_by_key(|r| r.date);

    Ok(rows)
}

fn validate_sales(sales: &[SalesRecord]) -> Result<()> {
    for record in sales {
        if !record.sales_amount.is_finite() {
            return Err(AnalysisError::NonFiniteSales {
                date: record.date,
                amount: record.sales_amount,
            });
        }
        if record.sales_amount < 0.0 {
            return Err(AnalysisError::NegativeSales {
                date: record.date,
                amount: record.sales_amount,
            });
        }
    }
    Ok(())
}
