//! End-to-end scenarios through the public pipeline API.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use shiftlens::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sale(y: i32, m: u32, d: u32, amount: f64) -> SalesRecord {
    SalesRecord::new("BHR", date(y, m, d), amount).unwrap()
}

/// Scenario A: equal sales across Mon/Tue/Wed, overstaffed Wednesday.
/// Ratios 50/50/10: Wednesday sits at -1.155 sigma, below the default 1.5
/// threshold but flagged at 1.0.
#[test]
fn overstaffed_day_flags_only_at_tighter_threshold() {
    let sales = vec![
        sale(2024, 1, 1, 100.0), // Monday
        sale(2024, 1, 2, 100.0), // Tuesday
        sale(2024, 1, 3, 100.0), // Wednesday
    ];
    let schedule = vec![
        ScheduleRecord::new(date(2024, 3, 4), 2),  // Monday
        ScheduleRecord::new(date(2024, 3, 5), 2),  // Tuesday
        ScheduleRecord::new(date(2024, 3, 6), 10), // Wednesday
    ];

    let report = analyze(&sales, &schedule, &AnalysisConfig::by_weekday()).unwrap();
    assert_relative_eq!(report.mean_ratio.unwrap(), 36.6667, epsilon = 1e-3);
    assert_relative_eq!(report.std_ratio.unwrap(), 23.094, epsilon = 1e-3);
    assert_eq!(report.anomalies().count(), 0);

    let tighter = AnalysisConfig::by_weekday().with_threshold(1.0);
    let report = analyze(&sales, &schedule, &tighter).unwrap();
    let anomalies: Vec<_> = report.anomalies().collect();
    assert_eq!(anomalies.len(), 1);
    assert_relative_eq!(anomalies[0].deviation_std.unwrap(), -1.1547, epsilon = 1e-3);
}

/// Scenario B: a zero-staff day stays in the output with an undefined
/// ratio and never enters the statistics.
#[test]
fn zero_staff_day_is_retained_but_excluded_from_statistics() {
    let sales = vec![
        sale(2024, 5, 6, 200.0),
        sale(2024, 5, 7, 300.0),
        sale(2024, 5, 8, 250.0),
    ];
    let schedule = vec![
        ScheduleRecord::new(date(2024, 5, 6), 4),
        ScheduleRecord::new(date(2024, 5, 7), 5),
        ScheduleRecord::new(date(2024, 5, 8), 0),
    ];

    let report = analyze(&sales, &schedule, &AnalysisConfig::by_date()).unwrap();

    assert_eq!(report.rows.len(), 3);
    let undefined: Vec<_> = report.rows.iter().filter(|r| r.ratio.is_none()).collect();
    assert_eq!(undefined.len(), 1);
    assert_eq!(undefined[0].key, CalendarKey::Date(date(2024, 5, 8)));
    assert!(!undefined[0].is_anomaly());

    // mean over {50, 60} only
    assert_relative_eq!(report.mean_ratio.unwrap(), 55.0, epsilon = 1e-10);
}

/// Scenario C: a staffed key with no historical sales is zero-filled by the
/// outer join and can itself become a flagged low anomaly.
#[test]
fn unmatched_schedule_key_becomes_low_anomaly() {
    // Steady Monday history in January 2024 (starts on a Monday)...
    let sales = vec![
        sale(2024, 1, 1, 100.0),
        sale(2024, 1, 8, 100.0),
        sale(2024, 1, 15, 100.0),
        sale(2024, 1, 22, 100.0),
    ];
    // ...and a 2029 schedule (January 2029 also starts on a Monday) that
    // additionally staffs a Friday with no sales history.
    let schedule = vec![
        ScheduleRecord::new(date(2029, 1, 1), 2),
        ScheduleRecord::new(date(2029, 1, 8), 2),
        ScheduleRecord::new(date(2029, 1, 15), 2),
        ScheduleRecord::new(date(2029, 1, 22), 2),
        ScheduleRecord::new(date(2029, 1, 5), 2),
    ];

    let report = analyze(&sales, &schedule, &AnalysisConfig::default()).unwrap();

    assert_eq!(report.rows.len(), 5);
    let friday = report
        .rows
        .iter()
        .find(|r| r.sales_value == 0.0)
        .expect("zero-filled row");
    assert_relative_eq!(friday.ratio.unwrap(), 0.0, epsilon = 1e-10);
    assert!(friday.is_anomaly());
    assert!(friday.deviation_std.unwrap() < -1.5);
}

#[test]
fn empty_schedule_produces_empty_report_without_error() {
    let sales = vec![sale(2024, 1, 1, 100.0), sale(2024, 1, 2, 150.0)];

    let report = analyze(&sales, &[], &AnalysisConfig::default()).unwrap();

    assert!(report.rows.is_empty());
    assert_eq!(report.mean_ratio, None);
    assert_eq!(report.anomalies().count(), 0);
}

#[test]
fn single_day_schedule_is_a_degenerate_case_not_an_error() {
    let sales = vec![sale(2024, 1, 1, 100.0)];
    let schedule = vec![ScheduleRecord::new(date(2024, 1, 1), 2)];

    let report = analyze(&sales, &schedule, &AnalysisConfig::by_date()).unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_relative_eq!(report.mean_ratio.unwrap(), 50.0, epsilon = 1e-10);
    assert_eq!(report.std_ratio, None);
    assert_eq!(report.anomalies().count(), 0);
}

/// The raw-roster path: one row per person per date collapses to per-date
/// counts that feed the pipeline directly.
#[test]
fn roster_rows_collapse_and_flow_through_the_pipeline() {
    let shifts = vec![
        date(2024, 3, 4),
        date(2024, 3, 4),
        date(2024, 3, 5),
        date(2024, 3, 4),
        date(2024, 3, 5),
    ];
    let schedule = collapse_roster(&shifts);
    assert_eq!(schedule.len(), 2);
    assert_eq!(schedule[0].staff_count, 3);
    assert_eq!(schedule[1].staff_count, 2);

    let sales = vec![
        sale(2024, 1, 1, 90.0), // Monday
        sale(2024, 1, 2, 80.0), // Tuesday
    ];

    let report = analyze(&sales, &schedule, &AnalysisConfig::by_weekday()).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_relative_eq!(report.rows[0].ratio.unwrap(), 30.0, epsilon = 1e-10); // 90 / 3
    assert_relative_eq!(report.rows[1].ratio.unwrap(), 40.0, epsilon = 1e-10); // 80 / 2
}

#[test]
fn schedule_comparison_feeds_chart_with_per_date_rows() {
    let sales = vec![
        sale(2018, 1, 1, 90.0),
        sale(2024, 1, 1, 110.0),
        sale(2024, 1, 2, 60.0),
    ];
    let schedule = vec![
        ScheduleRecord::new(date(2029, 1, 2), 3), // Tuesday, week 1
        ScheduleRecord::new(date(2029, 1, 1), 5), // Monday, week 1
    ];

    let rows = compare_schedule(&sales, &schedule).unwrap();

    // Date-sorted regardless of input order
    assert_eq!(rows[0].date, date(2029, 1, 1));
    assert_eq!(rows[0].weekday_name, "Monday");
    assert_relative_eq!(rows[0].expected_sales.unwrap(), 100.0, epsilon = 1e-10);
    assert_relative_eq!(rows[0].ratio.unwrap(), 20.0, epsilon = 1e-10);

    assert_eq!(rows[1].weekday_name, "Tuesday");
    assert_relative_eq!(rows[1].expected_sales.unwrap(), 60.0, epsilon = 1e-10);
    assert_relative_eq!(rows[1].ratio.unwrap(), 20.0, epsilon = 1e-10);
}
