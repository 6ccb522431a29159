use chrono::{NaiveDate, NaiveDateTime};
use mission_core::{
    aggregate, report_window, AttendanceRecord, Bucket, DateRange, Granularity, Metric,
};
use pretty_assertions::assert_eq;

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn record(id: i64, date: &str) -> AttendanceRecord {
    AttendanceRecord::new(id, 1, id).on(date)
}

fn values(buckets: &[Bucket]) -> Vec<f64> {
    buckets.iter().map(|bucket| bucket.value).collect()
}

#[test]
fn every_granularity_returns_fixed_buckets_for_empty_input() {
    let now = at(2024, 2, 14, 11);
    let expected = [
        (Granularity::Day, 10),
        (Granularity::Week, 7),
        (Granularity::Month, 29),
        (Granularity::Year, 12),
    ];
    for (granularity, len) in expected {
        let buckets = aggregate::<AttendanceRecord>(&[], granularity, Metric::Count, now);
        assert_eq!(buckets.len(), len, "{granularity}");
        assert!(buckets.iter().all(|bucket| bucket.value == 0.0));
    }
}

#[test]
fn week_counts_land_on_monday_and_wednesday() {
    let mut records: Vec<AttendanceRecord> = (0..3).map(|id| record(id, "2025-03-10")).collect();
    records.extend((3..10).map(|id| record(id, "2025-03-12T15:00:00")));

    let buckets = aggregate(&records, Granularity::Week, Metric::Count, at(2025, 3, 12, 16));

    let expected: Vec<Bucket> = [
        ("Mon", 3.0),
        ("Tue", 0.0),
        ("Wed", 7.0),
        ("Thu", 0.0),
        ("Fri", 0.0),
        ("Sat", 0.0),
        ("Sun", 0.0),
    ]
    .into_iter()
    .map(|(label, value)| Bucket {
        label: label.to_string(),
        value,
    })
    .collect();
    assert_eq!(buckets, expected);
}

#[test]
fn mean_of_four_six_eight_is_exactly_six() {
    let records = vec![
        record(1, "2025-03-10T10:00:00").scored(4.0),
        record(2, "2025-03-10T10:20:00").scored(6.0),
        record(3, "2025-03-10T10:40:00").scored(8.0),
        record(4, "2025-03-10T10:50:00"),
    ];
    let buckets = aggregate(&records, Granularity::Day, Metric::MeanScore, at(2025, 3, 10, 12));

    assert_eq!(buckets[1].label, "10am");
    assert_eq!(buckets[1].value, 6.0);
    assert_eq!(buckets[2].value, 0.0);
}

#[test]
fn date_only_record_buckets_on_its_civil_day() {
    let records = vec![record(1, "2025-03-10")];

    let month = aggregate(&records, Granularity::Month, Metric::Count, at(2025, 3, 31, 23));
    assert_eq!(month[9].label, "10");
    assert_eq!(month[9].value, 1.0);
    assert_eq!(values(&month).iter().sum::<f64>(), 1.0);

    let week = aggregate(&records, Granularity::Week, Metric::Count, at(2025, 3, 10, 0));
    assert_eq!(week[0].value, 1.0);
}

#[test]
fn month_buckets_ignore_records_from_other_months_and_years() {
    let records = vec![record(1, "2025-01-28"), record(2, "2024-07-05"), record(3, "2024-02-10")];
    let buckets = aggregate(&records, Granularity::Month, Metric::Count, at(2025, 2, 10, 12));
    assert_eq!(buckets.len(), 28);
    assert_eq!(values(&buckets).iter().sum::<f64>(), 0.0);
}

#[test]
fn year_buckets_by_month_and_skips_unparseable_dates() {
    let records = vec![
        record(1, "2025-01-05"),
        record(2, "2025-12-31T18:00:00"),
        record(3, "31/12/2025"),
        AttendanceRecord::new(4, 1, 4),
    ];
    let buckets = aggregate(&records, Granularity::Year, Metric::Count, at(2025, 6, 1, 9));

    assert_eq!(buckets[0].label, "Jan");
    assert_eq!(buckets[0].value, 1.0);
    assert_eq!(buckets[11].label, "Dec");
    assert_eq!(buckets[11].value, 1.0);
    assert_eq!(values(&buckets).iter().sum::<f64>(), 2.0);
}

#[test]
fn aggregation_is_idempotent() {
    let records = vec![
        record(1, "2025-03-10T09:00:00").scored(3.0),
        record(2, "2025-03-11"),
        record(3, "2025-03-14T17:59:00").scored(9.0),
    ];
    let now = at(2025, 3, 12, 13);
    for granularity in Granularity::ALL {
        for metric in [Metric::Count, Metric::MeanScore] {
            assert_eq!(
                aggregate(&records, granularity, metric, now),
                aggregate(&records, granularity, metric, now)
            );
        }
    }
}

#[test]
fn report_window_matches_bucket_span() {
    let today = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    let window = report_window(Granularity::Week, today);
    assert_eq!(
        window,
        DateRange::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 16).unwrap()
        )
    );
    assert_eq!(window.day_count(), 7);
}
