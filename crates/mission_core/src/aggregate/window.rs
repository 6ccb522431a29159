//! Report windows: the date range a granularity covers around "today".

use super::Granularity;
use crate::time::{days_in_month, week_start, DateRange};
use chrono::{Datelike, Duration, NaiveDate};

/// Date range the dashboard requests from the REST API for `granularity`.
///
/// - day: today only
/// - week: Monday..Sunday of today's week
/// - month: first..last day of today's month
/// - year: January 1..December 31 of today's year
pub fn report_window(granularity: Granularity, today: NaiveDate) -> DateRange {
    match granularity {
        Granularity::Day => DateRange::single(today),
        Granularity::Week => {
            let monday = week_start(today);
            DateRange::new(monday, monday + Duration::days(6))
        }
        Granularity::Month => {
            let first = today.with_day(1).unwrap_or(today);
            let last_day = days_in_month(today.year(), today.month());
            let last = today.with_day(last_day).unwrap_or(today);
            DateRange::new(first, last)
        }
        Granularity::Year => {
            let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
            DateRange::new(first, last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn windows_cover_expected_spans() {
        let today = date(2024, 2, 14);
        assert_eq!(report_window(Granularity::Day, today), DateRange::single(today));
        assert_eq!(
            report_window(Granularity::Week, today),
            DateRange::new(date(2024, 2, 12), date(2024, 2, 18))
        );
        assert_eq!(
            report_window(Granularity::Month, today),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            report_window(Granularity::Year, today),
            DateRange::new(date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn sunday_belongs_to_the_preceding_monday_week() {
        let window = report_window(Granularity::Week, date(2025, 3, 16));
        assert_eq!(window.start, date(2025, 3, 10));
        assert_eq!(window.end, date(2025, 3, 16));
    }
}
