//! Canonical local civil date/time parsing and calendar arithmetic.
//!
//! # Responsibility
//! - Parse REST API date strings into timezone-free civil stamps.
//! - Provide week/month helpers shared by calendar layout and aggregation.
//!
//! # Invariants
//! - Date-only strings resolve to local midnight and keep `time == None`.
//! - No input is ever shifted by a timezone offset.
//! - Unrecognized shapes return `None`; there is no permissive fallback parser.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LOCAL_STAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:[T ](\d{2}):(\d{2})(?::(\d{2})(?:\.\d{1,9})?)?)?$")
        .expect("valid local stamp regex")
});

/// Three-letter weekday labels, Monday first.
pub const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
/// Full weekday names, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
/// Three-letter month labels, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Civil date with an optional wall-clock time.
///
/// `time == None` marks a date-only input, which callers treat differently
/// from an explicit midnight (see hourly chart buckets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalStamp {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl LocalStamp {
    pub fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// Hour of day, `None` for date-only stamps.
    pub fn hour(&self) -> Option<u32> {
        self.time.map(|time| time.hour())
    }

    /// Hours since midnight as a real number, e.g. `13.5` for 1:30pm.
    pub fn hour_fraction(&self) -> Option<f64> {
        self.time.map(|time| {
            f64::from(time.hour())
                + f64::from(time.minute()) / 60.0
                + f64::from(time.second()) / 3600.0
        })
    }

    /// Full naive date-time; date-only stamps resolve to midnight.
    pub fn naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}

/// Parses one REST API date string into a civil stamp.
///
/// Accepted shapes:
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DDTHH:MM` or `YYYY-MM-DD HH:MM`
/// - either of the above with `:SS` and an optional `.fraction` (discarded)
///
/// Returns `None` for anything else, including timezone suffixes and
/// out-of-range fields such as `2025-02-30` or `24:00`.
pub fn parse_local(raw: &str) -> Option<LocalStamp> {
    let caps = LOCAL_STAMP_RE.captures(raw.trim())?;
    let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let time = match field(4) {
        None => None,
        Some(hour) => Some(NaiveTime::from_hms_opt(
            hour,
            field(5)?,
            field(6).unwrap_or(0),
        )?),
    };

    Some(LocalStamp { date, time })
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Monday = 0 .. Sunday = 6.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Number of days in `month` of `year`; `0` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

/// Compact chart label for an hour of day: `9am`, `12pm`, `6pm`.
pub fn hour_label(hour: u32) -> String {
    match hour {
        0..=11 => format!("{hour}am"),
        12 => "12pm".to_string(),
        _ => format!("{}pm", hour - 12),
    }
}

/// Inclusive civil date range used for report windows and store filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered; `0` when `end` precedes `start`.
    pub fn day_count(&self) -> u32 {
        let days = (self.end - self.start).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }
}
