//! Time-bucketed aggregation for dashboard charts.
//!
//! # Responsibility
//! - Turn flat record lists into ordered `(label, value)` chart buckets.
//! - Compute headline score figures for the activity score panel.
//!
//! # Invariants
//! - Bucket count and order depend only on granularity and `now`, never on
//!   the input: day = 10, week = 7, month = days in month, year = 12.
//! - Records without a parseable date are skipped, never reported.
//! - Bucket keys come from the record's civil date/time. Month buckets only
//!   accept records from `now`'s month; other granularities do no window
//!   filtering (callers pass records already scoped to the window).
//! - Empty buckets report `0`.

mod window;

pub use window::report_window;

use crate::model::Dated;
use crate::time::{
    days_in_month, hour_label, weekday_index, LocalStamp, MONTH_ABBREVIATIONS,
    WEEKDAY_ABBREVIATIONS,
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use log::trace;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// First hour bucket of the day chart.
pub const DAY_FIRST_HOUR: u32 = 9;
/// Last hour bucket of the day chart (inclusive).
pub const DAY_LAST_HOUR: u32 = 18;

/// Reporting resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ParseGranularityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(ParseGranularityError(value.to_string())),
        }
    }
}

/// Unknown granularity selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGranularityError(pub String);

impl Display for ParseGranularityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported granularity `{}`; expected day|week|month|year",
            self.0
        )
    }
}

impl Error for ParseGranularityError {}

/// What a bucket value measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Number of records in the bucket.
    Count,
    /// Mean of present scores; unscored records are ignored entirely.
    MeanScore,
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub value: f64,
}

/// Headline figure of a score panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// `None` when no record carries a score.
    pub average: Option<f64>,
    pub responses: usize,
}

/// Aggregates `records` into the canonical buckets of `granularity`.
///
/// `now` anchors the month length and the hour used for date-only records
/// on the day chart (clamped into 9..=18).
pub fn aggregate<R: Dated>(
    records: &[R],
    granularity: Granularity,
    metric: Metric,
    now: NaiveDateTime,
) -> Vec<Bucket> {
    let labels = bucket_labels(granularity, now);
    let mut sums = vec![0.0_f64; labels.len()];
    let mut counts = vec![0_usize; labels.len()];
    let mut skipped = 0_usize;

    for record in records {
        let index = record
            .stamp()
            .and_then(|stamp| bucket_index(granularity, &stamp, now))
            .filter(|index| *index < labels.len());
        let Some(index) = index else {
            skipped += 1;
            continue;
        };

        match metric {
            Metric::Count => counts[index] += 1,
            Metric::MeanScore => {
                if let Some(score) = record.score() {
                    sums[index] += score;
                    counts[index] += 1;
                }
            }
        }
    }

    trace!(
        "event=aggregate module=aggregate granularity={} input={} skipped={}",
        granularity,
        records.len(),
        skipped
    );

    labels
        .into_iter()
        .enumerate()
        .map(|(idx, label)| {
            let value = match metric {
                Metric::Count => counts[idx] as f64,
                Metric::MeanScore if counts[idx] > 0 => sums[idx] / counts[idx] as f64,
                Metric::MeanScore => 0.0,
            };
            Bucket { label, value }
        })
        .collect()
}

/// Overall mean score and number of scored records.
pub fn score_summary<R: Dated>(records: &[R]) -> ScoreSummary {
    let (total, responses) = records
        .iter()
        .filter_map(Dated::score)
        .fold((0.0_f64, 0_usize), |(total, count), score| {
            (total + score, count + 1)
        });

    ScoreSummary {
        average: (responses > 0).then(|| total / responses as f64),
        responses,
    }
}

/// Ordered labels for `granularity`.
pub fn bucket_labels(granularity: Granularity, now: NaiveDateTime) -> Vec<String> {
    match granularity {
        Granularity::Day => (DAY_FIRST_HOUR..=DAY_LAST_HOUR).map(hour_label).collect(),
        Granularity::Week => WEEKDAY_ABBREVIATIONS.iter().map(|d| d.to_string()).collect(),
        Granularity::Month => (1..=days_in_month(now.year(), now.month()))
            .map(|day| format!("{day:02}"))
            .collect(),
        Granularity::Year => MONTH_ABBREVIATIONS.iter().map(|m| m.to_string()).collect(),
    }
}

fn bucket_index(granularity: Granularity, stamp: &LocalStamp, now: NaiveDateTime) -> Option<usize> {
    match granularity {
        Granularity::Day => {
            let hour = stamp
                .hour()
                .unwrap_or_else(|| now.hour().clamp(DAY_FIRST_HOUR, DAY_LAST_HOUR));
            (DAY_FIRST_HOUR..=DAY_LAST_HOUR)
                .contains(&hour)
                .then(|| (hour - DAY_FIRST_HOUR) as usize)
        }
        Granularity::Week => Some(weekday_index(stamp.date)),
        Granularity::Month => (stamp.date.year() == now.year()
            && stamp.date.month() == now.month())
        .then(|| stamp.date.day0() as usize),
        Granularity::Year => Some(stamp.date.month0() as usize),
    }
}
