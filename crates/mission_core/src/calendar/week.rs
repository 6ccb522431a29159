//! Week navigation and grid scaffolding for the activity calendar.

use super::{layout_refs, LayoutOptions, WeekLayout, WEEKDAY_COLUMNS};
use crate::model::ActivityEvent;
use crate::time::{week_start, WEEKDAY_NAMES};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Column header of the weekday grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayHeader {
    pub index: usize,
    pub name: &'static str,
    pub date: NaiveDate,
}

/// Row of the hour axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourRow {
    pub hour: u32,
    pub label: String,
}

/// One Monday-anchored calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekGrid {
    monday: NaiveDate,
}

impl WeekGrid {
    /// Week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            monday: week_start(date),
        }
    }

    pub fn monday(&self) -> NaiveDate {
        self.monday
    }

    pub fn friday(&self) -> NaiveDate {
        self.monday + Duration::days(WEEKDAY_COLUMNS as i64 - 1)
    }

    pub fn previous(&self) -> Self {
        Self {
            monday: self.monday - Duration::days(7),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            monday: self.monday + Duration::days(7),
        }
    }

    /// Monday..Friday headers.
    pub fn days(&self) -> Vec<DayHeader> {
        (0..WEEKDAY_COLUMNS)
            .map(|index| DayHeader {
                index,
                name: WEEKDAY_NAMES[index],
                date: self.monday + Duration::days(index as i64),
            })
            .collect()
    }

    /// Whether `date` falls on one of this week's grid columns.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.monday <= date && date <= self.friday()
    }

    /// Whole-hour rows from the window start to the window end, inclusive.
    pub fn hour_rows(options: &LayoutOptions) -> Vec<HourRow> {
        let first = options.visible_start_hour.floor().max(0.0) as u32;
        let last = options.visible_end_hour.floor().min(23.0) as u32;
        (first..=last)
            .map(|hour| HourRow {
                hour,
                label: hour_row_label(hour),
            })
            .collect()
    }

    /// Lays out only the events dated inside this week's grid.
    pub fn layout(&self, events: &[ActivityEvent], options: &LayoutOptions) -> WeekLayout {
        let in_week: Vec<&ActivityEvent> = events
            .iter()
            .filter(|event| event.event_date().is_some_and(|date| self.contains(date)))
            .collect();
        layout_refs(&in_week, options)
    }
}

fn hour_row_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{hour} AM"),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}
