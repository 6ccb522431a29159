//! Weekly activity calendar layout.
//!
//! # Responsibility
//! - Place activity events on a Monday–Friday grid inside the visible hours.
//! - Pack overlapping events of the same day into side-by-side columns.
//!
//! # Invariants
//! - Layout never fails; unplaceable events are dropped, not reported.
//! - Saturday/Sunday events are excluded because the grid has five columns.
//! - Output is deterministic for identical input, including arrival order.
//!
//! # See also
//! - `packer` for the column assignment rule.

mod packer;
mod week;

pub use packer::{pack_columns, ColumnAssignment, Interval};
pub use week::{DayHeader, HourRow, WeekGrid};

use crate::model::{ActivityEvent, EventId};
use crate::time::weekday_index;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of weekday columns on the grid (Monday..Friday).
pub const WEEKDAY_COLUMNS: usize = 5;

/// Tunables for event placement, in hours of day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub visible_start_hour: f64,
    pub visible_end_hour: f64,
    /// Start used when an event has no parseable start time.
    pub fallback_start_hour: f64,
    /// Length used when an event has no parseable end time.
    pub default_duration_hours: f64,
    /// Shortest rendered block, even when the visible overlap is shorter.
    pub min_duration_hours: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            visible_start_hour: 8.0,
            visible_end_hour: 18.0,
            fallback_start_hour: 13.0,
            default_duration_hours: 1.0,
            min_duration_hours: 0.25,
        }
    }
}

/// Where one event sits on the grid before column packing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub date: NaiveDate,
    /// Monday = 0 .. Friday = 4.
    pub day_index: usize,
    /// Start clamped to the visible window.
    pub start_hour: f64,
    /// End clamped to the visible window, then extended to honor the
    /// minimum duration. May exceed `visible_end_hour` by up to
    /// `min_duration_hours`.
    pub end_hour: f64,
}

impl Placement {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start_hour, self.end_hour)
    }
}

/// Resolves the grid placement of one event.
///
/// Missing or malformed start falls back to `fallback_start_hour`; missing or
/// malformed end falls back to start plus `default_duration_hours`. Returns
/// `None` when the date is unparseable, falls on a weekend, or the event lies
/// entirely outside the visible window.
pub fn place_event(event: &ActivityEvent, options: &LayoutOptions) -> Option<Placement> {
    let date = event.event_date()?;
    let day_index = weekday_index(date);
    if day_index >= WEEKDAY_COLUMNS {
        return None;
    }

    let start = event
        .start_stamp()
        .and_then(|stamp| stamp.hour_fraction())
        .unwrap_or(options.fallback_start_hour);
    let end = event
        .end_stamp()
        .and_then(|stamp| stamp.hour_fraction())
        .unwrap_or(start + options.default_duration_hours);

    if end <= options.visible_start_hour || start >= options.visible_end_hour {
        return None;
    }

    let start_hour = start.max(options.visible_start_hour);
    let clamped_end = end.min(options.visible_end_hour);
    let duration = (clamped_end - start_hour).max(options.min_duration_hours);

    Some(Placement {
        date,
        day_index,
        start_hour,
        end_hour: start_hour + duration,
    })
}

/// Fully laid-out event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEvent {
    pub id: EventId,
    pub name: String,
    pub color: Option<String>,
    pub date: NaiveDate,
    pub day_index: usize,
    pub start_hour: f64,
    pub end_hour: f64,
    pub column: usize,
    pub total_columns: usize,
}

/// Result of a layout pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekLayout {
    /// Placed events in input order.
    pub placements: Vec<PlacedEvent>,
    /// Column assignment per event id.
    pub columns: BTreeMap<EventId, ColumnAssignment>,
}

impl WeekLayout {
    pub fn assignment(&self, id: EventId) -> Option<ColumnAssignment> {
        self.columns.get(&id).copied()
    }

    /// Events of one weekday column, in input order.
    pub fn day(&self, day_index: usize) -> impl Iterator<Item = &PlacedEvent> + '_ {
        self.placements
            .iter()
            .filter(move |placed| placed.day_index == day_index)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Lays out events on the weekday grid.
///
/// Events are grouped by calendar date and each group is packed
/// independently. If two events share an id, the later one owns the
/// `columns` entry; `placements` keeps both.
pub fn layout_week(events: &[ActivityEvent], options: &LayoutOptions) -> WeekLayout {
    let refs: Vec<&ActivityEvent> = events.iter().collect();
    layout_refs(&refs, options)
}

pub(crate) fn layout_refs(events: &[&ActivityEvent], options: &LayoutOptions) -> WeekLayout {
    let mut by_date: BTreeMap<NaiveDate, Vec<(usize, Placement)>> = BTreeMap::new();
    for (arrival, event) in events.iter().enumerate() {
        if let Some(placement) = place_event(event, options) {
            by_date
                .entry(placement.date)
                .or_default()
                .push((arrival, placement));
        }
    }

    let mut placed: Vec<(usize, PlacedEvent)> = Vec::with_capacity(events.len());
    for group in by_date.values() {
        let intervals: Vec<Interval> = group.iter().map(|(_, p)| p.interval()).collect();
        let slots = pack_columns(&intervals);
        for ((arrival, placement), slot) in group.iter().zip(slots) {
            let event = events[*arrival];
            placed.push((
                *arrival,
                PlacedEvent {
                    id: event.activity_id,
                    name: event.activity_name.clone(),
                    color: event.color.clone(),
                    date: placement.date,
                    day_index: placement.day_index,
                    start_hour: placement.start_hour,
                    end_hour: placement.end_hour,
                    column: slot.column,
                    total_columns: slot.total_columns,
                },
            ));
        }
    }
    placed.sort_by_key(|(arrival, _)| *arrival);

    let placements: Vec<PlacedEvent> = placed.into_iter().map(|(_, event)| event).collect();
    let columns = placements
        .iter()
        .map(|event| {
            (
                event.id,
                ColumnAssignment {
                    column: event.column,
                    total_columns: event.total_columns,
                },
            )
        })
        .collect();

    debug!(
        "event=calendar_layout module=calendar status=ok input={} placed={} days={}",
        events.len(),
        placements.len(),
        by_date.len()
    );

    WeekLayout {
        placements,
        columns,
    }
}
