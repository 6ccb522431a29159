//! Weekday × hour visit heatmap and its stepped color scale.
//!
//! # Invariants
//! - The grid is always Monday..Friday by 9..=18; cells start at `0`.
//! - Only records with a time of day land in a cell. Weekend and
//!   out-of-hours records are skipped.
//! - `HeatScale` never divides by zero: an all-zero grid uses step `1`.

use crate::aggregate::{DAY_FIRST_HOUR, DAY_LAST_HOUR};
use crate::calendar::WEEKDAY_COLUMNS;
use crate::model::Dated;
use crate::time::{hour_label, weekday_index, WEEKDAY_NAMES};
use serde::Serialize;

/// Color steps used when none are configured.
pub const DEFAULT_HEAT_STEPS: usize = 5;

const HOUR_COLUMNS: usize = (DAY_LAST_HOUR - DAY_FIRST_HOUR + 1) as usize;

/// One weekday row of the heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapRow {
    pub day: &'static str,
    pub cells: Vec<u32>,
}

/// Visit counts per weekday and hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heatmap {
    pub hours: Vec<String>,
    pub rows: Vec<HeatmapRow>,
}

impl Heatmap {
    fn empty() -> Self {
        Self {
            hours: (DAY_FIRST_HOUR..=DAY_LAST_HOUR).map(hour_label).collect(),
            rows: WEEKDAY_NAMES[..WEEKDAY_COLUMNS]
                .iter()
                .map(|&day| HeatmapRow {
                    day,
                    cells: vec![0; HOUR_COLUMNS],
                })
                .collect(),
        }
    }

    /// Count at `day_index` (Monday = 0) and clock `hour`; `0` off the grid.
    pub fn value(&self, day_index: usize, hour: u32) -> u32 {
        if !(DAY_FIRST_HOUR..=DAY_LAST_HOUR).contains(&hour) {
            return 0;
        }
        self.rows
            .get(day_index)
            .and_then(|row| row.cells.get((hour - DAY_FIRST_HOUR) as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn max(&self) -> u32 {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.rows.iter().flat_map(|row| row.cells.iter()).sum()
    }

    /// Color scale fitted to this grid.
    pub fn scale(&self, steps: usize) -> HeatScale {
        HeatScale::new(self.max(), steps)
    }
}

/// Counts timed records into the weekday × hour grid.
pub fn heatmap<R: Dated>(records: &[R]) -> Heatmap {
    let mut map = Heatmap::empty();
    for record in records {
        let Some(stamp) = record.stamp() else {
            continue;
        };
        let Some(hour) = stamp.hour() else {
            continue;
        };
        let day = weekday_index(stamp.date);
        if day >= WEEKDAY_COLUMNS || !(DAY_FIRST_HOUR..=DAY_LAST_HOUR).contains(&hour) {
            continue;
        }
        map.rows[day].cells[(hour - DAY_FIRST_HOUR) as usize] += 1;
    }
    map
}

/// Even-width value bands mapped onto `steps` colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatScale {
    pub max: u32,
    pub steps: usize,
    pub step: u32,
}

impl HeatScale {
    /// Fits `steps` bands over `0..=max`; `steps` below one is treated as one.
    pub fn new(max: u32, steps: usize) -> Self {
        let steps = steps.max(1);
        let step = if max > 0 {
            max.div_ceil(steps as u32).max(1)
        } else {
            1
        };
        Self { max, steps, step }
    }

    /// Band index for `value`, saturating at the last band.
    pub fn bucket_for(&self, value: u32) -> usize {
        if value == 0 {
            return 0;
        }
        ((value / self.step) as usize).min(self.steps - 1)
    }

    /// Legend labels, e.g. `0 - 1`, `2 - 3`, `8+`.
    pub fn legend(&self) -> Vec<String> {
        (0..self.steps)
            .map(|idx| {
                let start = idx as u32 * self.step;
                let end = start + self.step - 1;
                if idx == 0 && self.steps > 1 {
                    format!("0 - {end}")
                } else if idx + 1 == self.steps {
                    format!("{start}+")
                } else {
                    format!("{start} - {end}")
                }
            })
            .collect()
    }
}
