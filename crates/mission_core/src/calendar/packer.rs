//! Greedy column packing for overlapping intervals on one day.
//!
//! # Invariants
//! - Two intervals sharing a column never overlap as half-open `[start, end)`.
//! - Ties on start keep arrival order (stable sort).
//! - The same input slice always yields the same assignment.

use serde::{Deserialize, Serialize};

/// Half-open span in hours of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Lane assigned to one event and the lane count of its day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnAssignment {
    pub column: usize,
    pub total_columns: usize,
}

/// Assigns each interval the leftmost free column.
///
/// Intervals are visited by ascending start; a column is free when its last
/// end is `<=` the visited start, so back-to-back intervals share a column.
/// The result is index-aligned with `intervals` and every entry carries the
/// final column count. The count is minimal for interval graphs but depends
/// on arrival order for equal starts.
pub fn pack_columns(intervals: &[Interval]) -> Vec<ColumnAssignment> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by(|&a, &b| intervals[a].start.total_cmp(&intervals[b].start));

    let mut column_ends: Vec<f64> = Vec::new();
    let mut columns = vec![0usize; intervals.len()];
    for idx in order {
        let interval = intervals[idx];
        match column_ends.iter().position(|&end| end <= interval.start) {
            Some(column) => {
                column_ends[column] = interval.end;
                columns[idx] = column;
            }
            None => {
                column_ends.push(interval.end);
                columns[idx] = column_ends.len() - 1;
            }
        }
    }

    let total_columns = column_ends.len();
    columns
        .into_iter()
        .map(|column| ColumnAssignment {
            column,
            total_columns,
        })
        .collect()
}
