//! Dashboard statistics beyond time-bucketed charts.
//!
//! # Responsibility
//! - Per-station usage breakdown and distinct client counts.
//! - Weekday × hour visit heatmaps with a stepped color scale.
//! - Safe-sleep bed board and occupancy.
//! - Client gender breakdown.
//!
//! # Invariants
//! - Every function is pure and total; empty input yields zeroed output.

pub mod breakdown;
pub mod demographics;
pub mod heatmap;
pub mod occupancy;

pub use breakdown::{service_breakdown, unique_clients, ServiceBreakdown, ServiceShare, ServiceTally};
pub use demographics::{gender_breakdown, GenderCounts};
pub use heatmap::{heatmap, HeatScale, Heatmap, HeatmapRow, DEFAULT_HEAT_STEPS};
pub use occupancy::{bed_board, BedBoard, BedSlot, DEFAULT_BED_COUNT};
