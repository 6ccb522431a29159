//! Dashboard use cases.
//!
//! # Responsibility
//! - Turn a panel request into window → repository read → pure computation.
//! - Keep CLI and other hosts unaware of SQL and bucketing rules.
//!
//! # Invariants
//! - Every call is a function of its explicit inputs and the stored records;
//!   the service never reads the clock.

pub mod dashboard_service;

pub use dashboard_service::{
    ChartPanel, DashboardService, HeatmapPanel, ServiceError, ServiceResult, ServiceStatistics,
};
