//! Core of the shelter dashboard: calendar layout, chart aggregation, and
//! service statistics over client, activity, and visit records.
//! Hosts (the `mission` CLI) own the clock, I/O, and presentation.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod stats;
pub mod time;

pub use aggregate::{
    aggregate, bucket_labels, report_window, score_summary, Bucket, Granularity, Metric,
    ParseGranularityError, ScoreSummary,
};
pub use calendar::{
    layout_week, pack_columns, place_event, ColumnAssignment, Interval, LayoutOptions,
    PlacedEvent, Placement, WeekGrid, WeekLayout,
};
pub use config::{ConfigError, DashboardConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::{
    ActivityEvent, AttendanceRecord, Client, ClientId, Dated, EventId, EventValidationError,
    Gender, ParseServiceError, Service, ServiceVisit,
};
pub use repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::{
    ChartPanel, DashboardService, HeatmapPanel, ServiceError, ServiceResult, ServiceStatistics,
};
pub use time::{parse_local, DateRange, LocalStamp};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
