//! Domain model for shelter records consumed by the dashboard core.
//!
//! # Responsibility
//! - Mirror the REST API record shapes (field names match the JSON wire).
//! - Expose a single `Dated` seam through which aggregation reads any record.
//!
//! # Invariants
//! - The core never mutates records; every model is a read-only snapshot.
//! - Every date string is interpreted through `time::parse_local`.

pub mod attendance;
pub mod client;
pub mod event;
pub mod visit;
mod wire;

use crate::time::LocalStamp;

pub use attendance::AttendanceRecord;
pub use client::{Client, Gender};
pub use event::{ActivityEvent, ClientId, EventId, EventValidationError};
pub use visit::{ParseServiceError, Service, ServiceVisit};

/// Any record that can be placed on a time axis.
///
/// Records whose `stamp()` is `None` are skipped by aggregation rather than
/// reported as errors.
pub trait Dated {
    /// Local civil stamp of the record, if it has a parseable one.
    fn stamp(&self) -> Option<LocalStamp>;

    /// Numeric score carried by the record, if any.
    fn score(&self) -> Option<f64> {
        None
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn stamp(&self) -> Option<LocalStamp> {
        (**self).stamp()
    }

    fn score(&self) -> Option<f64> {
        (**self).score()
    }
}

impl Dated for LocalStamp {
    fn stamp(&self) -> Option<LocalStamp> {
        Some(*self)
    }
}
