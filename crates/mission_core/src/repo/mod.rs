//! Record store access.
//!
//! # Responsibility
//! - Define the read/write contract the dashboard service depends on.
//! - Keep SQL inside the SQLite implementation.
//!
//! # Invariants
//! - Event writes call `ActivityEvent::validate()` before touching SQL.
//! - Range reads are inclusive on both ends and compare civil dates only.

pub mod record_repo;

pub use record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
