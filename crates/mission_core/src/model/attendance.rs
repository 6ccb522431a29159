//! Activity attendance records.

use super::event::{ClientId, EventId};
use super::Dated;
use crate::time::{parse_local, LocalStamp};
use serde::{Deserialize, Serialize};

/// One client's attendance at an activity, optionally scored 1–10 by staff.
///
/// The score range is observed, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub client_activity_id: i64,
    pub activity_id: EventId,
    pub client_id: ClientId,
    #[serde(default, deserialize_with = "super::wire::lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "super::wire::lenient_score")]
    pub score: Option<f64>,
}

impl AttendanceRecord {
    pub fn new(client_activity_id: i64, activity_id: EventId, client_id: ClientId) -> Self {
        Self {
            client_activity_id,
            activity_id,
            client_id,
            date: None,
            score: None,
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn scored(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

impl Dated for AttendanceRecord {
    fn stamp(&self) -> Option<LocalStamp> {
        self.date.as_deref().and_then(parse_local)
    }

    fn score(&self) -> Option<f64> {
        self.score
    }
}
