//! Activity event model.
//!
//! # Responsibility
//! - Define the scheduled group activity shown on the weekly calendar.
//! - Resolve its civil date and optional start/end stamps.
//!
//! # Invariants
//! - `date` is a civil date string; it is never shifted by a timezone.
//! - `end_time` should not precede `start_time`. Layout tolerates violations;
//!   only repository writes enforce it through `validate()`.

use super::Dated;
use crate::time::{parse_local, LocalStamp};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier assigned to an activity by the REST API.
pub type EventId = i64;
/// Identifier assigned to a client by the REST API.
pub type ClientId = i64;

/// One scheduled activity instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub activity_id: EventId,
    /// Owning client, when the activity was booked for one person.
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub activity_name: String,
    /// Civil date (`YYYY-MM-DD`); a datetime string is accepted as well.
    pub date: String,
    #[serde(default, deserialize_with = "super::wire::lenient_text")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "super::wire::lenient_text")]
    pub end_time: Option<String>,
    /// Opaque palette token chosen by staff.
    #[serde(default)]
    pub color: Option<String>,
    /// Head count recorded against the activity.
    #[serde(default)]
    pub attendance: u32,
}

impl ActivityEvent {
    /// Creates an untimed event on `date`.
    pub fn new(activity_id: EventId, activity_name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            activity_id,
            client_id: None,
            activity_name: activity_name.into(),
            date: date.into(),
            start_time: None,
            end_time: None,
            color: None,
            attendance: 0,
        }
    }

    /// Returns a copy with explicit start/end strings.
    pub fn with_times(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_time = start.map(str::to_string);
        self.end_time = end.map(str::to_string);
        self
    }

    /// Calendar date of the event, `None` when `date` is unparseable.
    pub fn event_date(&self) -> Option<chrono::NaiveDate> {
        parse_local(&self.date).map(|stamp| stamp.date)
    }

    /// Parsed start stamp, `None` when absent or malformed.
    pub fn start_stamp(&self) -> Option<LocalStamp> {
        self.start_time.as_deref().and_then(parse_local)
    }

    /// Parsed end stamp, `None` when absent or malformed.
    pub fn end_stamp(&self) -> Option<LocalStamp> {
        self.end_time.as_deref().and_then(parse_local)
    }

    /// Validates write-side invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `activity_name` is blank.
    /// - `InvalidDate` when `date` does not parse.
    /// - `InvalidTimestamp` when a present start/end string does not parse.
    /// - `EndBeforeStart` when both stamps exist and end precedes start.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.activity_name.trim().is_empty() {
            return Err(EventValidationError::EmptyName);
        }
        if self.event_date().is_none() {
            return Err(EventValidationError::InvalidDate(self.date.clone()));
        }

        let start = parse_present("start_time", self.start_time.as_deref())?;
        let end = parse_present("end_time", self.end_time.as_deref())?;
        if let (Some(start), Some(end)) = (start, end) {
            if end.naive() < start.naive() {
                return Err(EventValidationError::EndBeforeStart {
                    start: start.naive().to_string(),
                    end: end.naive().to_string(),
                });
            }
        }

        Ok(())
    }
}

impl Dated for ActivityEvent {
    /// Event date combined with the start time-of-day when one is known.
    fn stamp(&self) -> Option<LocalStamp> {
        match (self.event_date(), self.start_stamp()) {
            (Some(date), Some(start)) => Some(LocalStamp {
                date,
                time: start.time,
            }),
            (Some(date), None) => Some(LocalStamp::date_only(date)),
            (None, start) => start,
        }
    }
}

fn parse_present(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<LocalStamp>, EventValidationError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_local(value)
            .map(Some)
            .ok_or_else(|| EventValidationError::InvalidTimestamp {
                field,
                value: value.to_string(),
            }),
    }
}

/// Write-side validation failures for `ActivityEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyName,
    InvalidDate(String),
    InvalidTimestamp { field: &'static str, value: String },
    EndBeforeStart { start: String, end: String },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "activity_name cannot be empty"),
            Self::InvalidDate(value) => write!(f, "invalid activity date `{value}`"),
            Self::InvalidTimestamp { field, value } => {
                write!(f, "invalid {field} `{value}`")
            }
            Self::EndBeforeStart { start, end } => {
                write!(f, "end_time ({end}) must be >= start_time ({start})")
            }
        }
    }
}

impl Error for EventValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_untimed_event() {
        let event = ActivityEvent::new(1, "Art Group", "2025-03-10");
        assert_eq!(event.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_reversed_window() {
        let event = ActivityEvent::new(1, "Art Group", "2025-03-10")
            .with_times(Some("2025-03-10T11:00:00"), Some("2025-03-10T10:00:00"));
        assert!(matches!(
            event.validate(),
            Err(EventValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn validate_rejects_malformed_timestamp() {
        let event =
            ActivityEvent::new(1, "Art Group", "2025-03-10").with_times(Some("noon"), None);
        assert_eq!(
            event.validate(),
            Err(EventValidationError::InvalidTimestamp {
                field: "start_time",
                value: "noon".to_string(),
            })
        );
    }

    #[test]
    fn blank_time_strings_deserialize_as_absent() {
        let event: ActivityEvent = serde_json::from_value(serde_json::json!({
            "activity_id": 7,
            "activity_name": "Yoga",
            "date": "2025-03-11",
            "start_time": "",
            "end_time": null
        }))
        .unwrap();
        assert_eq!(event.start_time, None);
        assert_eq!(event.end_time, None);
        assert_eq!(event.attendance, 0);
    }
}
