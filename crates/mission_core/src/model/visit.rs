//! Service station visits.
//!
//! # Responsibility
//! - Name the fixed set of shelter service stations.
//! - Model one client visit to a station, including safe-sleep bed data.
//!
//! # Invariants
//! - `Service::ALL` order is the dashboard display order.
//! - `time_in` wins over `date` when both are parseable.

use super::event::ClientId;
use super::Dated;
use crate::time::{parse_local, LocalStamp};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Shelter service station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    CoatCheck,
    Washroom,
    Sanctuary,
    Clinic,
    SafeSleep,
    Activity,
}

impl Service {
    /// All stations in dashboard display order.
    pub const ALL: [Service; 6] = [
        Service::CoatCheck,
        Service::Washroom,
        Service::Sanctuary,
        Service::Clinic,
        Service::SafeSleep,
        Service::Activity,
    ];

    /// Human-facing label used by breakdown charts.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::CoatCheck => "Coat Check",
            Self::Washroom => "Washroom",
            Self::Sanctuary => "Sanctuary",
            Self::Clinic => "Clinic",
            Self::SafeSleep => "Safe Sleep",
            Self::Activity => "Activity",
        }
    }

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CoatCheck => "coat_check",
            Self::Washroom => "washroom",
            Self::Sanctuary => "sanctuary",
            Self::Clinic => "clinic",
            Self::SafeSleep => "safe_sleep",
            Self::Activity => "activity",
        }
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Service {
    type Err = ParseServiceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "coat_check" | "coatcheck" => Ok(Self::CoatCheck),
            "washroom" => Ok(Self::Washroom),
            "sanctuary" => Ok(Self::Sanctuary),
            "clinic" => Ok(Self::Clinic),
            "safe_sleep" | "safesleep" => Ok(Self::SafeSleep),
            "activity" => Ok(Self::Activity),
            _ => Err(ParseServiceError(value.to_string())),
        }
    }
}

/// Unknown service name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseServiceError(pub String);

impl Display for ParseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown service `{}`; expected coat_check|washroom|sanctuary|clinic|safe_sleep|activity",
            self.0
        )
    }
}

impl Error for ParseServiceError {}

/// One client visit to a service station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceVisit {
    pub visit_id: i64,
    pub client_id: ClientId,
    pub service: Service,
    #[serde(default, deserialize_with = "super::wire::lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "super::wire::lenient_text")]
    pub time_in: Option<String>,
    /// Safe-sleep bed number (1-based).
    #[serde(default)]
    pub bed_no: Option<u32>,
    #[serde(default)]
    pub is_occupied: bool,
}

impl ServiceVisit {
    pub fn new(visit_id: i64, client_id: ClientId, service: Service) -> Self {
        Self {
            visit_id,
            client_id,
            service,
            date: None,
            time_in: None,
            bed_no: None,
            is_occupied: false,
        }
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn checked_in(mut self, time_in: impl Into<String>) -> Self {
        self.time_in = Some(time_in.into());
        self
    }

    pub fn in_bed(mut self, bed_no: u32) -> Self {
        self.bed_no = Some(bed_no);
        self.is_occupied = true;
        self
    }

    /// Civil date of the visit, from `time_in` or `date`.
    pub fn visit_date(&self) -> Option<chrono::NaiveDate> {
        self.stamp().map(|stamp| stamp.date)
    }
}

impl Dated for ServiceVisit {
    fn stamp(&self) -> Option<LocalStamp> {
        self.time_in
            .as_deref()
            .and_then(parse_local)
            .or_else(|| self.date.as_deref().and_then(parse_local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_display_names_and_short_codes() {
        assert_eq!("Coat Check".parse::<Service>(), Ok(Service::CoatCheck));
        assert_eq!("coatcheck".parse::<Service>(), Ok(Service::CoatCheck));
        assert_eq!("safe-sleep".parse::<Service>(), Ok(Service::SafeSleep));
        assert_eq!("SafeSleep".parse::<Service>(), Ok(Service::SafeSleep));
        assert!("laundry".parse::<Service>().is_err());
    }

    #[test]
    fn time_in_wins_over_date() {
        let visit = ServiceVisit::new(1, 1, Service::Washroom)
            .on("2025-03-10")
            .checked_in("2025-03-10T10:15:00");
        assert_eq!(visit.stamp().and_then(|stamp| stamp.hour()), Some(10));
    }

    #[test]
    fn malformed_time_in_falls_back_to_date() {
        let visit = ServiceVisit::new(1, 1, Service::Washroom)
            .on("2025-03-10")
            .checked_in("10:15");
        let stamp = visit.stamp().unwrap();
        assert!(!stamp.has_time());
        assert_eq!(stamp.date.to_string(), "2025-03-10");
    }
}
