//! Station usage breakdown.

use crate::model::{ClientId, Service, ServiceVisit};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One station's share of total usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceShare {
    pub service: Service,
    pub label: &'static str,
    pub count: usize,
    /// Percentage of all entries, `0` when there are none.
    pub pct_of_total: f64,
    /// Percentage of the busiest station, `0` when there are none.
    pub pct_of_max: f64,
}

/// Entry counts for every station in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceBreakdown {
    pub shares: Vec<ServiceShare>,
    pub total: usize,
}

impl ServiceBreakdown {
    pub fn count(&self, service: Service) -> usize {
        self.shares
            .iter()
            .find(|share| share.service == service)
            .map_or(0, |share| share.count)
    }
}

/// Accumulates station entries before computing shares.
#[derive(Debug, Clone, Default)]
pub struct ServiceTally {
    counts: BTreeMap<Service, usize>,
}

impl ServiceTally {
    pub fn record(&mut self, service: Service) -> &mut Self {
        self.add(service, 1)
    }

    pub fn add(&mut self, service: Service, entries: usize) -> &mut Self {
        *self.counts.entry(service).or_insert(0) += entries;
        self
    }

    pub fn finish(&self) -> ServiceBreakdown {
        let count_of = |service: Service| self.counts.get(&service).copied().unwrap_or(0);
        let total: usize = Service::ALL.iter().map(|service| count_of(*service)).sum();
        let max = Service::ALL
            .iter()
            .map(|service| count_of(*service))
            .max()
            .unwrap_or(0);

        let shares = Service::ALL
            .iter()
            .map(|&service| {
                let count = count_of(service);
                ServiceShare {
                    service,
                    label: service.display_name(),
                    count,
                    pct_of_total: percentage(count, total),
                    pct_of_max: percentage(count, max),
                }
            })
            .collect();

        ServiceBreakdown { shares, total }
    }
}

/// Counts visits per station (entries, not distinct clients).
pub fn service_breakdown(visits: &[ServiceVisit]) -> ServiceBreakdown {
    let mut tally = ServiceTally::default();
    for visit in visits {
        tally.record(visit.service);
    }
    tally.finish()
}

/// Number of distinct clients across all visits.
pub fn unique_clients(visits: &[ServiceVisit]) -> usize {
    visits
        .iter()
        .map(|visit| visit.client_id)
        .collect::<BTreeSet<ClientId>>()
        .len()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_breakdown_lists_every_station_at_zero() {
        let breakdown = service_breakdown(&[]);
        assert_eq!(breakdown.total, 0);
        assert_eq!(breakdown.shares.len(), Service::ALL.len());
        assert!(breakdown
            .shares
            .iter()
            .all(|share| share.pct_of_total == 0.0 && share.pct_of_max == 0.0));
    }

    #[test]
    fn shares_are_relative_to_total_and_busiest_station() {
        let visits = vec![
            ServiceVisit::new(1, 10, Service::Washroom),
            ServiceVisit::new(2, 11, Service::Washroom),
            ServiceVisit::new(3, 10, Service::Washroom),
            ServiceVisit::new(4, 12, Service::Clinic),
        ];
        let breakdown = service_breakdown(&visits);

        assert_eq!(breakdown.total, 4);
        assert_eq!(breakdown.count(Service::Washroom), 3);
        let clinic = &breakdown.shares[3];
        assert_eq!(clinic.label, "Clinic");
        assert_eq!(clinic.pct_of_total, 25.0);
        assert!((clinic.pct_of_max - 33.333).abs() < 1e-3);
        assert_eq!(unique_clients(&visits), 3);
    }

    #[test]
    fn tally_accepts_bulk_entries() {
        let mut tally = ServiceTally::default();
        tally.add(Service::Activity, 4).record(Service::CoatCheck);
        let breakdown = tally.finish();
        assert_eq!(breakdown.total, 5);
        assert_eq!(breakdown.shares[5].pct_of_max, 100.0);
    }
}
