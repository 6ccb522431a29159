//! Panel-level queries over the record repository.

use crate::aggregate::{aggregate, report_window, score_summary, Bucket, Granularity, Metric, ScoreSummary};
use crate::calendar::{WeekGrid, WeekLayout};
use crate::config::DashboardConfig;
use crate::model::{Dated, Service};
use crate::repo::{RecordRepository, RepoError};
use crate::stats::{
    bed_board, gender_breakdown, heatmap, unique_clients, BedBoard, GenderCounts, HeatScale,
    Heatmap, ServiceBreakdown, ServiceTally,
};
use crate::time::{DateRange, LocalStamp};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "record store query failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Activity attendance chart with its headline figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub granularity: Granularity,
    pub metric: Metric,
    pub window: DateRange,
    pub buckets: Vec<Bucket>,
    /// Attendance rows inside the window.
    pub total: usize,
    pub summary: ScoreSummary,
}

/// Station usage for one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStatistics {
    pub granularity: Granularity,
    pub window: DateRange,
    pub breakdown: ServiceBreakdown,
    pub unique_clients: usize,
    /// Station visits plus scheduled activities per bucket.
    pub chart: Vec<Bucket>,
}

/// One station's weekday × hour heatmap for a week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPanel {
    pub service: Service,
    pub window: DateRange,
    pub heatmap: Heatmap,
    pub scale: HeatScale,
    pub legend: Vec<String>,
}

pub struct DashboardService<R: RecordRepository> {
    repo: R,
    config: DashboardConfig,
}

impl<R: RecordRepository> DashboardService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, DashboardConfig::default())
    }

    pub fn with_config(repo: R, config: DashboardConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Attendance chart for the window of `granularity` around `now`.
    pub fn activity_chart(
        &self,
        granularity: Granularity,
        metric: Metric,
        now: NaiveDateTime,
    ) -> ServiceResult<ChartPanel> {
        let window = report_window(granularity, now.date());
        let records = self.repo.list_attendance(window)?;

        let panel = ChartPanel {
            granularity,
            metric,
            window,
            buckets: aggregate(&records, granularity, metric, now),
            total: records.len(),
            summary: score_summary(&records),
        };
        debug!(
            "event=activity_chart module=service status=ok granularity={} records={}",
            granularity, panel.total
        );
        Ok(panel)
    }

    /// Station breakdown, distinct clients, and a combined visit chart.
    ///
    /// Scheduled activities count toward the `Activity` station alongside
    /// any visits recorded against it.
    pub fn service_statistics(
        &self,
        granularity: Granularity,
        now: NaiveDateTime,
    ) -> ServiceResult<ServiceStatistics> {
        let window = report_window(granularity, now.date());
        let visits = self.repo.list_visits(None, window)?;
        let events = self.repo.list_events(window)?;

        let mut tally = ServiceTally::default();
        for visit in &visits {
            tally.record(visit.service);
        }
        tally.add(Service::Activity, events.len());

        let stamps: Vec<LocalStamp> = visits
            .iter()
            .filter_map(Dated::stamp)
            .chain(events.iter().filter_map(Dated::stamp))
            .collect();

        debug!(
            "event=service_statistics module=service status=ok granularity={} visits={} activities={}",
            granularity,
            visits.len(),
            events.len()
        );
        Ok(ServiceStatistics {
            granularity,
            window,
            breakdown: tally.finish(),
            unique_clients: unique_clients(&visits),
            chart: aggregate(&stamps, granularity, Metric::Count, now),
        })
    }

    /// Heatmap of `service` visits during the week containing `now`.
    pub fn service_heatmap(&self, service: Service, now: NaiveDateTime) -> ServiceResult<HeatmapPanel> {
        let window = report_window(Granularity::Week, now.date());
        let visits = self.repo.list_visits(Some(service), window)?;
        let heatmap = heatmap(&visits);
        let scale = heatmap.scale(self.config.heatmap_steps);

        debug!(
            "event=service_heatmap module=service status=ok service={} visits={} max={}",
            service.as_str(),
            visits.len(),
            scale.max
        );
        Ok(HeatmapPanel {
            service,
            window,
            legend: scale.legend(),
            heatmap,
            scale,
        })
    }

    /// Calendar layout for the week containing `week_start`.
    pub fn week_layout(&self, week_start: NaiveDate) -> ServiceResult<WeekLayout> {
        let grid = WeekGrid::containing(week_start);
        let window = DateRange::new(grid.monday(), grid.monday() + Duration::days(6));
        let events = self.repo.list_events(window)?;
        Ok(grid.layout(&events, &self.config.calendar))
    }

    /// Safe-sleep bed board for `today`.
    pub fn bed_board(&self, today: NaiveDate) -> ServiceResult<BedBoard> {
        let visits = self
            .repo
            .list_visits(Some(Service::SafeSleep), DateRange::single(today))?;
        Ok(bed_board(&visits, self.config.bed_count))
    }

    /// Gender breakdown over all registered clients.
    pub fn demographics(&self) -> ServiceResult<GenderCounts> {
        let clients = self.repo.list_clients()?;
        Ok(gender_breakdown(&clients))
    }
}
