//! Subcommand handlers.

use crate::cli::{Cli, ClockArgs, Commands, ImportArgs};
use anyhow::Context;
use chrono::Local;
use log::info;
use mission_core::db::open_db;
use mission_core::{
    default_log_level, init_logging, ActivityEvent, AttendanceRecord, Client, DashboardConfig,
    DashboardService, RecordRepository, ServiceVisit, SqliteRecordRepository,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

pub fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("failed to load config `{}`", path.display()))?,
        None => DashboardConfig::default(),
    };
    start_logging(&cli, &config)?;

    let mut conn = open_db(&cli.db)
        .with_context(|| format!("failed to open record store `{}`", cli.db.display()))?;

    if let Commands::Import(args) = &cli.command {
        let tx = conn.transaction()?;
        let summary = import(&SqliteRecordRepository::new(&tx), args)?;
        tx.commit()?;
        info!(
            "event=import module=cli status=ok clients={} events={} attendance={} visits={}",
            summary.clients, summary.events, summary.attendance, summary.visits
        );
        return print(&summary, cli.compact);
    }

    let service = DashboardService::with_config(SqliteRecordRepository::new(&conn), config);
    let now = Local::now().naive_local();
    let at = |clock: &ClockArgs| clock.now.unwrap_or(now);

    match &cli.command {
        Commands::Import(_) => Ok(()),
        Commands::Layout { week } => {
            print(&service.week_layout(week.unwrap_or(now.date()))?, cli.compact)
        }
        Commands::Chart {
            granularity,
            metric,
            clock,
        } => print(
            &service.activity_chart(*granularity, (*metric).into(), at(clock))?,
            cli.compact,
        ),
        Commands::Stats { granularity, clock } => print(
            &service.service_statistics(*granularity, at(clock))?,
            cli.compact,
        ),
        Commands::Heatmap { service: station, clock } => {
            print(&service.service_heatmap(*station, at(clock))?, cli.compact)
        }
        Commands::Beds { today } => {
            print(&service.bed_board(today.unwrap_or(now.date()))?, cli.compact)
        }
        Commands::Demographics => print(&service.demographics()?, cli.compact),
    }
}

fn start_logging(cli: &Cli, config: &DashboardConfig) -> anyhow::Result<()> {
    let Some(dir) = cli.log_dir.as_deref().or(config.log_dir.as_deref()) else {
        return Ok(());
    };
    let default_level = default_log_level();
    let level = cli
        .log_level
        .as_deref()
        .or(config.log_level.as_deref())
        .unwrap_or(default_level.as_str());
    init_logging(level, dir).context("failed to start logging")
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub clients: usize,
    pub events: usize,
    pub attendance: usize,
    pub visits: usize,
}

/// Upserts every record found in the given export files.
pub fn import<R: RecordRepository>(repo: &R, args: &ImportArgs) -> anyhow::Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    if let Some(path) = &args.clients {
        let clients: Vec<Client> = read_json(path)?;
        for client in &clients {
            repo.upsert_client(client)?;
        }
        summary.clients = clients.len();
    }
    if let Some(path) = &args.events {
        let events: Vec<ActivityEvent> = read_json(path)?;
        for event in &events {
            repo.upsert_event(event)
                .with_context(|| format!("activity {} rejected", event.activity_id))?;
        }
        summary.events = events.len();
    }
    if let Some(path) = &args.attendance {
        let records: Vec<AttendanceRecord> = read_json(path)?;
        for record in &records {
            repo.upsert_attendance(record)?;
        }
        summary.attendance = records.len();
    }
    if let Some(path) = &args.visits {
        let visits: Vec<ServiceVisit> = read_json(path)?;
        for visit in &visits {
            repo.upsert_visit(visit)?;
        }
        summary.visits = visits.len();
    }

    Ok(summary)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("malformed JSON in `{}`", path.display()))
}

fn print<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}
