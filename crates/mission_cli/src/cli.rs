use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mission_core::{parse_local, Granularity, Metric, Service};
use std::path::PathBuf;

/// Top-level parser for the `mission` binary.
#[derive(Debug, Parser)]
#[command(name = "mission", version, about = "Shelter dashboard calendar and statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON config file (layout hours, heatmap steps, bed count, logging)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off without one
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// SQLite record store
    #[arg(long, global = true, default_value = "mission.db")]
    pub db: PathBuf,

    /// Single-line JSON instead of pretty-printed
    #[arg(long, global = true)]
    pub compact: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load JSON exports from the REST API into the record store
    Import(ImportArgs),
    /// Weekly activity calendar layout
    Layout {
        /// Any date inside the week to lay out (defaults to today)
        #[arg(long)]
        week: Option<NaiveDate>,
    },
    /// Activity attendance chart
    Chart {
        #[arg(long, short, default_value = "week")]
        granularity: Granularity,
        #[arg(long, short, value_enum, default_value_t = MetricArg::Count)]
        metric: MetricArg,
        #[command(flatten)]
        clock: ClockArgs,
    },
    /// Station usage breakdown and visit chart
    Stats {
        #[arg(long, short, default_value = "week")]
        granularity: Granularity,
        #[command(flatten)]
        clock: ClockArgs,
    },
    /// Weekday × hour heatmap of one station for the current week
    Heatmap {
        #[arg(long, short)]
        service: Service,
        #[command(flatten)]
        clock: ClockArgs,
    },
    /// Safe-sleep bed board
    Beds {
        /// Defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Client gender breakdown
    Demographics,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON array of clients
    #[arg(long)]
    pub clients: Option<PathBuf>,
    /// JSON array of activities
    #[arg(long)]
    pub events: Option<PathBuf>,
    /// JSON array of client_activity rows
    #[arg(long)]
    pub attendance: Option<PathBuf>,
    /// JSON array of station visits
    #[arg(long)]
    pub visits: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ClockArgs {
    /// Reference local time, `YYYY-MM-DD[THH:MM[:SS]]` (defaults to now)
    #[arg(long, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Count,
    Score,
}

impl From<MetricArg> for Metric {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::Count => Metric::Count,
            MetricArg::Score => Metric::MeanScore,
        }
    }
}

fn parse_now(raw: &str) -> Result<NaiveDateTime, String> {
    parse_local(raw)
        .map(|stamp| stamp.naive())
        .ok_or_else(|| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS], got `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mission",
            "chart",
            "--granularity",
            "Month",
            "--metric",
            "score",
            "--now",
            "2025-03-10T14:30",
            "--db",
            "/tmp/records.db",
        ])
        .unwrap();

        assert_eq!(cli.db, PathBuf::from("/tmp/records.db"));
        match cli.command {
            Commands::Chart {
                granularity,
                metric,
                clock,
            } => {
                assert_eq!(granularity, Granularity::Month);
                assert_eq!(Metric::from(metric), Metric::MeanScore);
                assert_eq!(clock.now.unwrap().to_string(), "2025-03-10 14:30:00");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn heatmap_accepts_station_display_names() {
        let cli = Cli::try_parse_from(["mission", "heatmap", "--service", "coat check"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Heatmap {
                service: Service::CoatCheck,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_granularity_and_bad_clock() {
        assert!(Cli::try_parse_from(["mission", "stats", "--granularity", "decade"]).is_err());
        assert!(Cli::try_parse_from(["mission", "stats", "--now", "tomorrow"]).is_err());
    }
}
