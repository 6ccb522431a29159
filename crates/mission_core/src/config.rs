//! Dashboard configuration file.
//!
//! # Responsibility
//! - Load tunables for layout, statistics, and logging from JSON.
//!
//! # Invariants
//! - Every field is optional in the file; missing fields take defaults.
//! - A config returned by `load`/`from_json_str` has passed `validate()`.

use crate::calendar::LayoutOptions;
use crate::logging::LogLevel;
use crate::stats::{DEFAULT_BED_COUNT, DEFAULT_HEAT_STEPS};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub calendar: LayoutOptions,
    /// Number of color bands on service heatmaps.
    pub heatmap_steps: usize,
    /// Safe-sleep beds shown on the bed board.
    pub bed_count: u32,
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            calendar: LayoutOptions::default(),
            heatmap_steps: DEFAULT_HEAT_STEPS,
            bed_count: DEFAULT_BED_COUNT,
            log_level: None,
            log_dir: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cal = &self.calendar;
        let in_day = |hour: f64| (0.0..=24.0).contains(&hour);

        if !in_day(cal.visible_start_hour) || !in_day(cal.visible_end_hour) {
            return Err(ConfigError::invalid("calendar visible hours must be within 0..=24"));
        }
        if cal.visible_start_hour >= cal.visible_end_hour {
            return Err(ConfigError::invalid(
                "calendar.visible_start_hour must be before calendar.visible_end_hour",
            ));
        }
        if !in_day(cal.fallback_start_hour) {
            return Err(ConfigError::invalid(
                "calendar.fallback_start_hour must be within 0..=24",
            ));
        }
        if !(cal.default_duration_hours > 0.0) {
            return Err(ConfigError::invalid(
                "calendar.default_duration_hours must be positive",
            ));
        }
        if !(cal.min_duration_hours >= 0.0) {
            return Err(ConfigError::invalid(
                "calendar.min_duration_hours cannot be negative",
            ));
        }
        if self.heatmap_steps == 0 {
            return Err(ConfigError::invalid("heatmap_steps must be at least 1"));
        }
        if self.bed_count == 0 {
            return Err(ConfigError::invalid("bed_count must be at least 1"));
        }
        if let Some(level) = self.log_level.as_deref() {
            level
                .parse::<LogLevel>()
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl ConfigError {
    fn invalid(message: &str) -> Self {
        Self::Invalid(message.to_string())
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}
