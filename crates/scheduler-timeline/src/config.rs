//! Timeline configuration.
//!
//! Column widths, overscan, range-fitting buffer and column floors. All
//! fields have defaults; a JSON file may override any subset of them.
//!
//! # Location
//!
//! ```text
//! ~/.work-scheduler/
//! └── timeline.json
//! ```
//!
//! # Environment Variables
//!
//! - `SCHEDULER_STATE_DIR`: Override the base state directory
//! - `SCHEDULER_CONFIG`: Override the config file path

use std::fs;
use std::path::{Path, PathBuf};

use scheduler_models::Granularity;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "SCHEDULER_STATE_DIR";

/// Environment variable for custom config file.
pub const CONFIG_FILE_ENV: &str = "SCHEDULER_CONFIG";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".work-scheduler";

const CONFIG_FILE_NAME: &str = "timeline.json";

/// Get the scheduler state directory.
///
/// 1. `SCHEDULER_STATE_DIR` if set
/// 2. `~/.work-scheduler` if a home directory is available
/// 3. `.work-scheduler` in the current directory
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Get the config file path (`SCHEDULER_CONFIG` or `<state_dir>/timeline.json`).
pub fn config_file() -> PathBuf {
    std::env::var(CONFIG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir().join(CONFIG_FILE_NAME))
}

/// Layout and range-fitting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Pixel width of a Day column.
    pub day_column_width: f64,
    /// Pixel width of a Week column.
    pub week_column_width: f64,
    /// Pixel width of a Month column.
    pub month_column_width: f64,
    /// Columns materialized beyond each edge of the viewport.
    pub overscan: usize,
    /// Units of padding around the data when fitting the range.
    pub buffer_units: u32,
    /// Minimum column count at Day granularity.
    pub day_min_columns: usize,
    /// Minimum column count at Week granularity.
    pub week_min_columns: usize,
    /// Minimum column count at Month granularity.
    pub month_min_columns: usize,
    /// Pixel height of one work center row.
    pub row_height: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            day_column_width: 150.0,
            week_column_width: 200.0,
            month_column_width: 250.0,
            overscan: 5,
            buffer_units: 2,
            day_min_columns: 30,
            week_min_columns: 20,
            month_min_columns: 12,
            row_height: 48.0,
        }
    }
}

impl TimelineConfig {
    /// Pixel width of one column at `granularity`.
    pub fn column_width(&self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Day => self.day_column_width,
            Granularity::Week => self.week_column_width,
            Granularity::Month => self.month_column_width,
        }
    }

    /// Column count floor at `granularity`; also the empty-store default.
    pub fn min_columns(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Day => self.day_min_columns,
            Granularity::Week => self.week_min_columns,
            Granularity::Month => self.month_min_columns,
        }
    }

    /// Checks that every size is a positive, finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("day_column_width", self.day_column_width),
            ("week_column_width", self.week_column_width),
            ("month_column_width", self.month_column_width),
            ("row_height", self.row_height),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Loads a config file, falling back to defaults if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no timeline config, using defaults");
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        debug!(path = %path.display(), "timeline config loaded");
        Ok(config)
    }

    /// Loads the config from [`config_file`].
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(&config_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = TimelineConfig::default();
        assert_eq!(config.column_width(Granularity::Day), 150.0);
        assert_eq!(config.column_width(Granularity::Week), 200.0);
        assert_eq!(config.column_width(Granularity::Month), 250.0);
        assert_eq!(config.min_columns(Granularity::Day), 30);
        assert_eq!(config.min_columns(Granularity::Week), 20);
        assert_eq!(config.min_columns(Granularity::Month), 12);
        assert_eq!(config.overscan, 5);
        assert_eq!(config.buffer_units, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = TimelineConfig::load(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, TimelineConfig::default());
    }

    #[test]
    fn test_load_partial_override() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        fs::write(&path, r#"{ "overscan": 2, "day_column_width": 120 }"#).unwrap();

        let config = TimelineConfig::load(&path).unwrap();
        assert_eq!(config.overscan, 2);
        assert_eq!(config.day_column_width, 120.0);
        assert_eq!(config.month_column_width, 250.0);
    }

    #[test]
    fn test_load_rejects_zero_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        fs::write(&path, r#"{ "week_column_width": 0 }"#).unwrap();

        let result = TimelineConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timeline.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(TimelineConfig::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_file_name() {
        if std::env::var(CONFIG_FILE_ENV).is_err() {
            assert!(config_file().ends_with("timeline.json"));
        }
    }
}
