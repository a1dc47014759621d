//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use scheduler_models::{Granularity, WorkOrderStatus};
use scheduler_timeline::config::CONFIG_FILE_ENV;
use scheduler_timeline::{ConfigError, TimelineConfig};

use crate::input::parse_date;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.3.0 (abc1234, 2026-01-29)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Scheduler - work order timeline tools
#[derive(Parser, Debug)]
#[command(name = "scheduler")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the timeline config file
    #[arg(short, long, env = CONFIG_FILE_ENV, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ScheduleArgs {
    /// Schedule file (JSON with work_centers and work_orders)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Timescale of the columns
    #[arg(short, long, value_enum, default_value = "month")]
    pub granularity: GranularityArg,

    /// Date treated as today, YYYY-MM-DD (default: local date)
    #[arg(short, long, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,
}

/// Viewport arguments for the rendering subcommands.
#[derive(Args, Debug, Clone)]
pub struct ViewportArgs {
    /// Horizontal scroll offset in pixels (default: scrolled to today)
    #[arg(long)]
    pub scroll: Option<f64>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1200.0)]
    pub viewport: f64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the column window to the schedule
    Fit {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List the columns materialized for a viewport
    Columns {
        #[command(flatten)]
        schedule: ScheduleArgs,

        #[command(flatten)]
        viewport: ViewportArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Print bar geometry for each work order
    Layout {
        #[command(flatten)]
        schedule: ScheduleArgs,

        #[command(flatten)]
        viewport: ViewportArgs,

        /// Include bars outside the materialized columns
        #[arg(short, long)]
        all: bool,

        /// Only bars on this work center
        #[arg(long)]
        row: Option<String>,

        /// Only bars with this status (open, in_progress, complete, blocked)
        #[arg(long, value_parser = parse_status_arg)]
        status: Option<WorkOrderStatus>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Check whether a new or edited work order fits on a work center
    Check {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Work center ID
        #[arg(short, long)]
        row: String,

        /// First day, YYYY-MM-DD or MM.DD.YYYY
        #[arg(long, value_parser = parse_date_arg)]
        start: NaiveDate,

        /// Day after the last day (default: one granularity unit after start)
        #[arg(long, value_parser = parse_date_arg)]
        end: Option<NaiveDate>,

        /// Work order being edited, excluded from the check
        #[arg(long)]
        exclude: Option<String>,
    },
}

/// Granularity choices on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GranularityArg {
    Day,
    Week,
    #[default]
    Month,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Day => Granularity::Day,
            GranularityArg::Week => Granularity::Week,
            GranularityArg::Month => Granularity::Month,
        }
    }
}

/// Output format for report commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Accepts `YYYY-MM-DD` or `MM.DD.YYYY`.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD or MM.DD.YYYY", s))
}

/// Accepts status names as written in schedule files.
pub fn parse_status_arg(s: &str) -> Result<WorkOrderStatus, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("invalid status '{}', expected open, in_progress, complete or blocked", s))
}

impl Cli {
    /// Loads the timeline config from `--config` or the default location.
    pub fn load_config(&self) -> Result<TimelineConfig, ConfigError> {
        match &self.config {
            Some(path) => TimelineConfig::load(path),
            None => TimelineConfig::load_default(),
        }
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
