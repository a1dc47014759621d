//! Error types for timeline operations.

use std::path::PathBuf;

use chrono::NaiveDate;
use scheduler_models::{WorkCenterId, WorkOrderId};
use scheduler_store::StoreError;
use thiserror::Error;

/// Reasons a create or update of a work order is rejected.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The span is empty or reversed (`start >= end`).
    #[error("invalid interval: start {start} must be before end {end}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    /// The span intersects another work order on the same work center.
    #[error("work order overlaps {conflicting} on work center {work_center_name}")]
    Overlap {
        work_center_id: WorkCenterId,
        work_center_name: String,
        conflicting: WorkOrderId,
    },

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for timeline mutations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors loading a [`crate::TimelineConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for the config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}
