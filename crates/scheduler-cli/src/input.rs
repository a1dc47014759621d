//! Schedule file loading.
//!
//! A schedule file is JSON:
//!
//! ```json
//! {
//!   "work_centers": [{ "id": "W1", "name": "Lathe" }],
//!   "work_orders": [
//!     { "id": "wo-1", "work_center_id": "W1", "label": "Housings",
//!       "status": "in_progress", "start": "2025-03-01", "end": "2025-03-10" }
//!   ]
//! }
//! ```
//!
//! `work_centers` may be omitted to use the six default work centers. Records
//! that fail to parse, carry an empty span or overlap an earlier record on
//! the same work center are skipped with a warning, so one bad record never
//! prevents the rest from loading.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use scheduler_models::{
    WorkCenter, WorkCenterId, WorkOrder, WorkOrderDraft, WorkOrderId, WorkOrderStatus,
};
use scheduler_store::{MemoryStore, StoreError, WorkOrderStore};
use scheduler_timeline::calendar::{parse_dotted, parse_iso};
use scheduler_timeline::find_conflict;

/// Errors that prevent a schedule file from loading at all.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schedule file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    #[serde(default)]
    work_centers: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    work_orders: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WorkCenterRecord {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct WorkOrderRecord {
    #[serde(default)]
    id: Option<String>,
    work_center_id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    status: WorkOrderStatus,
    start: String,
    end: String,
}

/// A loaded schedule and how many records were dropped.
pub struct LoadedSchedule {
    pub store: MemoryStore,
    pub skipped: usize,
}

/// Parses `YYYY-MM-DD`, falling back to `MM.DD.YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    parse_iso(s).or_else(|| parse_dotted(s))
}

/// Reads and loads a schedule file.
pub fn load_schedule(path: &Path) -> Result<LoadedSchedule, InputError> {
    let data = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = parse_schedule(&data)?;
    debug!(
        path = %path.display(),
        work_orders = loaded.store.len(),
        skipped = loaded.skipped,
        "schedule loaded"
    );
    Ok(loaded)
}

/// Loads a schedule from JSON text.
pub fn parse_schedule(data: &str) -> Result<LoadedSchedule, InputError> {
    let file: ScheduleFile = serde_json::from_str(data)?;
    let mut skipped = 0;

    let store = match file.work_centers {
        None => MemoryStore::with_default_work_centers(),
        Some(records) => {
            let store = MemoryStore::new();
            for (index, value) in records.into_iter().enumerate() {
                let record: WorkCenterRecord = match serde_json::from_value(value) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(index, error = %e, "skipping malformed work center");
                        skipped += 1;
                        continue;
                    }
                };
                match store.add_work_center(WorkCenter::with_id(record.id, record.name)) {
                    Ok(()) => {}
                    Err(StoreError::DuplicateWorkCenter(id)) => {
                        warn!(index, work_center_id = %id, "skipping duplicate work center");
                        skipped += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            store
        }
    };

    for (index, value) in file.work_orders.into_iter().enumerate() {
        let record: WorkOrderRecord = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed work order");
                skipped += 1;
                continue;
            }
        };
        let (Some(start), Some(end)) = (parse_date(&record.start), parse_date(&record.end)) else {
            warn!(index, start = %record.start, end = %record.end, "skipping work order with unparseable dates");
            skipped += 1;
            continue;
        };
        if start >= end {
            warn!(index, %start, %end, "skipping work order with empty span");
            skipped += 1;
            continue;
        }

        // A repeated ID replaces the earlier record, so it is not its own conflict.
        let id = record.id.map(WorkOrderId::from_string);
        let work_center_id = WorkCenterId::from_string(record.work_center_id);
        if let Some(conflict) = find_conflict(&store, &work_center_id, start, end, id.as_ref()) {
            warn!(
                index,
                work_center_id = %work_center_id,
                conflicting = %conflict.id,
                %start,
                %end,
                "skipping work order that overlaps an earlier one"
            );
            skipped += 1;
            continue;
        }

        let draft = WorkOrderDraft::new(work_center_id, record.label, start, end)
            .with_status(record.status);
        match id {
            Some(id) => {
                let mut order = WorkOrder::from_draft(draft);
                order.id = id;
                store.insert_work_order(order)?;
            }
            None => {
                store.create_work_order(draft)?;
            }
        }
    }

    Ok(LoadedSchedule { store, skipped })
}
