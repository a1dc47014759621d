//! Work order and work center types.
//!
//! A work order is a half-open `[start, end)` span of calendar days placed on
//! one work center (a timeline row).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{WorkCenterId, WorkOrderId};

/// Status of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    /// Not started yet.
    #[default]
    #[serde(alias = "Open")]
    Open,
    /// Currently being worked.
    #[serde(alias = "In Progress")]
    InProgress,
    /// Finished.
    #[serde(alias = "Complete")]
    Complete,
    /// Waiting on something outside the schedule.
    #[serde(alias = "Blocked")]
    Blocked,
}

impl WorkOrderStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "Open",
            WorkOrderStatus::InProgress => "In Progress",
            WorkOrderStatus::Complete => "Complete",
            WorkOrderStatus::Blocked => "Blocked",
        }
    }

    /// Lowercase, dash-separated slug for styling bars (`"in-progress"`).
    pub fn css_class(&self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A work center: one row of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCenter {
    /// Unique identifier.
    pub id: WorkCenterId,
    /// Display name.
    pub name: String,
}

impl WorkCenter {
    /// Creates a work center with a known ID.
    pub fn with_id(id: impl Into<WorkCenterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A scheduled work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Unique identifier.
    pub id: WorkOrderId,
    /// Row this order is placed on.
    pub work_center_id: WorkCenterId,
    /// Display label.
    pub label: String,
    /// Current status.
    #[serde(default)]
    pub status: WorkOrderStatus,
    /// First day of the order (inclusive).
    pub start: NaiveDate,
    /// Day the order ends (exclusive).
    pub end: NaiveDate,
}

impl WorkOrder {
    /// Assigns a fresh ID to a draft.
    pub fn from_draft(draft: WorkOrderDraft) -> Self {
        Self {
            id: WorkOrderId::new(),
            work_center_id: draft.work_center_id,
            label: draft.label,
            status: draft.status,
            start: draft.start,
            end: draft.end,
        }
    }

    /// Returns true if `start < end`.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Applies every field set on `patch`.
    pub fn apply(&mut self, patch: &WorkOrderPatch) {
        if let Some(ref work_center_id) = patch.work_center_id {
            self.work_center_id = work_center_id.clone();
        }
        if let Some(ref label) = patch.label {
            self.label = label.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start) = patch.start {
            self.start = start;
        }
        if let Some(end) = patch.end {
            self.end = end;
        }
    }
}

/// The fields of a work order before it has an ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderDraft {
    /// Target row.
    pub work_center_id: WorkCenterId,
    /// Display label.
    pub label: String,
    /// Initial status.
    #[serde(default)]
    pub status: WorkOrderStatus,
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (exclusive).
    pub end: NaiveDate,
}

impl WorkOrderDraft {
    /// Creates an `Open` draft.
    pub fn new(
        work_center_id: impl Into<WorkCenterId>,
        label: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            work_center_id: work_center_id.into(),
            label: label.into(),
            status: WorkOrderStatus::Open,
            start,
            end,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial update of a work order. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_center_id: Option<WorkCenterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl WorkOrderPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the order to another row.
    pub fn work_center(mut self, id: impl Into<WorkCenterId>) -> Self {
        self.work_center_id = Some(id.into());
        self
    }

    /// Renames the order.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Changes the status.
    pub fn status(mut self, status: WorkOrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Reschedules both ends of the span.
    pub fn span(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.work_center_id.is_none()
            && self.label.is_none()
            && self.status.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(start: NaiveDate, end: NaiveDate) -> WorkOrder {
        WorkOrder::from_draft(WorkOrderDraft::new("W1", "Order", start, end))
    }

    #[test]
    fn test_status_label_and_class() {
        assert_eq!(WorkOrderStatus::InProgress.label(), "In Progress");
        assert_eq!(WorkOrderStatus::InProgress.css_class(), "in-progress");
        assert_eq!(WorkOrderStatus::Blocked.css_class(), "blocked");
    }

    #[test]
    fn test_status_accepts_display_labels() {
        let parsed: WorkOrderStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(parsed, WorkOrderStatus::InProgress);
        let parsed: WorkOrderStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(parsed, WorkOrderStatus::InProgress);
    }

    #[test]
    fn test_from_draft_assigns_id() {
        let o = order(date(2025, 3, 1), date(2025, 3, 10));
        assert!(o.id.as_str().starts_with("wo-"));
        assert_eq!(o.status, WorkOrderStatus::Open);
        assert!(o.is_valid());
    }

    #[test]
    fn test_is_valid_rejects_empty_span() {
        let o = order(date(2025, 3, 1), date(2025, 3, 1));
        assert!(!o.is_valid());
    }

    #[test]
    fn test_apply_patch() {
        let mut o = order(date(2025, 3, 1), date(2025, 3, 10));
        let patch = WorkOrderPatch::new()
            .label("Renamed")
            .status(WorkOrderStatus::Complete)
            .span(date(2025, 4, 1), date(2025, 4, 2));
        o.apply(&patch);

        assert_eq!(o.label, "Renamed");
        assert_eq!(o.status, WorkOrderStatus::Complete);
        assert_eq!(o.start, date(2025, 4, 1));
        assert_eq!(o.end, date(2025, 4, 2));
        assert_eq!(o.work_center_id.as_str(), "W1");
    }

    #[test]
    fn test_empty_patch() {
        assert!(WorkOrderPatch::new().is_empty());
        assert!(!WorkOrderPatch::new().label("x").is_empty());
    }

    #[test]
    fn test_work_order_serialization() {
        let o = order(date(2025, 1, 15), date(2025, 4, 30));
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["start"], "2025-01-15");
        assert_eq!(json["end"], "2025-04-30");
        assert_eq!(json["status"], "open");
    }
}
