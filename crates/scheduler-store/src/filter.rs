//! Work order filtering for queries.

use scheduler_models::{WorkCenterId, WorkOrder, WorkOrderStatus};

/// Filter criteria for querying work orders.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderFilter {
    /// Filter by work center.
    pub work_center_id: Option<WorkCenterId>,
    /// Filter by status.
    pub status: Option<WorkOrderStatus>,
}

impl WorkOrderFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the work center filter.
    pub fn with_work_center(mut self, work_center_id: WorkCenterId) -> Self {
        self.work_center_id = Some(work_center_id);
        self
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the work order matches this filter.
    pub fn matches(&self, order: &WorkOrder) -> bool {
        if let Some(ref work_center_id) = self.work_center_id {
            if order.work_center_id != *work_center_id {
                return false;
            }
        }

        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use scheduler_models::WorkOrderDraft;

    fn make_order(center: &str, status: WorkOrderStatus) -> WorkOrder {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        WorkOrder::from_draft(WorkOrderDraft::new(center, "Order", start, end).with_status(status))
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = WorkOrderFilter::new();
        assert!(filter.matches(&make_order("W1", WorkOrderStatus::Open)));
    }

    #[test]
    fn test_filter_by_work_center() {
        let filter = WorkOrderFilter::new().with_work_center("W1".into());

        assert!(filter.matches(&make_order("W1", WorkOrderStatus::Open)));
        assert!(!filter.matches(&make_order("W2", WorkOrderStatus::Open)));
    }

    #[test]
    fn test_combined_filters() {
        let filter = WorkOrderFilter::new()
            .with_work_center("W1".into())
            .with_status(WorkOrderStatus::Blocked);

        assert!(filter.matches(&make_order("W1", WorkOrderStatus::Blocked)));
        assert!(!filter.matches(&make_order("W1", WorkOrderStatus::Open)));
        assert!(!filter.matches(&make_order("W2", WorkOrderStatus::Blocked)));
    }
}
