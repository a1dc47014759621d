//! The query and mutation surface the timeline engine consumes.

use std::sync::Arc;

use scheduler_models::{
    WorkCenter, WorkCenterId, WorkOrder, WorkOrderDraft, WorkOrderId, WorkOrderPatch,
};

use crate::error::Result;

/// CRUD and query surface of a work order store.
///
/// Reads never fail: an unreadable store reports empty collections.
/// `create_work_order` does not validate the span or check for overlap;
/// callers gate it. `update_work_order` and `delete_work_order` are no-ops
/// for unknown IDs.
pub trait WorkOrderStore {
    /// Work centers in insertion order.
    fn list_work_centers(&self) -> Vec<WorkCenter>;

    /// All work orders in insertion order.
    fn list_work_orders(&self) -> Vec<WorkOrder>;

    /// Looks up one work order.
    fn get_work_order(&self, id: &WorkOrderId) -> Option<WorkOrder>;

    /// Work orders placed on one work center, in insertion order.
    fn work_orders_for(&self, work_center_id: &WorkCenterId) -> Vec<WorkOrder>;

    /// Registers a work center.
    fn add_work_center(&self, center: WorkCenter) -> Result<()>;

    /// Stores a draft under a fresh ID.
    fn create_work_order(&self, draft: WorkOrderDraft) -> Result<WorkOrder>;

    /// Applies a partial update.
    fn update_work_order(&self, id: &WorkOrderId, patch: &WorkOrderPatch) -> Result<()>;

    /// Removes a work order.
    fn delete_work_order(&self, id: &WorkOrderId) -> Result<()>;
}

impl<T: WorkOrderStore + ?Sized> WorkOrderStore for Arc<T> {
    fn list_work_centers(&self) -> Vec<WorkCenter> {
        (**self).list_work_centers()
    }

    fn list_work_orders(&self) -> Vec<WorkOrder> {
        (**self).list_work_orders()
    }

    fn get_work_order(&self, id: &WorkOrderId) -> Option<WorkOrder> {
        (**self).get_work_order(id)
    }

    fn work_orders_for(&self, work_center_id: &WorkCenterId) -> Vec<WorkOrder> {
        (**self).work_orders_for(work_center_id)
    }

    fn add_work_center(&self, center: WorkCenter) -> Result<()> {
        (**self).add_work_center(center)
    }

    fn create_work_order(&self, draft: WorkOrderDraft) -> Result<WorkOrder> {
        (**self).create_work_order(draft)
    }

    fn update_work_order(&self, id: &WorkOrderId, patch: &WorkOrderPatch) -> Result<()> {
        (**self).update_work_order(id, patch)
    }

    fn delete_work_order(&self, id: &WorkOrderId) -> Result<()> {
        (**self).delete_work_order(id)
    }
}
