//! MemoryStore - in-memory work order store.
//!
//! State lives behind `Arc<Mutex<T>>`: every mutation is applied while the
//! lock is held, so a reader never sees a half-applied update. Clones share
//! the same underlying collection.

use std::sync::{Arc, Mutex, MutexGuard};

use scheduler_models::{
    WorkCenter, WorkCenterId, WorkOrder, WorkOrderDraft, WorkOrderId, WorkOrderPatch,
};
use tracing::{debug, trace};

use crate::error::{Result, StoreError};
use crate::filter::WorkOrderFilter;
use crate::store::WorkOrderStore;

/// Work centers seeded by [`MemoryStore::with_default_work_centers`].
pub const DEFAULT_WORK_CENTERS: [(&str, &str); 6] = [
    ("1", "Acme Corporation"),
    ("2", "TechStart Solutions"),
    ("3", "Global Industries"),
    ("4", "Innovation Labs"),
    ("5", "Enterprise Systems"),
    ("6", "Digital Ventures"),
];

/// Internal state of the store. Both collections keep insertion order.
#[derive(Default)]
struct StoreState {
    work_centers: Vec<WorkCenter>,
    work_orders: Vec<WorkOrder>,
}

/// Thread-safe in-memory store.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use scheduler_models::{WorkCenter, WorkOrderDraft};
/// use scheduler_store::{MemoryStore, WorkOrderStore};
///
/// let store = MemoryStore::new();
/// store.add_work_center(WorkCenter::with_id("W1", "Lathe")).unwrap();
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let order = store
///     .create_work_order(WorkOrderDraft::new("W1", "Housings", start, end))
///     .unwrap();
///
/// assert_eq!(store.work_orders_for(&"W1".into()), vec![order]);
/// ```
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the six demo work centers.
    pub fn with_default_work_centers() -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock().unwrap_or_else(|e| e.into_inner());
            state.work_centers = DEFAULT_WORK_CENTERS
                .iter()
                .map(|(id, name)| WorkCenter::with_id(*id, *name))
                .collect();
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// Lists work orders matching an optional filter, in insertion order.
    pub fn list(&self, filter: Option<&WorkOrderFilter>) -> Vec<WorkOrder> {
        let state = match self.state.lock() {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };

        state
            .work_orders
            .iter()
            .filter(|order| filter.map(|f| f.matches(order)).unwrap_or(true))
            .cloned()
            .collect()
    }

    /// Returns the number of work orders.
    pub fn len(&self) -> usize {
        self.state.lock().map(|s| s.work_orders.len()).unwrap_or(0)
    }

    /// Returns true if the store holds no work orders.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a work order with its ID as-is, replacing any order with the same ID.
    ///
    /// Used when loading records that already carry identifiers.
    pub fn insert_work_order(&self, order: WorkOrder) -> Result<()> {
        let mut state = self.lock()?;
        match state.work_orders.iter_mut().find(|o| o.id == order.id) {
            Some(existing) => *existing = order,
            None => state.work_orders.push(order),
        }
        Ok(())
    }
}

impl WorkOrderStore for MemoryStore {
    fn list_work_centers(&self) -> Vec<WorkCenter> {
        self.state
            .lock()
            .map(|s| s.work_centers.clone())
            .unwrap_or_default()
    }

    fn list_work_orders(&self) -> Vec<WorkOrder> {
        self.list(None)
    }

    fn get_work_order(&self, id: &WorkOrderId) -> Option<WorkOrder> {
        let state = self.state.lock().ok()?;
        state.work_orders.iter().find(|o| &o.id == id).cloned()
    }

    fn work_orders_for(&self, work_center_id: &WorkCenterId) -> Vec<WorkOrder> {
        let filter = WorkOrderFilter::new().with_work_center(work_center_id.clone());
        self.list(Some(&filter))
    }

    fn add_work_center(&self, center: WorkCenter) -> Result<()> {
        let mut state = self.lock()?;
        if state.work_centers.iter().any(|c| c.id == center.id) {
            return Err(StoreError::DuplicateWorkCenter(center.id.to_string()));
        }
        debug!(work_center_id = %center.id, name = %center.name, "work center added");
        state.work_centers.push(center);
        Ok(())
    }

    fn create_work_order(&self, draft: WorkOrderDraft) -> Result<WorkOrder> {
        let order = WorkOrder::from_draft(draft);
        let mut state = self.lock()?;
        state.work_orders.push(order.clone());
        debug!(
            work_order_id = %order.id,
            work_center_id = %order.work_center_id,
            start = %order.start,
            end = %order.end,
            "work order created"
        );
        Ok(order)
    }

    fn update_work_order(&self, id: &WorkOrderId, patch: &WorkOrderPatch) -> Result<()> {
        let mut state = self.lock()?;
        match state.work_orders.iter_mut().find(|o| &o.id == id) {
            Some(order) => {
                order.apply(patch);
                debug!(work_order_id = %id, "work order updated");
            }
            None => trace!(work_order_id = %id, "update ignored, unknown work order"),
        }
        Ok(())
    }

    fn delete_work_order(&self, id: &WorkOrderId) -> Result<()> {
        let mut state = self.lock()?;
        let before = state.work_orders.len();
        state.work_orders.retain(|o| &o.id != id);
        if state.work_orders.len() < before {
            debug!(work_order_id = %id, "work order deleted");
        } else {
            trace!(work_order_id = %id, "delete ignored, unknown work order");
        }
        Ok(())
    }
}
