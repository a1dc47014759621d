//! Core data models for the work order scheduler.
//!
//! This crate provides the types shared by the store, the timeline engine
//! and the command-line front end: work centers (timeline rows), work
//! orders (the bars placed on them) and the timeline granularity.

pub mod granularity;
pub mod ids;
pub mod work_order;

// Re-export main types
pub use granularity::Granularity;
pub use ids::{WorkCenterId, WorkOrderId};
pub use work_order::{WorkCenter, WorkOrder, WorkOrderDraft, WorkOrderPatch, WorkOrderStatus};
