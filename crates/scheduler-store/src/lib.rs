//! Work order store for the scheduler.
//!
//! This crate provides the `WorkOrderStore` trait the timeline engine reads
//! from and `MemoryStore`, its in-memory implementation:
//! - Thread-safe state using `Arc<Mutex<T>>`
//! - Insertion-ordered work centers and work orders
//! - Silent no-op on update/delete of unknown IDs
//!
//! # Example
//!
//! ```
//! use scheduler_store::{MemoryStore, WorkOrderStore};
//!
//! let store = MemoryStore::with_default_work_centers();
//! assert_eq!(store.list_work_centers().len(), 6);
//! assert!(store.list_work_orders().is_empty());
//! ```

pub mod error;
pub mod filter;
pub mod memory;
pub mod store;

pub use error::{Result, StoreError};
pub use filter::WorkOrderFilter;
pub use memory::{MemoryStore, DEFAULT_WORK_CENTERS};
pub use store::WorkOrderStore;
