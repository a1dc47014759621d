//! Timeline engine for the work order scheduler.
//!
//! Turns work orders into a horizontally scrolling timeline:
//! - Calendar columns at day, week and month granularity
//! - Range fitting around the data with a buffer on both sides
//! - Pixel geometry for bars, including fractional month positions
//! - Column virtualization over arbitrarily long ranges
//! - Half-open overlap checks per work center
//!
//! [`TimelineBoard`] ties these together over a [`WorkOrderStore`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use scheduler_models::{Granularity, WorkOrderDraft};
//! use scheduler_store::MemoryStore;
//! use scheduler_timeline::{TimelineBoard, TimelineConfig};
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
//! let store = MemoryStore::with_default_work_centers();
//! let mut board = TimelineBoard::with_today(store, TimelineConfig::default(), today);
//! board.set_granularity(Granularity::Week);
//!
//! let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 3, 24).unwrap();
//! board.create_work_order(WorkOrderDraft::new("1", "Assembly", start, end)).unwrap();
//!
//! assert_eq!(board.bars().len(), 1);
//! ```
//!
//! [`WorkOrderStore`]: scheduler_store::WorkOrderStore

pub mod board;
pub mod calendar;
pub mod config;
pub mod error;
pub mod geometry;
pub mod overlap;
pub mod range;
pub mod virtualizer;

pub use board::{ScrollRequest, TimelineBoard, VisibleColumn};
pub use config::TimelineConfig;
pub use error::{ConfigError, Result, ScheduleError};
pub use geometry::{date_at_offset, offset_pixels, width_pixels, BarGeometry};
pub use hit_test::hit_test;
pub use overlap::{find_conflict, has_overlap, spans_overlap};
pub use range::{compute_range, compute_range_with, ColumnWindow};
pub use virtualizer::{ColumnVirtualizer, VirtualColumn};
