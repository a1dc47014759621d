//! TimelineBoard - owns a store and keeps the derived timeline in sync.
//!
//! Every mutation and granularity change runs the same sequence: range fit,
//! rebuild the column virtualizer, queue a scroll to today's column. Bar
//! geometry is computed on demand from the store, so a row that disappears
//! between two renders simply stops producing bars.
//!
//! Mutations take `&mut self`, so the overlap check and the write it guards
//! cannot interleave with another writer.

use chrono::{Local, NaiveDate};
use scheduler_models::{
    Granularity, WorkCenterId, WorkOrder, WorkOrderDraft, WorkOrderId, WorkOrderPatch,
};
use scheduler_store::WorkOrderStore;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calendar::{add_units, column_label, column_start};
use crate::config::TimelineConfig;
use crate::error::{Result, ScheduleError};
use crate::geometry::{date_at_offset, BarGeometry};
use crate::hit_test::hit_test;
use crate::overlap::find_conflict;
use crate::range::{compute_range_with, ColumnWindow};
use crate::virtualizer::ColumnVirtualizer;

/// A pending request to scroll the render surface.
///
/// Issued after every range fit and meant to be applied once the surface
/// has materialized the new column count. A newer request replaces an
/// unconsumed older one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollRequest {
    pub column_index: usize,
    pub offset: f64,
}

/// A materialized column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleColumn {
    pub index: usize,
    /// Date the column stands for (first of the month for Month columns).
    pub date: NaiveDate,
    pub label: String,
    pub left: f64,
    pub width: f64,
}

/// The timeline of one store at one granularity.
pub struct TimelineBoard<S: WorkOrderStore> {
    store: S,
    config: TimelineConfig,
    granularity: Granularity,
    today: NaiveDate,
    window: ColumnWindow,
    virtualizer: ColumnVirtualizer,
    pending_scroll: Option<ScrollRequest>,
}

impl<S: WorkOrderStore> TimelineBoard<S> {
    /// Creates a board at Month granularity using the local date as today.
    pub fn new(store: S, config: TimelineConfig) -> Self {
        Self::with_today(store, config, Local::now().date_naive())
    }

    /// Creates a board with an explicit today.
    pub fn with_today(store: S, config: TimelineConfig, today: NaiveDate) -> Self {
        let granularity = Granularity::default();
        let window = compute_range_with(&store.list_work_orders(), granularity, today, &config);
        let virtualizer = ColumnVirtualizer::new(
            window.column_count,
            config.column_width(granularity),
            config.overscan,
        );
        let mut board = Self {
            store,
            config,
            granularity,
            today,
            window,
            virtualizer,
            pending_scroll: None,
        };
        board.queue_scroll_to_today();
        board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Current derived column window.
    pub fn window(&self) -> ColumnWindow {
        self.window
    }

    pub fn virtualizer(&self) -> &ColumnVirtualizer {
        &self.virtualizer
    }

    /// Width of one column at the active granularity.
    pub fn column_width(&self) -> f64 {
        self.config.column_width(self.granularity)
    }

    /// Switches granularity and refits the range.
    pub fn set_granularity(&mut self, granularity: Granularity) -> ColumnWindow {
        if granularity != self.granularity {
            info!(from = %self.granularity, to = %granularity, "granularity changed");
        }
        self.granularity = granularity;
        self.recompute()
    }

    /// Moves "today" (e.g. after midnight) and refits the range.
    pub fn set_today(&mut self, today: NaiveDate) -> ColumnWindow {
        self.today = today;
        self.recompute()
    }

    /// Refits the range from the store and rebuilds the virtualizer.
    ///
    /// The viewport width carries over; the scroll position is left for the
    /// queued [`ScrollRequest`] to set.
    pub fn recompute(&mut self) -> ColumnWindow {
        let orders = self.store.list_work_orders();
        self.window = compute_range_with(&orders, self.granularity, self.today, &self.config);

        let viewport_width = self.virtualizer.viewport_width();
        self.virtualizer = ColumnVirtualizer::new(
            self.window.column_count,
            self.column_width(),
            self.config.overscan,
        );
        self.virtualizer.set_viewport_width(viewport_width);
        self.queue_scroll_to_today();
        self.window
    }

    fn queue_scroll_to_today(&mut self) {
        let last = self.window.column_count.saturating_sub(1) as i64;
        let column_index = self.window.current_column_index.clamp(0, last.max(0)) as usize;
        let request = ScrollRequest {
            column_index,
            offset: self
                .virtualizer
                .scroll_offset_for_column(self.window.current_column_index),
        };
        if let Some(previous) = self.pending_scroll.replace(request) {
            debug!(superseded = previous.column_index, "scroll request replaced");
        }
    }

    /// Takes the pending scroll request, if any.
    ///
    /// Call once the render surface holds the new column count, then report
    /// the resulting position through [`Self::set_viewport`].
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    /// Records the render surface's scroll offset and width.
    pub fn set_viewport(&mut self, scroll_offset: f64, viewport_width: f64) {
        self.virtualizer.set_viewport_width(viewport_width);
        self.virtualizer.set_scroll_offset(scroll_offset);
    }

    /// Headers for the materialized columns.
    pub fn visible_columns(&self) -> Vec<VisibleColumn> {
        self.virtualizer
            .virtual_columns()
            .into_iter()
            .map(|column| {
                let date = column_start(self.window.base_date, column.index as i64, self.granularity);
                VisibleColumn {
                    index: column.index,
                    date,
                    label: column_label(date, self.granularity),
                    left: column.start,
                    width: column.size,
                }
            })
            .collect()
    }

    /// Geometry of every valid work order, row by row in store order.
    pub fn bars(&self) -> Vec<BarGeometry> {
        let column_width = self.column_width();
        let mut bars = Vec::new();
        for (row_index, center) in self.store.list_work_centers().iter().enumerate() {
            for order in self.store.work_orders_for(&center.id) {
                if !order.is_valid() {
                    continue;
                }
                bars.push(BarGeometry::for_order(
                    &order,
                    row_index,
                    self.window.base_date,
                    self.granularity,
                    column_width,
                    self.config.row_height,
                ));
            }
        }
        bars
    }

    /// Bars that intersect the materialized columns.
    pub fn visible_bars(&self) -> Vec<BarGeometry> {
        let Some(range) = self.virtualizer.range() else {
            return Vec::new();
        };
        let width = self.column_width();
        let from = *range.start() as f64 * width;
        let to = (*range.end() + 1) as f64 * width;
        self.bars()
            .into_iter()
            .filter(|bar| bar.intersects_span(from, to))
            .collect()
    }

    /// The work order drawn at `(x, y)`, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<WorkOrderId> {
        hit_test(&self.bars(), x, y).map(|bar| bar.work_order_id.clone())
    }

    /// Default end for a new order: one granularity unit after `start`.
    pub fn default_end(&self, start: NaiveDate) -> NaiveDate {
        add_units(start, 1, self.granularity)
    }

    /// Proposes a new order for a click at pixel `x` on an empty part of a row.
    pub fn draft_at(&self, work_center_id: &WorkCenterId, x: f64) -> WorkOrderDraft {
        let start = date_at_offset(self.window.base_date, self.granularity, self.column_width(), x);
        WorkOrderDraft::new(work_center_id.clone(), String::new(), start, self.default_end(start))
    }

    fn validate_span(start: NaiveDate, end: NaiveDate) -> Result<()> {
        if start >= end {
            warn!(%start, %end, "rejected empty or reversed interval");
            return Err(ScheduleError::InvalidInterval { start, end });
        }
        Ok(())
    }

    fn check_conflict(
        &self,
        work_center_id: &WorkCenterId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&WorkOrderId>,
    ) -> Result<()> {
        if let Some(conflict) = find_conflict(&self.store, work_center_id, start, end, exclude) {
            let work_center_name = self
                .store
                .list_work_centers()
                .into_iter()
                .find(|c| &c.id == work_center_id)
                .map(|c| c.name)
                .unwrap_or_else(|| work_center_id.to_string());
            warn!(
                work_center_id = %work_center_id,
                conflicting = %conflict.id,
                %start,
                %end,
                "rejected overlapping interval"
            );
            return Err(ScheduleError::Overlap {
                work_center_id: work_center_id.clone(),
                work_center_name,
                conflicting: conflict.id,
            });
        }
        Ok(())
    }

    /// Runs the gate every create and update passes: a non-empty span that
    /// overlaps nothing else on `work_center_id` (ignoring `exclude`).
    pub fn check_candidate(
        &self,
        work_center_id: &WorkCenterId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&WorkOrderId>,
    ) -> Result<()> {
        Self::validate_span(start, end)?;
        self.check_conflict(work_center_id, start, end, exclude)
    }

    /// Validates and stores a new work order, then refits the range.
    pub fn create_work_order(&mut self, draft: WorkOrderDraft) -> Result<WorkOrder> {
        self.check_candidate(&draft.work_center_id, draft.start, draft.end, None)?;

        let order = self.store.create_work_order(draft)?;
        info!(work_order_id = %order.id, work_center_id = %order.work_center_id, "work order scheduled");
        self.recompute();
        Ok(order)
    }

    /// Validates and applies a partial update, then refits the range.
    ///
    /// Unknown IDs and empty patches are a no-op. The edited order is
    /// excluded from its own overlap check.
    pub fn update_work_order(&mut self, id: &WorkOrderId, patch: &WorkOrderPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        let Some(mut candidate) = self.store.get_work_order(id) else {
            debug!(work_order_id = %id, "update of unknown work order ignored");
            return Ok(());
        };
        candidate.apply(patch);

        self.check_candidate(&candidate.work_center_id, candidate.start, candidate.end, Some(id))?;

        self.store.update_work_order(id, patch)?;
        info!(work_order_id = %id, "work order rescheduled");
        self.recompute();
        Ok(())
    }

    /// Deletes a work order (no-op for unknown IDs), then refits the range.
    pub fn delete_work_order(&mut self, id: &WorkOrderId) -> Result<()> {
        self.store.delete_work_order(id)?;
        self.recompute();
        Ok(())
    }
}
