//! Interval geometry: where a work order bar sits and how wide it is.
//!
//! Day and Week columns have a fixed length, so positions are linear in
//! elapsed days. Month columns vary in length; positions there are a whole
//! month delta plus the fraction of the specific month already elapsed,
//! using that month's real day count.

use chrono::{Datelike, NaiveDate};
use scheduler_models::{Granularity, WorkCenterId, WorkOrder, WorkOrderId, WorkOrderStatus};
use serde::Serialize;

use crate::calendar::{add_days, column_start, days_in_month, month_index};

/// Narrowest bar ever produced, so a bar never disappears visually.
pub const MIN_BAR_WIDTH: f64 = 1.0;

/// Fraction of `date`'s month elapsed before `date` starts (0 on the 1st).
pub fn month_fraction(date: NaiveDate) -> f64 {
    (date.day() - 1) as f64 / days_in_month(date) as f64
}

/// Horizontal offset of `start` from the left edge of column 0, in pixels.
///
/// Starts before `base` clamp to 0.
pub fn offset_pixels(
    start: NaiveDate,
    base: NaiveDate,
    granularity: Granularity,
    column_width: f64,
) -> f64 {
    let units = match granularity.fixed_days() {
        Some(unit) => (start - base).num_days() as f64 / unit as f64,
        None => (month_index(start) - month_index(base)) as f64 + month_fraction(start),
    };
    (units * column_width).max(0.0)
}

/// Width of the `[start, end)` bar in pixels, never below [`MIN_BAR_WIDTH`].
pub fn width_pixels(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
    column_width: f64,
) -> f64 {
    let units = match granularity.fixed_days() {
        Some(unit) => (end - start).num_days() as f64 / unit as f64,
        None => {
            (month_index(end) - month_index(start)) as f64
                + (month_fraction(end) - month_fraction(start))
        }
    };
    (units * column_width).max(MIN_BAR_WIDTH)
}

/// Date under horizontal pixel `x`, the inverse of [`offset_pixels`].
///
/// Used for click-to-create: the clicked column plus the position inside
/// it picks the day. Negative `x` maps to `base`.
pub fn date_at_offset(
    base: NaiveDate,
    granularity: Granularity,
    column_width: f64,
    x: f64,
) -> NaiveDate {
    if column_width.is_nan() || column_width <= 0.0 || !x.is_finite() || x <= 0.0 {
        return base;
    }
    let units = x / column_width;
    match granularity.fixed_days() {
        Some(unit) => add_days(base, (units * unit as f64).floor() as i64),
        None => {
            let column = units.floor();
            let month = column_start(base, column as i64, granularity);
            let day = ((units - column) * days_in_month(month) as f64).floor() as i64;
            add_days(month, day)
        }
    }
}

/// Rectangle of one work order bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub work_order_id: WorkOrderId,
    pub work_center_id: WorkCenterId,
    pub status: WorkOrderStatus,
    /// Index of the row the bar is drawn in.
    pub row_index: usize,
    pub left: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
}

impl BarGeometry {
    /// Lays out `order` in row `row_index`.
    pub fn for_order(
        order: &WorkOrder,
        row_index: usize,
        base: NaiveDate,
        granularity: Granularity,
        column_width: f64,
        row_height: f64,
    ) -> Self {
        Self {
            work_order_id: order.id.clone(),
            work_center_id: order.work_center_id.clone(),
            status: order.status,
            row_index,
            left: offset_pixels(order.start, base, granularity, column_width),
            width: width_pixels(order.start, order.end, granularity, column_width),
            top: row_index as f64 * row_height,
            height: row_height,
        }
    }

    /// Right edge in pixels.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Returns true if `(x, y)` lies inside the bar (left/top edges inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.top + self.height
    }

    /// Returns true if the bar intersects the horizontal span `[from, to)`.
    pub fn intersects_span(&self, from: f64, to: f64) -> bool {
        self.left < to && from < self.right()
    }
}
