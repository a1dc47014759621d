//! Range fitting: choose the base date and column count that cover every
//! work order plus a buffer, and locate today as a column.
//!
//! The result is pure derived state. It is rebuilt from scratch after every
//! store mutation and granularity change, never patched.

use chrono::{Datelike, NaiveDate};
use scheduler_models::{Granularity, WorkOrder};
use serde::Serialize;
use tracing::{debug, warn};

use crate::calendar::{add_months, add_units, column_start, first_of_month, month_index};
use crate::config::TimelineConfig;

/// Derived column layout of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnWindow {
    /// Date of column 0 (first of a month at Month granularity).
    pub base_date: NaiveDate,
    /// Number of columns in the logical range.
    pub column_count: usize,
    /// Column containing today. May fall outside `0..column_count` when
    /// today is far from the data.
    pub current_column_index: i64,
}

impl ColumnWindow {
    /// Date just past the last column.
    pub fn end_date(&self, granularity: Granularity) -> NaiveDate {
        column_start(self.base_date, self.column_count as i64, granularity)
    }
}

/// Fits the window with the default [`TimelineConfig`].
pub fn compute_range(
    orders: &[WorkOrder],
    granularity: Granularity,
    today: NaiveDate,
) -> ColumnWindow {
    compute_range_with(orders, granularity, today, &TimelineConfig::default())
}

/// Fits the window to `orders` at `granularity`.
///
/// - No valid orders: the window starts `buffer` units before today with the
///   floor column count, and today is column `buffer`.
/// - Otherwise the window starts `buffer` units before the earliest start and
///   reaches at least `buffer` units past the latest end, with at least the
///   floor column count.
///
/// Month arithmetic is done on whole months (`year * 12 + month`), so
/// month-length differences never accumulate. Orders with `start >= end`
/// are skipped.
pub fn compute_range_with(
    orders: &[WorkOrder],
    granularity: Granularity,
    today: NaiveDate,
    config: &TimelineConfig,
) -> ColumnWindow {
    let buffer = config.buffer_units as i64;
    let floor = config.min_columns(granularity);

    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    let mut skipped = 0usize;
    for order in orders {
        if !order.is_valid() {
            skipped += 1;
            warn!(
                work_order_id = %order.id,
                start = %order.start,
                end = %order.end,
                "skipping work order with empty span"
            );
            continue;
        }
        bounds = Some(match bounds {
            None => (order.start, order.end),
            Some((min, max)) => (min.min(order.start), max.max(order.end)),
        });
    }

    let window = match bounds {
        None => {
            let base = match granularity {
                Granularity::Month => add_months(first_of_month(today), -buffer),
                _ => add_units(today, -buffer, granularity),
            };
            ColumnWindow {
                base_date: base,
                column_count: floor,
                current_column_index: buffer,
            }
        }
        Some((min_start, max_end)) => match granularity.fixed_days() {
            Some(unit) => {
                let base = add_units(min_start, -buffer, granularity);
                let span_days = (max_end - base).num_days() + buffer * unit;
                let needed = span_days.div_euclid(unit) + i64::from(span_days.rem_euclid(unit) != 0);
                ColumnWindow {
                    base_date: base,
                    column_count: floor.max(usize::try_from(needed).unwrap_or(0)),
                    current_column_index: (today - base).num_days().div_euclid(unit),
                }
            }
            None => {
                let base = add_months(first_of_month(min_start), -buffer);
                // An end past the 1st reaches into its month, so count that month too.
                let end_index = month_index(max_end) + i64::from(max_end.day() > 1);
                let needed = end_index + buffer - month_index(base);
                ColumnWindow {
                    base_date: base,
                    column_count: floor.max(usize::try_from(needed).unwrap_or(0)),
                    current_column_index: month_index(today) - month_index(base),
                }
            }
        },
    };

    debug!(
        granularity = %granularity,
        base_date = %window.base_date,
        column_count = window.column_count,
        current_column_index = window.current_column_index,
        skipped,
        "range fitted"
    );
    window
}
