//! Column virtualization.
//!
//! Only the columns near the scroll position are materialized, however many
//! columns the logical range holds. All columns share one width, so column
//! `i` spans `[i * width, (i + 1) * width)`.

use std::ops::RangeInclusive;

use serde::Serialize;

/// A materialized column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VirtualColumn {
    pub index: usize,
    /// Left edge in pixels.
    pub start: f64,
    /// Width in pixels.
    pub size: f64,
}

/// Tracks scroll position and viewport for a fixed-width column strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnVirtualizer {
    column_count: usize,
    column_width: f64,
    overscan: usize,
    scroll_offset: f64,
    viewport_width: f64,
}

impl ColumnVirtualizer {
    /// Creates a virtualizer scrolled to the start with an empty viewport.
    pub fn new(column_count: usize, column_width: f64, overscan: usize) -> Self {
        Self {
            column_count,
            column_width,
            overscan,
            scroll_offset: 0.0,
            viewport_width: 0.0,
        }
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Full scrollable width in pixels.
    pub fn total_size(&self) -> f64 {
        self.column_count as f64 * self.column_width
    }

    /// Largest meaningful scroll offset for the current viewport.
    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_size() - self.viewport_width).max(0.0)
    }

    /// Records the viewport width.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Records the scroll offset, clamped to the scrollable range.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Inclusive range of columns intersecting
    /// `[scroll - overscan * width, scroll + viewport + overscan * width]`,
    /// clamped to the existing columns. `None` when there are no columns.
    pub fn visible_range(
        &self,
        scroll_offset: f64,
        viewport_width: f64,
    ) -> Option<RangeInclusive<usize>> {
        if self.column_count == 0 || self.column_width.is_nan() || self.column_width <= 0.0 {
            return None;
        }
        let scroll = if scroll_offset.is_finite() { scroll_offset } else { 0.0 };
        let viewport = if viewport_width.is_finite() { viewport_width.max(0.0) } else { 0.0 };
        let margin = self.overscan as f64 * self.column_width;

        let low = (scroll - margin).max(0.0);
        let high = (scroll + viewport + margin).max(0.0);
        let last_index = self.column_count - 1;

        let first = ((low / self.column_width).floor() as usize).min(last_index);
        let last = ((high / self.column_width).floor() as usize).min(last_index);
        Some(first..=last)
    }

    /// Visible range at the recorded scroll offset and viewport.
    pub fn range(&self) -> Option<RangeInclusive<usize>> {
        self.visible_range(self.scroll_offset, self.viewport_width)
    }

    /// Columns to materialize at the recorded scroll offset and viewport.
    pub fn virtual_columns(&self) -> Vec<VirtualColumn> {
        self.range()
            .map(|range| {
                range
                    .map(|index| VirtualColumn {
                        index,
                        start: index as f64 * self.column_width,
                        size: self.column_width,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Scroll offset that brings column `index` to the left edge.
    ///
    /// Indexes outside `0..column_count` are clamped; with no columns the
    /// offset is 0.
    pub fn scroll_offset_for_column(&self, index: i64) -> f64 {
        if self.column_count == 0 {
            return 0.0;
        }
        let last = i64::try_from(self.column_count - 1).unwrap_or(i64::MAX);
        index.clamp(0, last) as f64 * self.column_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_with_overscan() {
        let v = ColumnVirtualizer::new(100, 150.0, 5);
        // [1500 - 750, 1500 + 900 + 750] = [750, 3150]
        assert_eq!(v.visible_range(1500.0, 900.0), Some(5..=21));
    }

    #[test]
    fn test_visible_range_at_start_clamps_low() {
        let v = ColumnVirtualizer::new(100, 200.0, 5);
        assert_eq!(v.visible_range(0.0, 1000.0), Some(0..=10));
    }

    #[test]
    fn test_visible_range_at_end_clamps_high() {
        let v = ColumnVirtualizer::new(12, 250.0, 5);
        assert_eq!(v.visible_range(2000.0, 1000.0), Some(3..=11));
    }

    #[test]
    fn test_visible_range_beyond_end() {
        let v = ColumnVirtualizer::new(12, 250.0, 5);
        assert_eq!(v.visible_range(1_000_000.0, 1000.0), Some(11..=11));
    }

    #[test]
    fn test_visible_range_empty() {
        let v = ColumnVirtualizer::new(0, 150.0, 5);
        assert_eq!(v.visible_range(0.0, 1000.0), None);
        assert!(v.virtual_columns().is_empty());
        assert_eq!(v.total_size(), 0.0);
    }

    #[test]
    fn test_materialized_count_is_bounded() {
        // Ten years of days.
        let mut v = ColumnVirtualizer::new(3650, 150.0, 5);
        v.set_viewport_width(1200.0);
        v.set_scroll_offset(250_000.0);

        let columns = v.virtual_columns();
        assert!(columns.len() <= 1200 / 150 + 2 * 5 + 2);
        assert_eq!(columns[0].start, columns[0].index as f64 * 150.0);
        assert!(columns.windows(2).all(|w| w[1].index == w[0].index + 1));
    }

    #[test]
    fn test_scroll_offset_for_column_clamps() {
        let v = ColumnVirtualizer::new(30, 150.0, 5);
        assert_eq!(v.scroll_offset_for_column(2), 300.0);
        assert_eq!(v.scroll_offset_for_column(-4), 0.0);
        assert_eq!(v.scroll_offset_for_column(500), 29.0 * 150.0);

        let empty = ColumnVirtualizer::new(0, 150.0, 5);
        assert_eq!(empty.scroll_offset_for_column(7), 0.0);
    }

    #[test]
    fn test_scroll_to_last_column_respects_max_scroll() {
        let mut v = ColumnVirtualizer::new(30, 150.0, 5);
        v.set_viewport_width(1500.0);
        v.set_scroll_offset(v.scroll_offset_for_column(3));
        assert_eq!(v.scroll_offset(), 450.0);
        // 30 * 150 - 1500
        v.set_scroll_offset(v.scroll_offset_for_column(29));
        assert_eq!(v.scroll_offset(), 3000.0);
        assert_eq!(v.range(), Some(15..=29));
    }

    #[test]
    fn test_set_scroll_offset_rejects_nan() {
        let mut v = ColumnVirtualizer::new(30, 150.0, 5);
        v.set_viewport_width(300.0);
        v.set_scroll_offset(f64::NAN);
        assert_eq!(v.scroll_offset(), 0.0);
        v.set_scroll_offset(-50.0);
        assert_eq!(v.scroll_offset(), 0.0);
    }
}
