//! End-to-end timeline scenarios over an in-memory store.

use chrono::NaiveDate;
use scheduler_models::{Granularity, WorkCenter, WorkOrderDraft, WorkOrderPatch, WorkOrderStatus};
use scheduler_store::{MemoryStore, WorkOrderStore};
use scheduler_timeline::calendar::{column_to_date, format_iso, iso_week_number, parse_iso};
use scheduler_timeline::{
    compute_range, has_overlap, offset_pixels, width_pixels, ScheduleError, TimelineBoard,
    TimelineConfig,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_empty_store_month_window() {
    let today = date(2025, 8, 21);
    let window = compute_range(&[], Granularity::Month, today);

    assert_eq!(window.column_count, 12);
    assert_eq!(window.current_column_index, 2);
    assert_eq!(window.base_date, date(2025, 6, 1));
}

#[test]
fn test_single_order_day_window() {
    let store = MemoryStore::new();
    store
        .create_work_order(WorkOrderDraft::new("W1", "Order", date(2025, 1, 15), date(2025, 4, 30)))
        .unwrap();

    let window = compute_range(&store.list_work_orders(), Granularity::Day, date(2025, 1, 20));
    assert_eq!(window.base_date, date(2025, 1, 13));
    let needed = (date(2025, 5, 2) - date(2025, 1, 13)).num_days() as usize;
    assert!(window.column_count >= needed);
}

#[test]
fn test_half_open_overlap_on_row() {
    let store = MemoryStore::new();
    store
        .create_work_order(WorkOrderDraft::new("W1", "Order", date(2025, 3, 1), date(2025, 3, 10)))
        .unwrap();

    let w1 = "W1".into();
    assert!(!has_overlap(&store, &w1, date(2025, 3, 10), date(2025, 3, 15), None));
    assert!(has_overlap(&store, &w1, date(2025, 3, 9), date(2025, 3, 11), None));
}

#[test]
fn test_month_geometry_uses_real_month_lengths() {
    let base = date(2025, 1, 1);
    let start = date(2025, 2, 10);
    let end = date(2025, 4, 20);
    let width = 250.0;

    let offset = offset_pixels(start, base, Granularity::Month, width);
    assert!((offset - (1.0 + 9.0 / 28.0) * width).abs() < 1e-9);

    let bar = width_pixels(start, end, Granularity::Month, width);
    assert!((bar - (2.0 + 19.0 / 30.0 - 9.0 / 28.0) * width).abs() < 1e-9);

    // A flat 30-day month would put the bar elsewhere.
    assert!((offset - (1.0 + 9.0 / 30.0) * width).abs() > 1.0);
}

#[test]
fn test_iso_week_year_boundaries() {
    // 2024-12-30 (Monday) starts week 1 of 2025.
    assert_eq!(iso_week_number(date(2024, 12, 31)), 1);
    // 2021-01-01 (Friday) belongs to week 53 of 2020.
    assert_eq!(iso_week_number(date(2021, 1, 1)), 53);
    // 2023-01-01 (Sunday) belongs to week 52 of 2022.
    assert_eq!(iso_week_number(date(2023, 1, 1)), 52);
}

#[test]
fn test_column_dates_are_monotonic() {
    let base = date(2024, 1, 31);
    for g in Granularity::ALL {
        let dates: Vec<NaiveDate> = (0..40).map(|i| column_to_date(base, i, g)).collect();
        for pair in dates.windows(2) {
            match g {
                Granularity::Month => assert!(pair[0] <= pair[1]),
                _ => assert!(pair[0] < pair[1]),
            }
        }
    }
}

#[test]
fn test_iso_round_trip_and_malformed_input() {
    for d in [date(2024, 2, 29), date(1999, 12, 31), date(2025, 1, 1)] {
        assert_eq!(parse_iso(&format_iso(d)), Some(d));
    }
    assert_eq!(parse_iso("2025-02-30"), None);
    assert_eq!(parse_iso("garbage"), None);
}

#[test]
fn test_board_workflow() {
    let store = MemoryStore::with_default_work_centers();
    let mut board = TimelineBoard::with_today(store, TimelineConfig::default(), date(2025, 3, 5));
    board.take_scroll_request();

    board.set_granularity(Granularity::Day);
    let order = board
        .create_work_order(
            WorkOrderDraft::new("1", "Prototype", date(2025, 3, 1), date(2025, 3, 10))
                .with_status(WorkOrderStatus::InProgress),
        )
        .unwrap();

    // The surface applies the pending scroll, then reports its viewport.
    let request = board.take_scroll_request().unwrap();
    board.set_viewport(request.offset, 900.0);
    assert_eq!(board.virtualizer().scroll_offset(), request.offset);
    assert!(!board.visible_columns().is_empty());

    // A conflicting order on the same work center is rejected by name.
    let err = board
        .create_work_order(WorkOrderDraft::new("1", "Rush", date(2025, 3, 5), date(2025, 3, 6)))
        .unwrap_err();
    match err {
        ScheduleError::Overlap { work_center_name, .. } => {
            assert_eq!(work_center_name, "Acme Corporation")
        }
        other => panic!("unexpected error: {other}"),
    }

    // The same span on another work center is fine.
    board
        .create_work_order(WorkOrderDraft::new("2", "Rush", date(2025, 3, 5), date(2025, 3, 6)))
        .unwrap();

    // Extending the first order moves its bar's right edge.
    let before = board.bars()[0].width;
    board
        .update_work_order(&order.id, &WorkOrderPatch::new().span(date(2025, 3, 1), date(2025, 3, 12)))
        .unwrap();
    let after = board.bars()[0].width;
    assert_eq!(after - before, 2.0 * 150.0);

    board.delete_work_order(&order.id).unwrap();
    assert_eq!(board.bars().len(), 1);
    assert_eq!(board.bars()[0].row_index, 1);
}

#[test]
fn test_removed_row_drops_its_bars() {
    let store = MemoryStore::new();
    store.add_work_center(WorkCenter::with_id("W1", "Lathe")).unwrap();
    store
        .create_work_order(WorkOrderDraft::new("W1", "Kept", date(2025, 3, 1), date(2025, 3, 2)))
        .unwrap();
    store
        .create_work_order(WorkOrderDraft::new("W9", "Orphan", date(2025, 3, 1), date(2025, 3, 2)))
        .unwrap();

    let board = TimelineBoard::with_today(store, TimelineConfig::default(), date(2025, 3, 1));
    let bars = board.bars();
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].work_center_id.as_str(), "W1");
}

#[test]
fn test_large_range_stays_virtualized() {
    let store = MemoryStore::new();
    store.add_work_center(WorkCenter::with_id("W1", "Lathe")).unwrap();
    store
        .create_work_order(WorkOrderDraft::new("W1", "Decade", date(2020, 1, 1), date(2030, 1, 1)))
        .unwrap();

    let mut board = TimelineBoard::with_today(store, TimelineConfig::default(), date(2025, 1, 1));
    board.set_granularity(Granularity::Day);
    assert!(board.window().column_count > 3650);

    let request = board.take_scroll_request().unwrap();
    board.set_viewport(request.offset, 1500.0);
    assert!(board.visible_columns().len() <= 1500 / 150 + 2 * 5 + 2);
}
