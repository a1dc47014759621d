//! Overlap detection between a candidate span and a row's work orders.
//!
//! Spans are half-open: `[a, b)` and `[b, c)` touch but do not overlap.
//! Create and update use the same predicate; an update excludes the order
//! being edited so it never conflicts with itself.

use chrono::NaiveDate;
use scheduler_models::{WorkCenterId, WorkOrder, WorkOrderId};
use scheduler_store::WorkOrderStore;

/// Returns true if `[a_start, a_end)` and `[b_start, b_end)` intersect.
pub fn spans_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// First work order on `work_center_id` that intersects `[start, end)`,
/// ignoring `exclude`.
pub fn find_conflict<S: WorkOrderStore + ?Sized>(
    store: &S,
    work_center_id: &WorkCenterId,
    start: NaiveDate,
    end: NaiveDate,
    exclude: Option<&WorkOrderId>,
) -> Option<WorkOrder> {
    store
        .work_orders_for(work_center_id)
        .into_iter()
        .filter(|order| exclude != Some(&order.id))
        .find(|order| spans_overlap(start, end, order.start, order.end))
}

/// Returns true if `[start, end)` conflicts with any work order on the row.
pub fn has_overlap<S: WorkOrderStore + ?Sized>(
    store: &S,
    work_center_id: &WorkCenterId,
    start: NaiveDate,
    end: NaiveDate,
    exclude: Option<&WorkOrderId>,
) -> bool {
    find_conflict(store, work_center_id, start, end, exclude).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scheduler_models::WorkOrderDraft;
    use scheduler_store::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_w1() -> (MemoryStore, WorkOrder) {
        let store = MemoryStore::new();
        let order = store
            .create_work_order(WorkOrderDraft::new("W1", "Existing", date(2025, 3, 1), date(2025, 3, 10)))
            .unwrap();
        (store, order)
    }

    #[test]
    fn test_boundary_touch_is_not_overlap() {
        let (store, _) = store_with_w1();
        let w1: WorkCenterId = "W1".into();

        assert!(!has_overlap(&store, &w1, date(2025, 3, 10), date(2025, 3, 15), None));
        assert!(!has_overlap(&store, &w1, date(2025, 2, 20), date(2025, 3, 1), None));
    }

    #[test]
    fn test_intersection_is_overlap() {
        let (store, existing) = store_with_w1();
        let w1: WorkCenterId = "W1".into();

        assert!(has_overlap(&store, &w1, date(2025, 3, 9), date(2025, 3, 11), None));
        assert!(has_overlap(&store, &w1, date(2025, 3, 3), date(2025, 3, 4), None));
        assert!(has_overlap(&store, &w1, date(2025, 1, 1), date(2025, 12, 31), None));

        let conflict = find_conflict(&store, &w1, date(2025, 3, 9), date(2025, 3, 11), None).unwrap();
        assert_eq!(conflict.id, existing.id);
    }

    #[test]
    fn test_other_rows_do_not_conflict() {
        let (store, _) = store_with_w1();
        assert!(!has_overlap(&store, &"W2".into(), date(2025, 3, 1), date(2025, 3, 10), None));
        assert!(!has_overlap(&store, &"removed".into(), date(2025, 3, 1), date(2025, 3, 10), None));
    }

    #[test]
    fn test_self_exclusion_for_edits() {
        let (store, existing) = store_with_w1();
        let w1: WorkCenterId = "W1".into();

        // Editing the order in place must not conflict with itself...
        assert!(!has_overlap(&store, &w1, date(2025, 3, 2), date(2025, 3, 12), Some(&existing.id)));
        // ...but the same span as a new order does.
        assert!(has_overlap(&store, &w1, date(2025, 3, 2), date(2025, 3, 12), None));
    }

    #[test]
    fn test_spans_overlap_half_open() {
        let (a, b) = (date(2025, 3, 1), date(2025, 3, 10));
        assert!(!spans_overlap(a, b, date(2025, 3, 10), date(2025, 3, 15)));
        assert!(!spans_overlap(a, b, date(2025, 2, 20), date(2025, 3, 1)));
        assert!(spans_overlap(a, b, date(2025, 3, 9), date(2025, 3, 11)));
        // Containment in both directions.
        assert!(spans_overlap(a, b, date(2025, 2, 1), date(2025, 4, 1)));
        assert!(spans_overlap(a, b, date(2025, 3, 4), date(2025, 3, 5)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let days: Vec<NaiveDate> = (1..=8).map(|d| date(2025, 5, d)).collect();
        for &a0 in &days {
            for &a1 in &days {
                for &b0 in &days {
                    for &b1 in &days {
                        if a0 >= a1 || b0 >= b1 {
                            continue;
                        }
                        assert_eq!(spans_overlap(a0, a1, b0, b1), spans_overlap(b0, b1, a0, a1));
                        if a1 == b0 {
                            assert!(!spans_overlap(a0, a1, b0, b1));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_store_overlap_is_symmetric() {
        let a = (date(2025, 3, 5), date(2025, 3, 20));
        let b = (date(2025, 3, 18), date(2025, 4, 2));

        let store_a = MemoryStore::new();
        store_a.create_work_order(WorkOrderDraft::new("W1", "A", a.0, a.1)).unwrap();
        let store_b = MemoryStore::new();
        store_b.create_work_order(WorkOrderDraft::new("W1", "B", b.0, b.1)).unwrap();

        let w1: WorkCenterId = "W1".into();
        assert_eq!(
            has_overlap(&store_a, &w1, b.0, b.1, None),
            has_overlap(&store_b, &w1, a.0, a.1, None)
        );
    }
}
