use super::*;

// =============================================================
// clamp_split
// =============================================================

#[test]
fn clamp_passes_values_inside_bounds() {
    assert!((clamp_split(50.0) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn clamp_raises_values_below_minimum() {
    assert!((clamp_split(5.0) - SPLIT_MIN_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn clamp_lowers_values_above_maximum() {
    assert!((clamp_split(95.0) - SPLIT_MAX_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn clamp_resets_non_finite_input_to_default() {
    assert!((clamp_split(f64::NAN) - SPLIT_DEFAULT_PERCENT).abs() < f64::EPSILON);
    assert!((clamp_split(f64::INFINITY) - SPLIT_DEFAULT_PERCENT).abs() < f64::EPSILON);
}

// =============================================================
// split_percent_from_pointer
// =============================================================

#[test]
fn pointer_at_container_midpoint_is_fifty() {
    assert!((split_percent_from_pointer(500.0, 0.0, 1000.0) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn pointer_respects_container_offset() {
    assert!((split_percent_from_pointer(700.0, 200.0, 1000.0) - 50.0).abs() < f64::EPSILON);
}

#[test]
fn pointer_left_of_container_clamps_to_minimum() {
    assert!((split_percent_from_pointer(-50.0, 0.0, 1000.0) - SPLIT_MIN_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn pointer_past_container_clamps_to_maximum() {
    assert!((split_percent_from_pointer(2000.0, 0.0, 1000.0) - SPLIT_MAX_PERCENT).abs() < f64::EPSILON);
}

#[test]
fn zero_width_container_yields_default() {
    assert!((split_percent_from_pointer(100.0, 0.0, 0.0) - SPLIT_DEFAULT_PERCENT).abs() < f64::EPSILON);
}

// =============================================================
// MemoriesTab
// =============================================================

#[test]
fn memories_tab_defaults_to_my_memories() {
    assert_eq!(MemoriesTab::default(), MemoriesTab::MyMemories);
}

// =============================================================
// Notices
// =============================================================

#[test]
fn pushed_notices_get_distinct_ids_in_order() {
    let mut notices = NoticesState::default();
    notices.push("Save failed");
    notices.push("Delete failed");
    assert!(notices.items[0].id < notices.items[1].id);
    assert_eq!(notices.items.len(), 2);
    assert_eq!(notices.items[0].text, "Save failed");
}

#[test]
fn push_returns_unit_so_it_slots_into_update_closures() {
    let mut notices = NoticesState::default();
    let () = notices.push("Save failed");
    assert_eq!(notices.items.len(), 1);
}

#[test]
fn dismiss_removes_only_the_named_notice() {
    let mut notices = NoticesState::default();
    notices.push("one");
    notices.push("two");
    let first = notices.items[0].id;
    let second = notices.items[1].id;
    notices.dismiss(first);
    assert_eq!(notices.items.len(), 1);
    assert_eq!(notices.items[0].id, second);
}

#[test]
fn dismissing_an_unknown_id_is_a_noop() {
    let mut notices = NoticesState::default();
    notices.push("one");
    notices.dismiss(99);
    assert_eq!(notices.items.len(), 1);
}

#[test]
fn ids_are_not_reused_after_dismiss() {
    let mut notices = NoticesState::default();
    notices.push("one");
    let first = notices.items[0].id;
    notices.dismiss(first);
    notices.push("two");
    assert!(notices.items[0].id > first);
}
