use super::*;

// =============================================================
// stale_time_ms
// =============================================================

#[test]
fn tag_lists_stay_fresh_for_a_minute() {
    assert!((stale_time_ms("tags:org-1") - 60_000.0).abs() < f64::EPSILON);
}

#[test]
fn settings_are_always_stale() {
    assert!(stale_time_ms(SETTINGS_KEY).abs() < f64::EPSILON);
}

#[test]
fn list_families_get_thirty_seconds() {
    assert!((stale_time_ms("memories:org-1") - 30_000.0).abs() < f64::EPSILON);
}

// =============================================================
// Freshness
// =============================================================

#[test]
fn unmarked_key_is_stale() {
    let ledger = CacheLedger::default();
    assert!(!ledger.is_fresh(&memories_key("org-1"), 1_000.0));
}

#[test]
fn marked_key_is_fresh_within_window() {
    let mut ledger = CacheLedger::default();
    let key = memories_key("org-1");
    ledger.mark(&key, 1_000.0);
    assert!(ledger.is_fresh(&key, 1_000.0 + 29_999.0));
}

#[test]
fn marked_key_goes_stale_after_window() {
    let mut ledger = CacheLedger::default();
    let key = memories_key("org-1");
    ledger.mark(&key, 1_000.0);
    assert!(!ledger.is_fresh(&key, 1_000.0 + 30_000.0));
}

#[test]
fn settings_never_read_fresh_even_when_marked() {
    let mut ledger = CacheLedger::default();
    ledger.mark(SETTINGS_KEY, 1_000.0);
    assert!(!ledger.is_fresh(SETTINGS_KEY, 1_000.0));
}

// =============================================================
// Invalidation
// =============================================================

#[test]
fn invalidate_drops_one_key() {
    let mut ledger = CacheLedger::default();
    let key = tags_key("org-1");
    ledger.mark(&key, 1_000.0);
    ledger.invalidate(&key);
    assert!(!ledger.is_fresh(&key, 1_000.0));
}

#[test]
fn invalidate_prefix_drops_family_and_keeps_others() {
    let mut ledger = CacheLedger::default();
    ledger.mark(&memories_key("org-1"), 1_000.0);
    ledger.mark(&memories_key("org-2"), 1_000.0);
    ledger.mark(&tags_key("org-1"), 1_000.0);

    ledger.invalidate_prefix("memories:");

    assert!(!ledger.is_fresh(&memories_key("org-1"), 1_001.0));
    assert!(!ledger.is_fresh(&memories_key("org-2"), 1_001.0));
    assert!(ledger.is_fresh(&tags_key("org-1"), 1_001.0));
}

// =============================================================
// Keys
// =============================================================

#[test]
fn keys_scope_by_id() {
    assert_eq!(memories_key("o"), "memories:o");
    assert_eq!(tags_key("o"), "tags:o");
}
