use super::*;
use crate::net::types::{MemoryColor, MemoryStatus};

fn memory(id: &str) -> Memory {
    Memory {
        id: id.to_owned(),
        org_id: "org-1".to_owned(),
        user_id: "user-1".to_owned(),
        title: Some(format!("Memory {id}")),
        content: String::new(),
        content_html: String::new(),
        color: MemoryColor::Default,
        tags: Vec::new(),
        status: MemoryStatus::Draft,
        is_pinned: false,
        is_archived: false,
        created_at: "2026-01-01T00:00:00Z".to_owned(),
        updated_at: "2026-01-01T00:00:00Z".to_owned(),
        published_at: None,
    }
}

fn state_with(items: Vec<Memory>) -> MemoriesState {
    MemoriesState {
        items,
        ..Default::default()
    }
}

// =============================================================
// Search filter
// =============================================================

#[test]
fn empty_search_passes_everything() {
    let state = state_with(vec![memory("a"), memory("b")]);
    assert_eq!(state.filtered().len(), 2);
}

#[test]
fn search_matches_title_case_insensitive() {
    let mut target = memory("a");
    target.title = Some("Grocery List".to_owned());
    let mut state = state_with(vec![target, memory("b")]);
    state.search = "gRoCeRy".to_owned();
    let hits = state.filtered();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a");
}

#[test]
fn search_matches_content() {
    let mut target = memory("a");
    target.content = "Remember the oat milk".to_owned();
    let mut state = state_with(vec![target, memory("b")]);
    state.search = "oat milk".to_owned();
    assert_eq!(state.filtered().len(), 1);
}

#[test]
fn search_ignores_surrounding_whitespace() {
    let mut target = memory("a");
    target.content = "alpha".to_owned();
    let mut state = state_with(vec![target]);
    state.search = "  alpha  ".to_owned();
    assert_eq!(state.filtered().len(), 1);
}

#[test]
fn search_with_no_match_returns_empty() {
    let mut state = state_with(vec![memory("a")]);
    state.search = "zzz".to_owned();
    assert!(state.filtered().is_empty());
}

#[test]
fn untitled_memory_still_matches_on_content() {
    let mut target = memory("a");
    target.title = None;
    target.content = "findable".to_owned();
    let mut state = state_with(vec![target]);
    state.search = "findable".to_owned();
    assert_eq!(state.filtered().len(), 1);
}

// =============================================================
// Tag filter
// =============================================================

#[test]
fn no_selected_tags_passes_everything() {
    let mut tagged = memory("a");
    tagged.tags = vec!["work".to_owned()];
    let state = state_with(vec![tagged, memory("b")]);
    assert_eq!(state.filtered().len(), 2);
}

#[test]
fn tag_filter_matches_any_selected_tag() {
    let mut a = memory("a");
    a.tags = vec!["work".to_owned()];
    let mut b = memory("b");
    b.tags = vec!["home".to_owned()];
    let mut c = memory("c");
    c.tags = vec!["travel".to_owned()];
    let mut state = state_with(vec![a, b, c]);
    state.selected_tags = vec!["work".to_owned(), "home".to_owned()];
    let hits = state.filtered();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|m| m.id == "a" || m.id == "b"));
}

#[test]
fn widening_tag_selection_never_shrinks_results() {
    let mut a = memory("a");
    a.tags = vec!["work".to_owned()];
    let mut b = memory("b");
    b.tags = vec!["home".to_owned()];
    let mut state = state_with(vec![a, b, memory("c")]);

    state.selected_tags = vec!["work".to_owned()];
    let narrow: Vec<String> = state.filtered().iter().map(|m| m.id.clone()).collect();

    state.selected_tags = vec!["work".to_owned(), "home".to_owned()];
    let wide: Vec<String> = state.filtered().iter().map(|m| m.id.clone()).collect();

    assert!(wide.len() >= narrow.len());
    assert!(narrow.iter().all(|id| wide.contains(id)));
}

#[test]
fn toggle_tag_selects_then_deselects() {
    let mut state = MemoriesState::default();
    state.toggle_tag("work");
    assert_eq!(state.selected_tags, vec!["work".to_owned()]);
    state.toggle_tag("work");
    assert!(state.selected_tags.is_empty());
}

// =============================================================
// Buckets
// =============================================================

#[test]
fn buckets_separate_archived_from_active() {
    let mut archived = memory("old");
    archived.is_archived = true;
    let state = state_with(vec![memory("live"), archived]);
    let buckets = state.buckets();
    assert_eq!(buckets.active.len(), 1);
    assert_eq!(buckets.active[0].id, "live");
    assert_eq!(buckets.archived.len(), 1);
    assert_eq!(buckets.archived[0].id, "old");
}

#[test]
fn active_bucket_orders_pinned_first_then_recent() {
    let mut oldest = memory("oldest");
    oldest.updated_at = "2026-01-01T00:00:00Z".to_owned();
    let mut newest = memory("newest");
    newest.updated_at = "2026-03-01T00:00:00Z".to_owned();
    let mut pinned = memory("pinned");
    pinned.is_pinned = true;
    pinned.updated_at = "2026-02-01T00:00:00Z".to_owned();

    let state = state_with(vec![oldest, newest, pinned]);
    let ids: Vec<&str> = state.buckets().active.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["pinned", "newest", "oldest"]);
}

#[test]
fn archiving_moves_a_card_across_buckets_in_one_update() {
    let mut state = state_with(vec![memory("m1"), memory("m2")]);
    assert_eq!(state.buckets().active.len(), 2);
    assert!(state.buckets().archived.is_empty());

    let mut patched = state.items[0].clone();
    patched.is_archived = true;
    state.upsert(patched);

    let buckets = state.buckets();
    assert_eq!(buckets.active.len(), 1);
    assert_eq!(buckets.archived.len(), 1);
    assert_eq!(buckets.archived[0].id, "m1");
}

#[test]
fn filters_apply_to_archived_section_too() {
    let mut hit = memory("hit");
    hit.is_archived = true;
    hit.content = "tax return".to_owned();
    let mut miss = memory("miss");
    miss.is_archived = true;
    let mut state = state_with(vec![hit, miss]);
    state.search = "tax".to_owned();
    let buckets = state.buckets();
    assert_eq!(buckets.archived.len(), 1);
    assert_eq!(buckets.archived[0].id, "hit");
}

// =============================================================
// Upsert / remove
// =============================================================

#[test]
fn upsert_replaces_existing_row() {
    let mut state = state_with(vec![memory("a")]);
    let mut updated = memory("a");
    updated.title = Some("Renamed".to_owned());
    state.upsert(updated);
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].title.as_deref(), Some("Renamed"));
}

#[test]
fn upsert_prepends_new_row() {
    let mut state = state_with(vec![memory("a")]);
    state.upsert(memory("b"));
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].id, "b");
}

#[test]
fn remove_drops_by_id() {
    let mut state = state_with(vec![memory("a"), memory("b")]);
    state.remove("a");
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "b");
}

// =============================================================
// Publish gate
// =============================================================

#[test]
fn blank_content_is_not_publishable() {
    assert!(!publishable(""));
    assert!(!publishable("   \n\t  "));
}

#[test]
fn real_content_is_publishable() {
    assert!(publishable("one line"));
}

// =============================================================
// Tag normalization
// =============================================================

#[test]
fn normalize_tags_trims_and_lowercases() {
    assert_eq!(
        normalize_tags(" Work , HOME "),
        vec!["work".to_owned(), "home".to_owned()]
    );
}

#[test]
fn normalize_tags_dedups_preserving_first() {
    assert_eq!(normalize_tags("a, b, A, a"), vec!["a".to_owned(), "b".to_owned()]);
}

#[test]
fn normalize_tags_drops_empty_pieces() {
    assert_eq!(normalize_tags(", ,a,,"), vec!["a".to_owned()]);
}

#[test]
fn normalize_tags_empty_input_yields_empty() {
    assert!(normalize_tags("").is_empty());
}
