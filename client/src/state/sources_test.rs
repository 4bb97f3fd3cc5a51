use super::*;
use crate::net::types::SourceType;

fn source(id: &str, status: SourceStatus) -> Source {
    Source {
        id: id.to_owned(),
        pocket_id: "p1".to_owned(),
        source_type: SourceType::Pdf,
        title: format!("doc-{id}.pdf"),
        url: None,
        storage_path: None,
        size_bytes: Some(1024),
        status,
        error_message: None,
        created_at: "2026-01-01T00:00:00Z".to_owned(),
    }
}

fn state_with(items: Vec<Source>) -> SourcesState {
    SourcesState {
        items,
        ..Default::default()
    }
}

// =============================================================
// Chat readiness
// =============================================================

#[test]
fn empty_rail_has_no_ready_source() {
    assert!(!SourcesState::default().has_ready_source());
}

#[test]
fn queued_sources_do_not_enable_chat() {
    let state = state_with(vec![source("a", SourceStatus::Queued), source("b", SourceStatus::Embedding)]);
    assert!(!state.has_ready_source());
}

#[test]
fn one_ready_source_enables_chat() {
    let state = state_with(vec![source("a", SourceStatus::Failed), source("b", SourceStatus::Ready)]);
    assert!(state.has_ready_source());
}

// =============================================================
// Polling
// =============================================================

#[test]
fn terminal_only_rail_stops_polling() {
    let state = state_with(vec![source("a", SourceStatus::Ready), source("b", SourceStatus::Failed)]);
    assert!(!state.needs_poll());
}

#[test]
fn mid_pipeline_source_keeps_polling() {
    for status in [
        SourceStatus::Queued,
        SourceStatus::Extracting,
        SourceStatus::Chunking,
        SourceStatus::Embedding,
    ] {
        let state = state_with(vec![source("a", status)]);
        assert!(state.needs_poll(), "{status:?} should keep the poll loop alive");
    }
}

#[test]
fn empty_rail_does_not_poll() {
    assert!(!SourcesState::default().needs_poll());
}

// =============================================================
// Upsert / remove
// =============================================================

#[test]
fn upsert_replaces_status_in_place() {
    let mut state = state_with(vec![source("a", SourceStatus::Queued)]);
    state.upsert(source("a", SourceStatus::Ready));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].status, SourceStatus::Ready);
}

#[test]
fn upsert_prepends_fresh_upload() {
    let mut state = state_with(vec![source("a", SourceStatus::Ready)]);
    state.upsert(source("b", SourceStatus::Queued));
    assert_eq!(state.items[0].id, "b");
}

#[test]
fn remove_drops_by_id() {
    let mut state = state_with(vec![source("a", SourceStatus::Ready), source("b", SourceStatus::Failed)]);
    state.remove("b");
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "a");
}

#[test]
fn failed_count_counts_only_failures() {
    let state = state_with(vec![
        source("a", SourceStatus::Failed),
        source("b", SourceStatus::Ready),
        source("c", SourceStatus::Failed),
    ]);
    assert_eq!(state.failed_count(), 2);
}
