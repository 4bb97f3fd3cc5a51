use super::*;
use crate::net::types::TaskType;

fn task(id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_owned(),
        task_type: TaskType::IngestFile,
        status,
        progress: 0,
        attempts: 1,
        last_error: None,
        created_at: "2026-01-01T00:00:00Z".to_owned(),
        sources: None,
    }
}

fn state_with(items: Vec<Task>) -> TasksState {
    TasksState {
        items,
        ..Default::default()
    }
}

// =============================================================
// counts
// =============================================================

#[test]
fn counts_empty_state_is_zero() {
    assert_eq!(TasksState::default().counts(), TaskCounts::default());
}

#[test]
fn counts_totals_each_status() {
    let state = state_with(vec![
        task("a", TaskStatus::Pending),
        task("b", TaskStatus::Processing),
        task("c", TaskStatus::Completed),
        task("d", TaskStatus::Failed),
        task("e", TaskStatus::Failed),
    ]);
    let counts = state.counts();
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.processing, 1);
    assert_eq!(counts.completed, 1);
    assert_eq!(counts.failed, 2);
}

// =============================================================
// Polling
// =============================================================

#[test]
fn pending_or_processing_keeps_polling() {
    assert!(state_with(vec![task("a", TaskStatus::Pending)]).needs_poll());
    assert!(state_with(vec![task("a", TaskStatus::Processing)]).needs_poll());
}

#[test]
fn settled_queue_stops_polling() {
    let state = state_with(vec![task("a", TaskStatus::Completed), task("b", TaskStatus::Failed)]);
    assert!(!state.needs_poll());
}

// =============================================================
// retry
// =============================================================

#[test]
fn only_failed_tasks_are_retryable() {
    assert!(retryable(&task("a", TaskStatus::Failed)));
    assert!(!retryable(&task("b", TaskStatus::Pending)));
    assert!(!retryable(&task("c", TaskStatus::Processing)));
    assert!(!retryable(&task("d", TaskStatus::Completed)));
}

#[test]
fn upsert_replaces_retried_task() {
    let mut state = state_with(vec![task("a", TaskStatus::Failed)]);
    state.upsert(task("a", TaskStatus::Pending));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].status, TaskStatus::Pending);
}

// =============================================================
// Labels
// =============================================================

#[test]
fn type_labels_name_the_ingest_kind() {
    assert_eq!(type_label(TaskType::IngestUrl), "URL ingest");
    assert_eq!(type_label(TaskType::IngestFile), "File ingest");
}

#[test]
fn status_labels_match_the_chips() {
    assert_eq!(status_label(TaskStatus::Pending), "Pending");
    assert_eq!(status_label(TaskStatus::Processing), "Processing");
    assert_eq!(status_label(TaskStatus::Completed), "Completed");
    assert_eq!(status_label(TaskStatus::Failed), "Failed");
}
