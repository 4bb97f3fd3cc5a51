//! Ingestion-task state for the org-wide tasks page.
//!
//! DESIGN
//! ======
//! Tasks mirror the worker's queue; the page polls while anything is
//! pending or processing, shows per-status counts, and exposes retry for
//! failed rows only.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use crate::net::types::{Task, TaskStatus, TaskType};

/// Poll interval while any task is still queued or running.
pub const TASK_POLL_SECS: u64 = 5;

/// Per-status totals for the summary chips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Task-table state.
#[derive(Clone, Debug, Default)]
pub struct TasksState {
    pub items: Vec<Task>,
    pub loading: bool,
    pub error: Option<String>,
}

impl TasksState {
    /// Totals per status over the current rows.
    #[must_use]
    pub fn counts(&self) -> TaskCounts {
        let mut counts = TaskCounts::default();
        for task in &self.items {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::Processing => counts.processing += 1,
                TaskStatus::Completed => counts.completed += 1,
                TaskStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }

    /// True while any task is still queued or running.
    #[must_use]
    pub fn needs_poll(&self) -> bool {
        self.items
            .iter()
            .any(|t| matches!(t.status, TaskStatus::Pending | TaskStatus::Processing))
    }

    /// Replace a task by id (after retry), or prepend when new.
    pub fn upsert(&mut self, task: Task) {
        if let Some(existing) = self.items.iter_mut().find(|t| t.id == task.id) {
            *existing = task;
        } else {
            self.items.insert(0, task);
        }
    }
}

/// Only failed tasks offer the retry action.
#[must_use]
pub fn retryable(task: &Task) -> bool {
    task.status == TaskStatus::Failed
}

/// Table label for a task kind.
#[must_use]
pub fn type_label(task_type: TaskType) -> &'static str {
    match task_type {
        TaskType::IngestUrl => "URL ingest",
        TaskType::IngestFile => "File ingest",
    }
}

/// Table label for a task status.
#[must_use]
pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "Pending",
        TaskStatus::Processing => "Processing",
        TaskStatus::Completed => "Completed",
        TaskStatus::Failed => "Failed",
    }
}
