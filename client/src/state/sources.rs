//! Source-rail state for one pocket: the ingested documents and their
//! pipeline progress.
//!
//! DESIGN
//! ======
//! Ingestion runs in an external worker, so the rail never knows more than
//! the last fetch. While any source is mid-pipeline the pocket page polls
//! `list_sources` on an interval; `needs_poll` is the loop's continue
//! condition. Chat readiness is derived here too: a pocket with no ready
//! source has nothing to answer from, so the ask input stays disabled.

#[cfg(test)]
#[path = "sources_test.rs"]
mod sources_test;

use crate::net::types::{PocketStats, Source, SourceStatus};

/// File-picker filter for the upload button.
pub const UPLOAD_ACCEPT: &str = ".pdf,.doc,.docx,.txt";

/// Poll interval while any source is mid-pipeline.
pub const SOURCE_POLL_SECS: u64 = 5;

/// Source-rail state for the open pocket.
#[derive(Clone, Debug, Default)]
pub struct SourcesState {
    pub items: Vec<Source>,
    pub loading: bool,
    pub error: Option<String>,
    /// An upload is in flight (init, PUT, or complete step).
    pub uploading: bool,
    pub stats: Option<PocketStats>,
}

impl SourcesState {
    /// True when at least one source finished ingestion; gates the ask input.
    #[must_use]
    pub fn has_ready_source(&self) -> bool {
        self.items.iter().any(|s| s.status == SourceStatus::Ready)
    }

    /// True while any source is still moving through the pipeline.
    #[must_use]
    pub fn needs_poll(&self) -> bool {
        self.items.iter().any(|s| !s.status.is_terminal())
    }

    /// Count of failed sources, for the rail's summary line.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|s| s.status == SourceStatus::Failed).count()
    }

    /// Replace a source by id, or prepend it when new (fresh uploads go on
    /// top).
    pub fn upsert(&mut self, source: Source) {
        if let Some(existing) = self.items.iter_mut().find(|s| s.id == source.id) {
            *existing = source;
        } else {
            self.items.insert(0, source);
        }
    }

    /// Drop a source by id.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|s| s.id != id);
    }
}
