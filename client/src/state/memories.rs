//! Memory-list state: the org's memories plus the client-side filter pipe.
//!
//! DESIGN
//! ======
//! The API returns the org's memories unfiltered; search, tag selection, and
//! the active/archived split all happen here. Mutations (pin, archive,
//! publish) patch the server and then `upsert` the returned row, so a card
//! moves between sections in the same render without a refetch.

#[cfg(test)]
#[path = "memories_test.rs"]
mod memories_test;

use crate::net::types::Memory;

/// Layout for the memory collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemoryView {
    #[default]
    Grid,
    List,
}

/// Filtered memories split into the two rendered sections.
#[derive(Debug, Default)]
pub struct MemoryBuckets<'a> {
    /// Pinned first, then by last update, newest first.
    pub active: Vec<&'a Memory>,
    /// Archived section, newest first.
    pub archived: Vec<&'a Memory>,
}

/// Shared memory-list state for the memories page.
#[derive(Clone, Debug, Default)]
pub struct MemoriesState {
    pub items: Vec<Memory>,
    /// Distinct tags across the org, for the filter chips.
    pub tags: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    /// Tags currently selected in the chip row. A memory matches when it
    /// carries any one of them.
    pub selected_tags: Vec<String>,
    pub view: MemoryView,
}

impl MemoriesState {
    /// Memories passing the current search and tag filters, in storage order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Memory> {
        let needle = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|m| matches_search(m, &needle) && matches_tags(m, &self.selected_tags))
            .collect()
    }

    /// Filtered memories split into active and archived sections. Both
    /// sections come from the same filtered pass, so a toggled card lands in
    /// its new section on the very next render.
    #[must_use]
    pub fn buckets(&self) -> MemoryBuckets<'_> {
        let mut buckets = MemoryBuckets::default();
        for memory in self.filtered() {
            if memory.is_archived {
                buckets.archived.push(memory);
            } else {
                buckets.active.push(memory);
            }
        }
        buckets
            .active
            .sort_by(|a, b| b.is_pinned.cmp(&a.is_pinned).then_with(|| b.updated_at.cmp(&a.updated_at)));
        buckets.archived.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        buckets
    }

    /// Select or deselect one filter tag.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_owned());
        }
    }

    /// Replace a memory by id, or prepend it when new.
    pub fn upsert(&mut self, memory: Memory) {
        if let Some(existing) = self.items.iter_mut().find(|m| m.id == memory.id) {
            *existing = memory;
        } else {
            self.items.insert(0, memory);
        }
    }

    /// Drop a memory by id.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|m| m.id != id);
    }
}

/// Case-insensitive substring match over title and body. An empty search
/// passes everything.
fn matches_search(memory: &Memory, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let title_hit = memory
        .title
        .as_deref()
        .is_some_and(|t| t.to_lowercase().contains(needle));
    title_hit || memory.content.to_lowercase().contains(needle)
}

/// Tag filter: no selection passes everything; otherwise any selected tag on
/// the memory is enough. Widening the selection can therefore only grow the
/// result set.
fn matches_tags(memory: &Memory, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|tag| memory.tags.contains(tag))
}

/// Publish gate: only non-blank content qualifies.
#[must_use]
pub fn publishable(content: &str) -> bool {
    !content.trim().is_empty()
}

/// Normalize the editor's comma-separated tag input: trim, lowercase, drop
/// blanks, dedup preserving first occurrence.
#[must_use]
pub fn normalize_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for piece in raw.split(',') {
        let tag = piece.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
