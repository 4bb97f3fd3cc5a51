//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the authenticated chrome and the shared surfaces
//! (memory cards, chat threads, the source rail) while reading and writing
//! shared state from Leptos context providers. Page-specific dialogs stay
//! private to their pages.

pub mod api_key_gate;
pub mod app_shell;
pub mod chat;
pub mod memory_editor;
pub mod memory_grid;
pub mod source_panel;
