//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, theming)
//! and pure text transforms (markdown, sanitizing, formatting) from page and
//! component logic to improve reuse and testability.

pub mod auth;
pub mod dark_mode;
pub mod format;
pub mod markdown;
pub mod sanitize;
pub mod storage;
