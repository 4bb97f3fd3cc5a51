//! Client-side state modules, provided to the component tree as
//! `RwSignal<T>` contexts or owned by the page that needs them.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` carries the session and org bootstrap, `cache` tracks fetch
//! freshness, and the remaining modules hold one view domain each. All of
//! them are plain structs with pure methods so the logic unit-tests without
//! a browser.

pub mod auth;
pub mod cache;
pub mod chat;
pub mod memories;
pub mod settings;
pub mod sources;
pub mod tasks;
pub mod ui;
