#![recursion_limit = "256"]

//! # pocketry
//!
//! Leptos + WASM frontend for the Pocketry knowledge base: rich-text
//! memories, document pockets with ingestion status, and streaming AI chat
//! with citations.
//!
//! This crate contains pages, components, application state, network types,
//! the typed REST client, and the chat stream decoder. All business logic
//! lives in the external API service; this crate renders its data and
//! issues requests.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
