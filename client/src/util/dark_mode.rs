//! Theme resolution and application.
//!
//! The stored preference lives in user settings server-side (`light`,
//! `dark`, or `system`); this module resolves it against the OS scheme and
//! applies a `data-theme` attribute to the `<html>` element.
//!
//! TRADE-OFFS
//! ==========
//! Theme application is best-effort browser-only behavior; SSR paths safely
//! no-op to keep server rendering deterministic, so the first client render
//! may restyle once settings arrive.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use crate::net::types::ThemePref;

/// Resolve a preference to dark (`true`) or light, given the OS scheme.
#[must_use]
pub fn resolve_with_system(pref: ThemePref, system_dark: bool) -> bool {
    match pref {
        ThemePref::Light => false,
        ThemePref::Dark => true,
        ThemePref::System => system_dark,
    }
}

/// Resolve a preference against the live `prefers-color-scheme` query.
#[must_use]
pub fn resolve(pref: ThemePref) -> bool {
    resolve_with_system(pref, system_prefers_dark())
}

/// Whether the OS currently prefers a dark scheme. `false` on the server.
#[must_use]
pub fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(dark: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("data-theme", if dark { "dark" } else { "light" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = dark;
    }
}
