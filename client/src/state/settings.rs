//! User-settings state and the BYOK chat gate.
//!
//! DESIGN
//! ======
//! Settings are always re-fetched (zero stale time) because the chat gate
//! depends on them: a user who picked their own OpenRouter key but has not
//! stored one yet must see the key prompt instead of a chat input that
//! would only fail server-side.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use crate::net::types::{LlmPreference, UserSettings};

/// Settings-page and chat-gate state.
#[derive(Clone, Debug, Default)]
pub struct SettingsState {
    /// Loaded settings; `None` until the first fetch resolves.
    pub settings: Option<UserSettings>,
    pub loading: bool,
    pub error: Option<String>,
    /// A patch or key change is in flight.
    pub saving: bool,
}

impl SettingsState {
    /// True when chat must be replaced by the key prompt: the user chose to
    /// bring their own key and has not stored one. Unloaded settings do not
    /// block chat; the backend enforces the same rule authoritatively.
    #[must_use]
    pub fn chat_blocked(&self) -> bool {
        self.settings.as_ref().is_some_and(|s| {
            s.llm_preference == LlmPreference::Byokey && !s.has_openrouter_key
        })
    }

    /// Apply a fresh server row.
    pub fn accept(&mut self, settings: UserSettings) {
        self.settings = Some(settings);
        self.error = None;
    }
}
