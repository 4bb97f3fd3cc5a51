//! BYOK gate wrapping the chat surfaces.
//!
//! SYSTEM CONTEXT
//! ==============
//! A user whose LLM preference is bring-your-own-key but who has stored no
//! OpenRouter key cannot chat; the backend would reject every ask. The gate
//! renders its children (the chat surface) and, while blocked, a modal that
//! only clears by saving a key or switching to the shared provider. The
//! shell fetches settings with zero stale time, so the gate always reflects
//! the latest server row.

use leptos::prelude::*;

use crate::net::api::SettingsPatch;
use crate::net::types::LlmPreference;
use crate::state::cache::{CacheLedger, SETTINGS_KEY};
use crate::state::settings::SettingsState;
use crate::state::ui::NoticesState;

/// Wraps a chat surface; overlays the key-setup modal while chat is blocked.
#[component]
pub fn ApiKeyGate(children: ChildrenFn) -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();

    view! {
        <div class="api-key-gate">
            {children()}
            <Show when=move || settings.get().chat_blocked()>
                <KeySetupModal/>
            </Show>
        </div>
    }
}

/// The blocking modal: paste a key, or fall back to the shared provider.
#[component]
fn KeySetupModal() -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();
    let cache = expect_context::<RwSignal<CacheLedger>>();

    let key = RwSignal::new(String::new());

    let on_save_key = move |_| {
        let value = key.get().trim().to_owned();
        if value.is_empty() || settings.get_untracked().saving {
            return;
        }
        settings.update(|s| s.saving = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::set_openrouter_key(&value).await {
                Ok(()) => {
                    cache.update(|c| c.invalidate(SETTINGS_KEY));
                    match crate::net::api::fetch_settings().await {
                        Ok(loaded) => settings.update(|s| s.accept(loaded)),
                        Err(e) => notices.update(|n| n.push(format!("Settings reload failed: {e}"))),
                    }
                }
                Err(e) => notices.update(|n| n.push(format!("Key save failed: {e}"))),
            }
            settings.update(|s| s.saving = false);
        });
    };

    let on_use_shared = move |_| {
        if settings.get_untracked().saving {
            return;
        }
        settings.update(|s| s.saving = true);
        let patch = SettingsPatch {
            llm_preference: Some(LlmPreference::Shared),
            ..SettingsPatch::default()
        };
        leptos::task::spawn_local(async move {
            match crate::net::api::update_settings(&patch).await {
                Ok(updated) => {
                    cache.update(|c| c.invalidate(SETTINGS_KEY));
                    settings.update(|s| s.accept(updated));
                }
                Err(e) => notices.update(|n| n.push(format!("Preference change failed: {e}"))),
            }
            settings.update(|s| s.saving = false);
        });
    };

    view! {
        <div class="dialog-backdrop dialog-backdrop--blocking">
            <div class="dialog api-key-modal">
                <h2>"Set up AI chat"</h2>
                <p>
                    "Your account is set to use your own OpenRouter key, but none is "
                    "stored yet. Paste a key below, or switch to the shared provider."
                </p>
                <input
                    class="dialog__input api-key-modal__key"
                    type="password"
                    placeholder="sk-or-..."
                    prop:value=move || key.get()
                    on:input=move |ev| key.set(event_target_value(&ev))
                />
                <div class="dialog__actions">
                    <button class="btn" disabled=move || settings.get().saving on:click=on_use_shared>
                        "Use shared provider"
                    </button>
                    <button
                        class="btn btn--primary"
                        disabled=move || settings.get().saving || key.get().trim().is_empty()
                        on:click=on_save_key
                    >
                        "Save key"
                    </button>
                </div>
            </div>
        </div>
    }
}
