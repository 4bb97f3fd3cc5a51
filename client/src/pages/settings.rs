//! Settings page: theme, LLM preference, and the OpenRouter key.
//!
//! SYSTEM CONTEXT
//! ==============
//! The settings row itself is fetched by the shell (zero stale time, the
//! BYOK gate depends on it); this page renders and mutates it. Theme
//! changes apply immediately through the shell's theme effect and persist
//! via `PATCH /settings`. The OpenRouter key is write-only: it is stored
//! encrypted by the backend and only its presence flag ever comes back.

use leptos::prelude::*;

use crate::components::app_shell::AppShell;
use crate::net::api::SettingsPatch;
use crate::net::types::{LlmPreference, ThemePref, UserSettings};
use crate::state::cache::{CacheLedger, SETTINGS_KEY};
use crate::state::settings::SettingsState;
use crate::state::ui::NoticesState;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();
    let cache = expect_context::<RwSignal<CacheLedger>>();

    let key_input = RwSignal::new(String::new());

    let patch_settings = move |patch: SettingsPatch| {
        if settings.get_untracked().saving {
            return;
        }
        settings.update(|s| s.saving = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::update_settings(&patch).await {
                Ok(updated) => {
                    cache.update(|c| c.invalidate(SETTINGS_KEY));
                    settings.update(|s| s.accept(updated));
                }
                Err(e) => notices.update(|n| n.push(format!("Save failed: {e}"))),
            }
            settings.update(|s| s.saving = false);
        });
    };

    let on_save_key = move |_| {
        let key = key_input.get_untracked().trim().to_owned();
        if key.is_empty() || settings.get_untracked().saving {
            return;
        }
        settings.update(|s| s.saving = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::set_openrouter_key(&key).await {
                Ok(()) => {
                    key_input.set(String::new());
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

    let on_remove_key = move |_| {
        if settings.get_untracked().saving {
            return;
        }
        settings.update(|s| s.saving = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_openrouter_key().await {
                Ok(()) => {
                    cache.update(|c| c.invalidate(SETTINGS_KEY));
                    match crate::net::api::fetch_settings().await {
                        Ok(loaded) => settings.update(|s| s.accept(loaded)),
                        Err(e) => notices.update(|n| n.push(format!("Settings reload failed: {e}"))),
                    }
                }
                Err(e) => notices.update(|n| n.push(format!("Key removal failed: {e}"))),
            }
            settings.update(|s| s.saving = false);
        });
    };

    let current = move || settings.get().settings.unwrap_or_default();
    let saving = move || settings.get().saving;

    view! {
        <AppShell>
            <div class="settings-page">
                <h2>"Settings"</h2>

                <section class="settings-section">
                    <h3>"Theme"</h3>
                    <div class="settings-section__choices">
                        <ThemeChoice
                            pref=ThemePref::Light
                            label="Light"
                            current=Signal::derive(current)
                            saving=Signal::derive(saving)
                            on_pick=Callback::new(move |pref| {
                                patch_settings(SettingsPatch { theme: Some(pref), ..SettingsPatch::default() });
                            })
                        />
                        <ThemeChoice
                            pref=ThemePref::Dark
                            label="Dark"
                            current=Signal::derive(current)
                            saving=Signal::derive(saving)
                            on_pick=Callback::new(move |pref| {
                                patch_settings(SettingsPatch { theme: Some(pref), ..SettingsPatch::default() });
                            })
                        />
                        <ThemeChoice
                            pref=ThemePref::System
                            label="System"
                            current=Signal::derive(current)
                            saving=Signal::derive(saving)
                            on_pick=Callback::new(move |pref| {
                                patch_settings(SettingsPatch { theme: Some(pref), ..SettingsPatch::default() });
                            })
                        />
                    </div>
                </section>

                <section class="settings-section">
                    <h3>"AI Provider"</h3>
                    <label class="settings-section__radio">
                        <input
                            type="radio"
                            name="llm-preference"
                            prop:checked=move || current().llm_preference == LlmPreference::Shared
                            disabled=saving
                            on:change=move |_| {
                                patch_settings(SettingsPatch {
                                    llm_preference: Some(LlmPreference::Shared),
                                    ..SettingsPatch::default()
                                });
                            }
                        />
                        "Shared platform credential"
                    </label>
                    <label class="settings-section__radio">
                        <input
                            type="radio"
                            name="llm-preference"
                            prop:checked=move || current().llm_preference == LlmPreference::Byokey
                            disabled=saving
                            on:change=move |_| {
                                patch_settings(SettingsPatch {
                                    llm_preference: Some(LlmPreference::Byokey),
                                    ..SettingsPatch::default()
                                });
                            }
                        />
                        "My own OpenRouter key"
                    </label>
                </section>

                <section class="settings-section">
                    <h3>"OpenRouter Key"</h3>
                    {move || {
                        if current().has_openrouter_key {
                            view! {
                                <div class="settings-section__key-row">
                                    <span class="settings-section__key-set">"A key is stored (encrypted)."</span>
                                    <button class="btn btn--danger" disabled=saving on:click=on_remove_key>
                                        "Remove key"
                                    </button>
                                </div>
                            }
                                .into_any()
                        } else {
                            view! {
                                <div class="settings-section__key-row">
                                    <input
                                        class="dialog__input settings-section__key-input"
                                        type="password"
                                        placeholder="sk-or-..."
                                        prop:value=move || key_input.get()
                                        on:input=move |ev| key_input.set(event_target_value(&ev))
                                    />
                                    <button
                                        class="btn btn--primary"
                                        disabled=move || saving() || key_input.get().trim().is_empty()
                                        on:click=on_save_key
                                    >
                                        "Save key"
                                    </button>
                                </div>
                            }
                                .into_any()
                        }
                    }}
                </section>
            </div>
        </AppShell>
    }
}

/// One theme radio button.
#[component]
fn ThemeChoice(
    pref: ThemePref,
    label: &'static str,
    current: Signal<UserSettings>,
    saving: Signal<bool>,
    on_pick: Callback<ThemePref>,
) -> impl IntoView {
    view! {
        <label class="settings-section__radio">
            <input
                type="radio"
                name="theme"
                prop:checked=move || current.get().theme == pref
                disabled=move || saving.get()
                on:change=move |_| on_pick.run(pref)
            />
            {label}
        </label>
    }
}
