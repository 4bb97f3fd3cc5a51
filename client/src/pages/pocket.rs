//! Pocket page: per-pocket RAG chat beside the source rail.
//!
//! ARCHITECTURE
//! ============
//! The route-level coordinator for one pocket. It resolves the pocket row,
//! owns the sources signal (fetching plus the ingestion poll loop), the
//! chat thread for `/ask/stream`, and the draggable split between the chat
//! pane and the rail. The rail's mutations live in `SourcePanel`.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::api_key_gate::ApiKeyGate;
use crate::components::app_shell::AppShell;
use crate::components::chat::ChatPanel;
use crate::components::source_panel::SourcePanel;
use crate::net::types::Pocket;
use crate::state::chat::ChatThread;
use crate::state::settings::SettingsState;
use crate::state::sources::{SOURCE_POLL_SECS, SourcesState};
use crate::state::ui::{SPLIT_DEFAULT_PERCENT, split_percent_from_pointer};

/// localStorage key remembering the last conversation for a pocket, so a
/// revisit reloads its history.
fn conversation_storage_key(pocket_id: &str) -> String {
    format!("pocketry.conversation.{pocket_id}")
}

#[component]
pub fn PocketPage() -> impl IntoView {
    let settings = expect_context::<RwSignal<SettingsState>>();
    let params = use_params_map();
    let pocket_id = move || params.get().get("id").unwrap_or_default();

    let pocket = RwSignal::new(None::<Pocket>);
    let missing = RwSignal::new(false);
    let sources = RwSignal::new(SourcesState::default());
    let thread = RwSignal::new(ChatThread::default());

    // Resolve the pocket, its sources, stats, and any remembered
    // conversation whenever the route id changes.
    let loaded_id = RwSignal::new(String::new());
    Effect::new(move || {
        let id = pocket_id();
        if id.is_empty() || loaded_id.get() == id {
            return;
        }
        loaded_id.set(id.clone());
        pocket.set(None);
        missing.set(false);
        sources.set(SourcesState { loading: true, ..SourcesState::default() });
        thread.set(ChatThread::default());

        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_pocket(&id).await {
                Some(row) => pocket.set(Some(row)),
                None => {
                    missing.set(true);
                    sources.update(|s| s.loading = false);
                    return;
                }
            }
            match crate::net::api::list_sources(&id).await {
                Ok(items) => sources.update(|s| {
                    s.items = items;
                    s.error = None;
                    s.loading = false;
                }),
                Err(e) => sources.update(|s| {
                    s.error = Some(e);
                    s.loading = false;
                }),
            }
            if let Some(stats) = crate::net::api::pocket_stats(&id).await {
                sources.update(|s| s.stats = Some(stats));
            }
            if let Some(cid) = crate::util::storage::get(&conversation_storage_key(&id)) {
                if let Some(stored) = crate::net::api::pocket_messages(&cid).await {
                    thread.update(|t| t.load_stored(&cid, stored));
                }
            }
        });
    });

    // Re-list sources while any is mid-pipeline. The in-flight flag keeps a
    // slow response from stacking a second request on the next tick.
    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let in_flight = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(SOURCE_POLL_SECS)).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if !sources.get_untracked().needs_poll()
                    || in_flight.swap(true, std::sync::atomic::Ordering::Relaxed)
                {
                    continue;
                }
                let id = loaded_id.get_untracked();
                if !id.is_empty() {
                    if let Ok(items) = crate::net::api::list_sources(&id).await {
                        sources.update(|s| s.items = items);
                    }
                    if let Some(stats) = crate::net::api::pocket_stats(&id).await {
                        sources.update(|s| s.stats = Some(stats));
                    }
                }
                in_flight.store(false, std::sync::atomic::Ordering::Relaxed);
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_send = Callback::new(move |query: String| {
        thread.update(|t| t.begin(&query));
        #[cfg(feature = "hydrate")]
        {
            let id = loaded_id.get_untracked();
            if id.is_empty() {
                return;
            }
            let conversation_id = thread.get_untracked().conversation_id.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::stream::ask_pocket(
                    &id,
                    &query,
                    conversation_id.as_deref(),
                    |event| thread.update(|t| t.apply(event)),
                )
                .await;
                if let Err(e) = result {
                    thread.update(|t| t.apply(crate::net::stream_decode::StreamEvent::Error(e)));
                }
                if let Some(cid) = thread.get_untracked().conversation_id {
                    crate::util::storage::set(&conversation_storage_key(&id), &cid);
                }
            });
        }
    });

    // Chat pane width as a percentage, dragged via the divider.
    let split = RwSignal::new(SPLIT_DEFAULT_PERCENT);
    let dragging = RwSignal::new(false);
    let panes_ref = NodeRef::<leptos::html::Div>::new();

    let on_divider_pointer_down = move |ev: leptos::ev::PointerEvent| {
        dragging.set(true);
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;
            if let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) {
                let _ = target.set_pointer_capture(ev.pointer_id());
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_panes_pointer_move = move |ev: leptos::ev::PointerEvent| {
        if !dragging.get() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            if let Some(panes) = panes_ref.get_untracked() {
                let rect = panes.get_bounding_client_rect();
                split.set(split_percent_from_pointer(
                    f64::from(ev.client_x()),
                    rect.left(),
                    rect.width(),
                ));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = ev;
    };

    let on_panes_pointer_up = move |_ev: leptos::ev::PointerEvent| {
        dragging.set(false);
    };

    let chat_blocked = Signal::derive(move || {
        settings.get().chat_blocked() || !sources.get().has_ready_source()
    });
    let block_hint = move || {
        if settings.get().chat_blocked() {
            "Add your OpenRouter key in Settings to use chat."
        } else {
            "Add a source and wait for it to finish processing to start chatting."
        }
    };

    view! {
        <AppShell>
            {move || {
                if missing.get() {
                    return view! {
                        <div class="pocket-page__missing">
                            <h2>"Pocket not found"</h2>
                            <a href="/pockets">"Back to pockets"</a>
                        </div>
                    }
                        .into_any();
                }
                let name = pocket.get().map_or_else(|| "Loading...".to_owned(), |p| p.name);
                view! {
                    <div class="pocket-page">
                        <div class="pocket-page__head">
                            <a class="pocket-page__back" href="/pockets">"←"</a>
                            <h2 class="pocket-page__name">{name}</h2>
                        </div>
                        <div
                            class="pocket-page__panes"
                            node_ref=panes_ref
                            on:pointermove=on_panes_pointer_move
                            on:pointerup=on_panes_pointer_up
                            on:pointercancel=on_panes_pointer_up
                        >
                            <div
                                class="pocket-page__chat"
                                style=move || format!("width: {:.2}%;", split.get())
                            >
                                <ApiKeyGate>
                                    <ChatPanel
                                        thread=thread
                                        on_send=on_send
                                        send_blocked=chat_blocked
                                        block_hint=""
                                        placeholder="Ask about this pocket's sources..."
                                    />
                                </ApiKeyGate>
                                <Show when=move || chat_blocked.get()>
                                    <p class="pocket-page__hint">{block_hint}</p>
                                </Show>
                            </div>
                            <div
                                class="pocket-page__divider"
                                class:pocket-page__divider--dragging=move || dragging.get()
                                on:pointerdown=on_divider_pointer_down
                            ></div>
                            <div class="pocket-page__rail">
                                <SourcePanel pocket_id=loaded_id.get() sources=sources/>
                            </div>
                        </div>
                    </div>
                }
                    .into_any()
            }}
        </AppShell>
    }
}
