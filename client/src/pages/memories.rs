//! Memories page: the authenticated landing route.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two tabs share this route. "My Memories" renders the org's notes with
//! client-side search, tag filtering, and the active/archived split;
//! "General Chat" streams answers grounded in the org's published memories.
//! The memory list and freshness ledger live in app-level context so tab
//! and route switches inside the stale window skip the refetch.

use leptos::prelude::*;

use crate::components::api_key_gate::ApiKeyGate;
use crate::components::app_shell::AppShell;
use crate::components::chat::ChatPanel;
use crate::components::memory_editor::MemoryEditor;
use crate::components::memory_grid::MemoryGrid;
use crate::net::api::MemoryPatch;
use crate::net::types::{Conversation, Memory};
use crate::state::auth::AuthState;
use crate::state::cache::{CacheLedger, memories_key, now_ms, tags_key};
use crate::state::chat::ChatThread;
use crate::state::memories::{MemoriesState, MemoryView};
use crate::state::settings::SettingsState;
use crate::state::ui::{MemoriesTab, NoticesState};

#[component]
pub fn MemoriesPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let memories = expect_context::<RwSignal<MemoriesState>>();
    let cache = expect_context::<RwSignal<CacheLedger>>();
    let notices = expect_context::<RwSignal<NoticesState>>();

    let tab = RwSignal::new(MemoriesTab::default());

    // Editor dialog: `Some(None)` creates, `Some(Some(m))` edits.
    let editing = RwSignal::new(None::<Option<Memory>>);

    // Load the memory list and tag chips once the org resolves, skipping
    // re-fetches while the ledger still calls the last one fresh.
    Effect::new(move || {
        let Some(org_id) = auth.get().org_id else {
            return;
        };
        let list_key = memories_key(&org_id);
        let chips_key = tags_key(&org_id);
        let now = now_ms();
        let fetch_list = !cache.get_untracked().is_fresh(&list_key, now);
        let fetch_tags = !cache.get_untracked().is_fresh(&chips_key, now);
        if !fetch_list && !fetch_tags {
            return;
        }
        if fetch_list {
            memories.update(|m| m.loading = true);
        }
        leptos::task::spawn_local(async move {
            if fetch_list {
                match crate::net::api::list_memories(&org_id).await {
                    Ok(items) => {
                        memories.update(|m| {
                            m.items = items;
                            m.error = None;
                            m.loading = false;
                        });
                        cache.update(|c| c.mark(&list_key, now_ms()));
                    }
                    Err(e) => memories.update(|m| {
                        m.error = Some(e);
                        m.loading = false;
                    }),
                }
            }
            if fetch_tags {
                if let Ok(tags) = crate::net::api::memory_tags(&org_id).await {
                    memories.update(|m| m.tags = tags);
                    cache.update(|c| c.mark(&chips_key, now_ms()));
                }
            }
        });
    });

    let invalidate_memories = move || {
        cache.update(|c| {
            c.invalidate_prefix("memories:");
            c.invalidate_prefix("tags:");
        });
    };

    let on_open = Callback::new(move |memory: Memory| editing.set(Some(Some(memory))));
    let on_create = move |_| editing.set(Some(None));
    let on_editor_cancel = Callback::new(move |()| editing.set(None));

    let on_saved = Callback::new(move |memory: Memory| {
        memories.update(|m| m.upsert(memory));
        invalidate_memories();
    });

    let on_deleted = Callback::new(move |id: String| {
        memories.update(|m| m.remove(&id));
        invalidate_memories();
    });

    let on_toggle_pin = Callback::new(move |memory: Memory| {
        let id = memory.id.clone();
        let next = !memory.is_pinned;
        memories.update(|m| {
            m.upsert(Memory { is_pinned: next, ..memory });
        });
        let patch = MemoryPatch { is_pinned: Some(next), ..MemoryPatch::default() };
        leptos::task::spawn_local(async move {
            match crate::net::api::update_memory(&id, &patch).await {
                Ok(saved) => {
                    memories.update(|m| m.upsert(saved));
                    invalidate_memories();
                }
                Err(e) => notices.update(|n| n.push(format!("Pin failed: {e}"))),
            }
        });
    });

    // Flip the local copy first so the card moves sections on this render,
    // then persist and adopt the server row.
    let on_toggle_archive = Callback::new(move |memory: Memory| {
        let id = memory.id.clone();
        let next = !memory.is_archived;
        memories.update(|m| {
            m.upsert(Memory { is_archived: next, ..memory });
        });
        let patch = MemoryPatch { is_archived: Some(next), ..MemoryPatch::default() };
        leptos::task::spawn_local(async move {
            match crate::net::api::update_memory(&id, &patch).await {
                Ok(saved) => {
                    memories.update(|m| m.upsert(saved));
                    invalidate_memories();
                }
                Err(e) => notices.update(|n| n.push(format!("Archive failed: {e}"))),
            }
        });
    });

    let on_delete = Callback::new(move |id: String| {
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_memory(&id).await {
                Ok(()) => {
                    memories.update(|m| m.remove(&id));
                    invalidate_memories();
                }
                Err(e) => notices.update(|n| n.push(format!("Delete failed: {e}"))),
            }
        });
    });

    view! {
        <AppShell>
            <div class="memories-page">
                <div class="memories-page__tabs">
                    <button
                        class="memories-page__tab"
                        class:memories-page__tab--active=move || tab.get() == MemoriesTab::MyMemories
                        on:click=move |_| tab.set(MemoriesTab::MyMemories)
                    >
                        "My Memories"
                    </button>
                    <button
                        class="memories-page__tab"
                        class:memories-page__tab--active=move || tab.get() == MemoriesTab::GeneralChat
                        on:click=move |_| tab.set(MemoriesTab::GeneralChat)
                    >
                        "General Chat"
                    </button>
                </div>

                {move || match tab.get() {
                    MemoriesTab::MyMemories => view! {
                        <MemoryCollection
                            memories=memories
                            on_create=Callback::new(on_create)
                            on_open=on_open
                            on_toggle_pin=on_toggle_pin
                            on_toggle_archive=on_toggle_archive
                            on_delete=on_delete
                        />
                    }
                        .into_any(),
                    MemoriesTab::GeneralChat => view! { <GeneralChatTab/> }.into_any(),
                }}

                {move || {
                    editing
                        .get()
                        .map(|memory| {
                            view! {
                                <MemoryEditor
                                    memory=memory
                                    on_cancel=on_editor_cancel
                                    on_saved=on_saved
                                    on_deleted=on_deleted
                                />
                            }
                        })
                }}
            </div>
        </AppShell>
    }
}

/// The "My Memories" tab: toolbar, filter chips, and the card sections.
#[component]
fn MemoryCollection(
    memories: RwSignal<MemoriesState>,
    on_create: Callback<leptos::ev::MouseEvent>,
    on_open: Callback<Memory>,
    on_toggle_pin: Callback<Memory>,
    on_toggle_archive: Callback<Memory>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let sections = move || {
        let state = memories.get();
        let buckets = state.buckets();
        (
            buckets.active.into_iter().cloned().collect::<Vec<_>>(),
            buckets.archived.into_iter().cloned().collect::<Vec<_>>(),
        )
    };

    view! {
        <div class="memory-collection">
            <div class="memory-collection__toolbar">
                <input
                    class="memory-collection__search"
                    type="search"
                    placeholder="Search memories..."
                    prop:value=move || memories.get().search
                    on:input=move |ev| memories.update(|m| m.search = event_target_value(&ev))
                />
                <span class="memory-collection__spacer"></span>
                <button
                    class="btn memory-collection__view-toggle"
                    title="Toggle view"
                    on:click=move |_| {
                        memories.update(|m| {
                            m.view = match m.view {
                                MemoryView::Grid => MemoryView::List,
                                MemoryView::List => MemoryView::Grid,
                            };
                        });
                    }
                >
                    {move || match memories.get().view {
                        MemoryView::Grid => "List view",
                        MemoryView::List => "Grid view",
                    }}
                </button>
                <button class="btn btn--primary" on:click=move |ev| on_create.run(ev)>
                    "+ New Memory"
                </button>
            </div>

            {move || {
                let state = memories.get();
                (!state.tags.is_empty())
                    .then(|| {
                        let selected = state.selected_tags.clone();
                        view! {
                            <div class="memory-collection__chips">
                                {state
                                    .tags
                                    .iter()
                                    .map(|tag| {
                                        let tag = tag.clone();
                                        let chip_tag = tag.clone();
                                        let active = selected.contains(&tag);
                                        view! {
                                            <button
                                                class="memory-chip"
                                                class:memory-chip--active=active
                                                on:click=move |_| memories.update(|m| m.toggle_tag(&chip_tag))
                                            >
                                                {tag}
                                            </button>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                                {(!selected.is_empty())
                                    .then(|| {
                                        view! {
                                            <button
                                                class="memory-chip memory-chip--clear"
                                                on:click=move |_| memories.update(|m| m.selected_tags.clear())
                                            >
                                                "Clear"
                                            </button>
                                        }
                                    })}
                            </div>
                        }
                    })
            }}

            <Show when=move || memories.get().error.is_some()>
                <p class="memory-collection__error">{move || memories.get().error.unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !memories.get().loading
                fallback=move || view! { <p class="memory-collection__loading">"Loading memories..."</p> }
            >
                {move || {
                    let (active, archived) = sections();
                    let view_mode = memories.get().view;
                    if active.is_empty() && archived.is_empty() {
                        return view! {
                            <div class="memory-collection__empty">
                                <p>"No memories match."</p>
                                <button class="btn btn--primary" on:click=move |ev| on_create.run(ev)>
                                    "Create your first memory"
                                </button>
                            </div>
                        }
                            .into_any();
                    }
                    view! {
                        <MemoryGrid
                            items=active
                            view_mode=view_mode
                            on_open=on_open
                            on_toggle_pin=on_toggle_pin
                            on_toggle_archive=on_toggle_archive
                            on_delete=on_delete
                        />
                        {(!archived.is_empty())
                            .then(|| {
                                view! {
                                    <h3 class="memory-collection__archived-heading">"Archived"</h3>
                                    <MemoryGrid
                                        items=archived
                                        view_mode=view_mode
                                        on_open=on_open
                                        on_toggle_pin=on_toggle_pin
                                        on_toggle_archive=on_toggle_archive
                                        on_delete=on_delete
                                    />
                                }
                            })}
                    }
                        .into_any()
                }}
            </Show>
        </div>
    }
}

/// The "General Chat" tab: conversation list plus the shared chat panel,
/// streaming over the org's published memories.
#[component]
fn GeneralChatTab() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();

    let thread = RwSignal::new(ChatThread::default());
    let conversations = RwSignal::new(Vec::<Conversation>::new());

    let refresh_conversations = move || {
        let Some(org_id) = auth.get_untracked().org_id else {
            return;
        };
        leptos::task::spawn_local(async move {
            if let Some(items) = crate::net::api::general_conversations(&org_id).await {
                conversations.set(items);
            }
        });
    };

    let loaded = RwSignal::new(false);
    Effect::new(move || {
        if loaded.get() || !auth.get().ready() {
            return;
        }
        loaded.set(true);
        refresh_conversations();
    });

    let on_send = Callback::new(move |prompt: String| {
        thread.update(|t| t.begin(&prompt));
        #[cfg(feature = "hydrate")]
        {
            let Some(org_id) = auth.get_untracked().org_id else {
                return;
            };
            let conversation_id = thread.get_untracked().conversation_id.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::stream::ask_general(
                    &org_id,
                    &prompt,
                    conversation_id.as_deref(),
                    |event| thread.update(|t| t.apply(event)),
                )
                .await;
                if let Err(e) = result {
                    thread.update(|t| t.apply(crate::net::stream_decode::StreamEvent::Error(e)));
                }
                refresh_conversations();
            });
        }
    });

    let on_open_conversation = move |conversation: Conversation| {
        if thread.get_untracked().is_streaming() {
            return;
        }
        let id = conversation.id;
        leptos::task::spawn_local(async move {
            if let Some(stored) = crate::net::api::general_messages(&id).await {
                thread.update(|t| t.load_stored(&id, stored));
            }
        });
    };

    let on_delete_conversation = move |id: String| {
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_general_conversation(&id).await {
                Ok(()) => {
                    if thread.get_untracked().conversation_id.as_deref() == Some(id.as_str()) {
                        thread.update(ChatThread::clear);
                    }
                    refresh_conversations();
                }
                Err(e) => notices.update(|n| n.push(format!("Delete failed: {e}"))),
            }
        });
    };

    view! {
        <div class="general-chat">
            <aside class="general-chat__conversations">
                <div class="general-chat__conversations-head">
                    <span>"Conversations"</span>
                    <button
                        class="btn general-chat__new"
                        disabled=move || thread.get().is_streaming()
                        on:click=move |_| thread.update(ChatThread::clear)
                    >
                        "New"
                    </button>
                </div>
                {move || {
                    let items = conversations.get();
                    if items.is_empty() {
                        return view! { <p class="general-chat__none">"No conversations yet"</p> }.into_any();
                    }
                    items
                        .into_iter()
                        .map(|conversation| {
                            let open = conversation.clone();
                            let delete_id = conversation.id.clone();
                            let active = move || {
                                thread.get().conversation_id.as_deref() == Some(open.id.as_str())
                            };
                            let label = conversation
                                .title
                                .clone()
                                .filter(|t| !t.trim().is_empty())
                                .unwrap_or_else(|| "Untitled conversation".to_owned());
                            let opened = conversation.clone();
                            view! {
                                <div
                                    class="general-chat__conversation"
                                    class:general-chat__conversation--active=active
                                    on:click=move |_| on_open_conversation(opened.clone())
                                >
                                    <span class="general-chat__conversation-title">{label}</span>
                                    <button
                                        class="general-chat__conversation-delete"
                                        aria-label="Delete conversation"
                                        on:click=move |ev: leptos::ev::MouseEvent| {
                                            ev.stop_propagation();
                                            on_delete_conversation(delete_id.clone());
                                        }
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </aside>

            <ApiKeyGate>
                <ChatPanel
                    thread=thread
                    on_send=on_send
                    send_blocked=Signal::derive(move || settings.get().chat_blocked())
                    block_hint="Add your OpenRouter key in Settings to use chat."
                    placeholder="Ask across your published memories..."
                />
            </ApiKeyGate>
        </div>
    }
}
