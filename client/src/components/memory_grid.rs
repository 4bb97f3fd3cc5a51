//! Memory cards in grid or list arrangement.
//!
//! DESIGN
//! ======
//! Cards are presentation only: the page owns filtering and partitioning
//! and hands each section a plain `Vec<Memory>`, so one component serves
//! the pinned, active, and archived sections in both view modes. Stored
//! rich text is sanitized here, at the injection point.

use leptos::prelude::*;

use crate::net::types::{Memory, MemoryStatus};
use crate::state::memories::MemoryView;

/// One section of memory cards.
#[component]
pub fn MemoryGrid(
    items: Vec<Memory>,
    view_mode: MemoryView,
    on_open: Callback<Memory>,
    on_toggle_pin: Callback<Memory>,
    on_toggle_archive: Callback<Memory>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let list = view_mode == MemoryView::List;
    view! {
        <div class="memory-grid" class:memory-grid--list=list>
            {items
                .into_iter()
                .map(|memory| {
                    view! {
                        <MemoryCard
                            memory=memory
                            on_open=on_open
                            on_toggle_pin=on_toggle_pin
                            on_toggle_archive=on_toggle_archive
                            on_delete=on_delete
                        />
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

/// A single memory card. Clicking the card opens the editor; the small
/// actions stop propagation so they do not.
#[component]
fn MemoryCard(
    memory: Memory,
    on_open: Callback<Memory>,
    on_toggle_pin: Callback<Memory>,
    on_toggle_archive: Callback<Memory>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let card_class = format!("memory-card memory-card--{}", memory.color.as_str());
    let title = memory
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_owned());
    let body_html = crate::util::sanitize::clean(&memory.content_html);
    let published = memory.status == MemoryStatus::Published;
    let pinned = memory.is_pinned;
    let archived = memory.is_archived;
    let pin_title = if pinned { "Unpin" } else { "Pin" };
    let updated = crate::util::format::relative_time_now(&memory.updated_at);
    let tags = memory.tags.clone();
    let id = memory.id.clone();

    let open_memory = memory.clone();
    let pin_memory = memory.clone();
    let archive_memory = memory;

    view! {
        <div class=card_class on:click=move |_| on_open.run(open_memory.clone())>
            <div class="memory-card__head">
                <span class="memory-card__title">{title}</span>
                <button
                    class="memory-card__pin"
                    class:memory-card__pin--on=pinned
                    title=pin_title
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.stop_propagation();
                        on_toggle_pin.run(pin_memory.clone());
                    }
                >
                    {if pinned { "★" } else { "☆" }}
                </button>
            </div>

            <div class="memory-card__body" inner_html=body_html></div>

            {(!tags.is_empty())
                .then(|| {
                    view! {
                        <div class="memory-card__tags">
                            {tags
                                .iter()
                                .map(|tag| view! { <span class="memory-card__tag">{tag.clone()}</span> })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                })}

            <div class="memory-card__footer">
                {published.then(|| view! { <span class="memory-card__status">"Published"</span> })}
                <span class="memory-card__updated">{updated}</span>
                <span class="memory-card__spacer"></span>
                <button
                    class="memory-card__action"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.stop_propagation();
                        on_toggle_archive.run(archive_memory.clone());
                    }
                >
                    {if archived { "Restore" } else { "Archive" }}
                </button>
                <button
                    class="memory-card__action memory-card__action--delete"
                    aria-label="Delete memory"
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.stop_propagation();
                        on_delete.run(id.clone());
                    }
                >
                    "✕"
                </button>
            </div>
        </div>
    }
}
