//! Memory editor dialog: markdown body, live preview, palette, tags.
//!
//! DESIGN
//! ======
//! The dialog mounts fresh per open, so plain signals seeded from the
//! edited memory carry all field state. The body is markdown; every save
//! stores the raw text as `content` and its rendering as `content_html`.
//! Publish-on-create runs create then publish as two awaited calls with no
//! rollback: a created-but-unpublished memory is an accepted outcome when
//! the second call fails.

use leptos::prelude::*;

use crate::net::api::MemoryPatch;
use crate::net::types::{Memory, MemoryColor, MemoryStatus};
use crate::state::auth::AuthState;
use crate::state::memories::publishable;
use crate::state::ui::NoticesState;

/// Create/edit dialog for one memory. `memory: None` creates.
#[component]
pub fn MemoryEditor(
    memory: Option<Memory>,
    on_cancel: Callback<()>,
    on_saved: Callback<Memory>,
    on_deleted: Callback<String>,
) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();

    let memory_id = memory.as_ref().map(|m| m.id.clone());
    let status = memory.as_ref().map(|m| m.status).unwrap_or_default();
    let editing = memory_id.is_some();

    let title = RwSignal::new(memory.as_ref().and_then(|m| m.title.clone()).unwrap_or_default());
    let body = RwSignal::new(memory.as_ref().map(|m| m.content.clone()).unwrap_or_default());
    let color = RwSignal::new(memory.as_ref().map(|m| m.color).unwrap_or_default());
    let tags_input = RwSignal::new(memory.as_ref().map(|m| m.tags.join(", ")).unwrap_or_default());
    let busy = RwSignal::new(false);

    let save_id = memory_id.clone();
    let do_save = Callback::new(move |and_publish: bool| {
        if busy.get_untracked() {
            return;
        }
        let body_text = body.get_untracked();
        if and_publish && !publishable(&body_text) {
            return;
        }
        busy.set(true);

        let memory_id = save_id.clone();
        let patch = MemoryPatch {
            org_id: if memory_id.is_none() {
                auth.get_untracked().org_id
            } else {
                None
            },
            title: Some(title.get_untracked().trim().to_owned()),
            content: Some(body_text.clone()),
            content_html: Some(crate::util::markdown::render(&body_text)),
            color: Some(color.get_untracked()),
            tags: Some(crate::state::memories::normalize_tags(&tags_input.get_untracked())),
            ..MemoryPatch::default()
        };

        leptos::task::spawn_local(async move {
            let result = match memory_id.as_deref() {
                Some(id) => crate::net::api::update_memory(id, &patch).await,
                None => crate::net::api::create_memory(&patch).await,
            };
            match result {
                Ok(saved) => {
                    let finished = if and_publish {
                        match crate::net::api::publish_memory(&saved.id).await {
                            Ok(published) => published,
                            Err(e) => {
                                notices.update(|n| n.push(format!("Publish failed: {e}")));
                                saved
                            }
                        }
                    } else {
                        saved
                    };
                    on_saved.run(finished);
                    on_cancel.run(());
                }
                Err(e) => notices.update(|n| n.push(format!("Save failed: {e}"))),
            }
            busy.set(false);
        });
    });

    let delete_id = memory_id;
    let do_delete = Callback::new(move |()| {
        let Some(id) = delete_id.clone() else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_memory(&id).await {
                Ok(()) => {
                    on_deleted.run(id);
                    on_cancel.run(());
                }
                Err(e) => notices.update(|n| n.push(format!("Delete failed: {e}"))),
            }
            busy.set(false);
        });
    });

    let preview = move || crate::util::sanitize::clean(&crate::util::markdown::render(&body.get()));
    let can_publish = move || !busy.get() && publishable(&body.get());

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog memory-editor" on:click=move |ev| ev.stop_propagation()>
                <h2>{if editing { "Edit Memory" } else { "New Memory" }}</h2>

                <input
                    class="dialog__input memory-editor__title"
                    type="text"
                    placeholder="Title"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />

                <div class="memory-editor__panes">
                    <textarea
                        class="memory-editor__body"
                        placeholder="Write in markdown..."
                        prop:value=move || body.get()
                        on:input=move |ev| body.set(event_target_value(&ev))
                    ></textarea>
                    <div class="memory-editor__preview" inner_html=preview></div>
                </div>

                <div class="memory-editor__swatches">
                    {MemoryColor::ALL
                        .into_iter()
                        .map(|swatch| {
                            let swatch_class = format!("memory-swatch memory-swatch--{}", swatch.as_str());
                            view! {
                                <button
                                    class=swatch_class
                                    class:memory-swatch--selected=move || color.get() == swatch
                                    title=swatch.as_str()
                                    on:click=move |_| color.set(swatch)
                                ></button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>

                <input
                    class="dialog__input memory-editor__tags"
                    type="text"
                    placeholder="tags, comma separated"
                    prop:value=move || tags_input.get()
                    on:input=move |ev| tags_input.set(event_target_value(&ev))
                />

                <div class="dialog__actions">
                    <Show when=move || editing>
                        <button
                            class="btn btn--danger memory-editor__delete"
                            disabled=move || busy.get()
                            on:click=move |_| do_delete.run(())
                        >
                            "Delete"
                        </button>
                    </Show>
                    <span class="memory-editor__actions-spacer"></span>
                    {(status == MemoryStatus::Published)
                        .then(|| view! { <span class="memory-editor__published">"Published"</span> })}
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| do_save.run(false)>
                        "Save"
                    </button>
                    <Show when=move || status == MemoryStatus::Draft>
                        <button
                            class="btn btn--primary memory-editor__publish"
                            disabled=move || !can_publish()
                            on:click=move |_| do_save.run(true)
                        >
                            "Publish"
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
