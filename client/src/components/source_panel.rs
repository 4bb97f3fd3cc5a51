//! Source rail for one pocket: ingested documents, their pipeline status,
//! and the add-source actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The pocket page owns the [`SourcesState`] signal and the status polling;
//! this panel renders the rail and performs the source mutations (upload,
//! save URL, delete, reprocess, download) directly, pushing failures onto
//! the notice stack.

use leptos::prelude::*;

use crate::net::types::{Source, SourceStatus, SourceType};
use crate::state::sources::{SourcesState, UPLOAD_ACCEPT};
use crate::state::ui::NoticesState;

/// The rail: stats header, add-source actions, and the source list.
#[component]
pub fn SourcePanel(pocket_id: String, sources: RwSignal<SourcesState>) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticesState>>();

    let url_input = RwSignal::new(String::new());
    let file_ref = NodeRef::<leptos::html::Input>::new();

    let upload_pocket = pocket_id.clone();
    let on_file_change = move |_ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let Some(input) = file_ref.get_untracked() else {
                return;
            };
            let Some(file) = input.files().and_then(|list| list.item(0)) else {
                return;
            };
            input.set_value("");
            if sources.get_untracked().uploading {
                return;
            }
            sources.update(|s| s.uploading = true);
            let pocket_id = upload_pocket.clone();
            leptos::task::spawn_local(async move {
                match crate::net::api::upload_file(&pocket_id, file).await {
                    Ok(source) => sources.update(|s| s.upsert(source)),
                    Err(e) => notices.update(|n| n.push(format!("Upload failed: {e}"))),
                }
                sources.update(|s| s.uploading = false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = &upload_pocket;
    };

    let url_pocket = pocket_id;
    let on_save_url = Callback::new(move |()| {
        let url = url_input.get().trim().to_owned();
        if url.is_empty() || sources.get_untracked().uploading {
            return;
        }
        sources.update(|s| s.uploading = true);
        let pocket_id = url_pocket.clone();
        leptos::task::spawn_local(async move {
            match crate::net::api::save_url(&pocket_id, &url, None).await {
                Ok(source) => {
                    sources.update(|s| s.upsert(source));
                    url_input.set(String::new());
                }
                Err(e) => notices.update(|n| n.push(format!("Save URL failed: {e}"))),
            }
            sources.update(|s| s.uploading = false);
        });
    });

    let on_delete = Callback::new(move |id: String| {
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_source(&id).await {
                Ok(()) => sources.update(|s| s.remove(&id)),
                Err(e) => notices.update(|n| n.push(format!("Delete failed: {e}"))),
            }
        });
    });

    let on_reprocess = Callback::new(move |id: String| {
        leptos::task::spawn_local(async move {
            match crate::net::api::reprocess_source(&id).await {
                Ok(source) => sources.update(|s| s.upsert(source)),
                Err(e) => notices.update(|n| n.push(format!("Reprocess failed: {e}"))),
            }
        });
    });

    let on_download = Callback::new(move |id: String| {
        leptos::task::spawn_local(async move {
            match crate::net::api::download_ticket(&id).await {
                Ok(ticket) => {
                    #[cfg(feature = "hydrate")]
                    if let Some(window) = web_sys::window() {
                        let _ = window.open_with_url(&ticket.url);
                    }
                    #[cfg(not(feature = "hydrate"))]
                    let _ = ticket;
                }
                Err(e) => notices.update(|n| n.push(format!("Download failed: {e}"))),
            }
        });
    });

    view! {
        <div class="source-panel">
            <div class="source-panel__head">
                <span class="source-panel__title">"Sources"</span>
                {move || {
                    sources
                        .get()
                        .stats
                        .map(|stats| {
                            view! {
                                <span class="source-panel__stats">
                                    {format!("{} docs · {} chunks", stats.documents, stats.chunks)}
                                </span>
                            }
                        })
                }}
            </div>

            <div class="source-panel__actions">
                <label class="btn source-panel__upload">
                    {move || if sources.get().uploading { "Uploading..." } else { "Upload file" }}
                    <input
                        type="file"
                        accept=UPLOAD_ACCEPT
                        class="source-panel__file-input"
                        node_ref=file_ref
                        disabled=move || sources.get().uploading
                        on:change=on_file_change
                    />
                </label>
                <div class="source-panel__url-row">
                    <input
                        class="source-panel__url-input"
                        type="url"
                        placeholder="https://..."
                        prop:value=move || url_input.get()
                        on:input=move |ev| url_input.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                on_save_url.run(());
                            }
                        }
                    />
                    <button
                        class="btn"
                        disabled=move || sources.get().uploading
                        on:click=move |_| on_save_url.run(())
                    >
                        "Add URL"
                    </button>
                </div>
            </div>

            <Show when=move || sources.get().error.is_some()>
                <p class="source-panel__error">{move || sources.get().error.unwrap_or_default()}</p>
            </Show>

            {move || {
                let failed = sources.get().failed_count();
                (failed > 0).then(|| {
                    view! {
                        <p class="source-panel__failed-summary">
                            {format!("{failed} source{} failed", if failed == 1 { "" } else { "s" })}
                        </p>
                    }
                })
            }}

            <div class="source-panel__list">
                {move || {
                    let state = sources.get();
                    if state.loading && state.items.is_empty() {
                        return view! { <p class="source-panel__loading">"Loading sources..."</p> }.into_any();
                    }
                    if state.items.is_empty() {
                        return view! {
                            <p class="source-panel__empty">"No sources yet. Upload a file or add a URL."</p>
                        }
                            .into_any();
                    }
                    state
                        .items
                        .into_iter()
                        .map(|source| {
                            view! {
                                <SourceRow
                                    source=source
                                    on_delete=on_delete
                                    on_reprocess=on_reprocess
                                    on_download=on_download
                                />
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}

/// One source line: icon, title, size, status badge, row actions.
#[component]
fn SourceRow(
    source: Source,
    on_delete: Callback<String>,
    on_reprocess: Callback<String>,
    on_download: Callback<String>,
) -> impl IntoView {
    let status = source.status;
    let failed = status == SourceStatus::Failed;
    let badge_class = format!("source-row__badge source-row__badge--{}", status.label().to_lowercase());
    let badge_title = source.error_message.clone().unwrap_or_default();
    let size = source.size_bytes.map(crate::util::format::file_size);
    let is_file = source.source_type != SourceType::Url;
    let delete_id = source.id.clone();
    let reprocess_id = source.id.clone();
    let download_id = source.id.clone();

    view! {
        <div class="source-row" class:source-row--failed=failed>
            <span class="source-row__icon">{type_icon(source.source_type)}</span>
            <div class="source-row__meta">
                <span class="source-row__title" title=source.url.clone().unwrap_or_default()>
                    {source.title.clone()}
                </span>
                {size.map(|s| view! { <span class="source-row__size">{s}</span> })}
            </div>
            <span class=badge_class title=badge_title>
                {status.label()}
            </span>
            {failed
                .then(|| {
                    view! {
                        <button
                            class="source-row__action"
                            title="Retry ingestion"
                            on:click=move |_| on_reprocess.run(reprocess_id.clone())
                        >
                            "↻"
                        </button>
                    }
                })}
            {is_file
                .then(|| {
                    view! {
                        <button
                            class="source-row__action"
                            title="Download"
                            on:click=move |_| on_download.run(download_id.clone())
                        >
                            "↓"
                        </button>
                    }
                })}
            <button
                class="source-row__action source-row__action--delete"
                aria-label="Delete source"
                on:click=move |_| on_delete.run(delete_id.clone())
            >
                "✕"
            </button>
        </div>
    }
}

fn type_icon(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::Pdf => "📄",
        SourceType::Txt => "📃",
        SourceType::Docx => "📝",
        SourceType::Url => "🔗",
    }
}
