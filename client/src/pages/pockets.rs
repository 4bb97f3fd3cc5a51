//! Pockets page: the org's pocket list with create and delete dialogs.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::app_shell::AppShell;
use crate::net::types::Pocket;
use crate::state::auth::AuthState;
use crate::state::ui::NoticesState;

#[component]
pub fn PocketsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();
    let navigate = use_navigate();

    let pockets = RwSignal::new(Vec::<Pocket>::new());
    let loading = RwSignal::new(false);
    let load_error = RwSignal::new(None::<String>);

    let loaded = RwSignal::new(false);
    Effect::new(move || {
        if loaded.get() {
            return;
        }
        let Some(org_id) = auth.get().org_id else {
            return;
        };
        loaded.set(true);
        loading.set(true);
        leptos::task::spawn_local(async move {
            match crate::net::api::list_pockets(&org_id).await {
                Ok(items) => pockets.set(items),
                Err(e) => load_error.set(Some(e)),
            }
            loading.set(false);
        });
    });

    let show_create = RwSignal::new(false);
    let delete_pocket_id = RwSignal::new(None::<String>);
    let rename_target = RwSignal::new(None::<Pocket>);

    let on_create_cancel = Callback::new(move |()| show_create.set(false));
    let on_delete_cancel = Callback::new(move |()| delete_pocket_id.set(None));
    let on_rename_cancel = Callback::new(move |()| rename_target.set(None));

    let on_renamed = Callback::new(move |updated: Pocket| {
        pockets.update(|items| {
            if let Some(slot) = items.iter_mut().find(|p| p.id == updated.id) {
                *slot = updated;
            }
        });
        rename_target.set(None);
    });

    let navigate_open = navigate.clone();
    let on_open = Callback::new(move |id: String| {
        navigate_open(&format!("/pocket/{id}"), NavigateOptions::default());
    });

    let on_created = Callback::new(move |pocket: Pocket| {
        let id = pocket.id.clone();
        pockets.update(|items| items.insert(0, pocket));
        navigate(&format!("/pocket/{id}"), NavigateOptions::default());
    });

    let on_delete_confirm = Callback::new(move |()| {
        let Some(id) = delete_pocket_id.get_untracked() else {
            return;
        };
        delete_pocket_id.set(None);
        leptos::task::spawn_local(async move {
            match crate::net::api::delete_pocket(&id).await {
                Ok(()) => pockets.update(|items| items.retain(|p| p.id != id)),
                Err(e) => notices.update(|n| n.push(format!("Delete failed: {e}"))),
            }
        });
    });

    view! {
        <AppShell>
            <div class="pockets-page">
                <div class="pockets-page__toolbar">
                    <h2>"Pockets"</h2>
                    <span class="pockets-page__spacer"></span>
                    <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                        "+ New Pocket"
                    </button>
                </div>

                <Show when=move || load_error.get().is_some()>
                    <p class="pockets-page__error">{move || load_error.get().unwrap_or_default()}</p>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=move || view! { <p>"Loading pockets..."</p> }
                >
                    {move || {
                        let items = pockets.get();
                        if items.is_empty() {
                            return view! {
                                <div class="pockets-page__empty">
                                    <p>"No pockets yet. A pocket groups documents for isolated chat."</p>
                                    <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                                        "Create your first pocket"
                                    </button>
                                </div>
                            }
                                .into_any();
                        }
                        items
                            .into_iter()
                            .map(|pocket| {
                                let open_id = pocket.id.clone();
                                let delete_id = pocket.id.clone();
                                let rename_pocket = pocket.clone();
                                let description = pocket.description.clone().unwrap_or_default();
                                view! {
                                    <div class="pocket-card" on:click=move |_| on_open.run(open_id.clone())>
                                        <div class="pocket-card__head">
                                            <span class="pocket-card__name">{pocket.name.clone()}</span>
                                            {pocket
                                                .is_public
                                                .then(|| view! { <span class="pocket-card__public">"Public"</span> })}
                                        </div>
                                        {(!description.is_empty())
                                            .then(|| view! { <p class="pocket-card__description">{description.clone()}</p> })}
                                        <button
                                            class="pocket-card__rename"
                                            aria-label="Rename pocket"
                                            on:click=move |ev: leptos::ev::MouseEvent| {
                                                ev.stop_propagation();
                                                rename_target.set(Some(rename_pocket.clone()));
                                            }
                                        >
                                            "✎"
                                        </button>
                                        <button
                                            class="pocket-card__delete"
                                            aria-label="Delete pocket"
                                            on:click=move |ev: leptos::ev::MouseEvent| {
                                                ev.stop_propagation();
                                                delete_pocket_id.set(Some(delete_id.clone()));
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
                </Show>

                <Show when=move || show_create.get()>
                    <CreatePocketDialog on_cancel=on_create_cancel on_created=on_created/>
                </Show>
                <Show when=move || delete_pocket_id.get().is_some()>
                    <DeletePocketDialog on_cancel=on_delete_cancel on_confirm=on_delete_confirm/>
                </Show>
                {move || {
                    rename_target
                        .get()
                        .map(|pocket| {
                            view! {
                                <RenamePocketDialog
                                    pocket=pocket
                                    on_cancel=on_rename_cancel
                                    on_renamed=on_renamed
                                />
                            }
                        })
                }}
            </div>
        </AppShell>
    }
}

/// Modal dialog for creating a pocket.
#[component]
fn CreatePocketDialog(on_cancel: Callback<()>, on_created: Callback<Pocket>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();

    let name = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        let pocket_name = name.get_untracked().trim().to_owned();
        if pocket_name.is_empty() || busy.get_untracked() {
            return;
        }
        let Some(org_id) = auth.get_untracked().org_id else {
            return;
        };
        busy.set(true);
        leptos::task::spawn_local(async move {
            match crate::net::api::create_pocket(&org_id, &pocket_name).await {
                Ok(pocket) => {
                    on_created.run(pocket);
                    on_cancel.run(());
                }
                Err(e) => notices.update(|n| n.push(format!("Create failed: {e}"))),
            }
            busy.set(false);
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Create Pocket"</h2>
                <label class="dialog__label">
                    "Pocket Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| submit.run(())>
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Modal dialog for renaming a pocket and editing its description line.
#[component]
fn RenamePocketDialog(
    pocket: Pocket,
    on_cancel: Callback<()>,
    on_renamed: Callback<Pocket>,
) -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticesState>>();

    let pocket_id = StoredValue::new(pocket.id.clone());
    let name = RwSignal::new(pocket.name.clone());
    let description = RwSignal::new(pocket.description.clone().unwrap_or_default());
    let busy = RwSignal::new(false);

    let submit = Callback::new(move |()| {
        let next_name = name.get_untracked().trim().to_owned();
        if next_name.is_empty() || busy.get_untracked() {
            return;
        }
        let next_description = description.get_untracked().trim().to_owned();
        let id = pocket_id.get_value();
        busy.set(true);
        leptos::task::spawn_local(async move {
            let desc = (!next_description.is_empty()).then_some(next_description.as_str());
            match crate::net::api::update_pocket(&id, &next_name, desc).await {
                Ok(updated) => on_renamed.run(updated),
                Err(e) => notices.update(|n| n.push(format!("Rename failed: {e}"))),
            }
            busy.set(false);
        });
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Rename Pocket"</h2>
                <label class="dialog__label">
                    "Pocket Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                        on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                ev.prevent_default();
                                submit.run(());
                            }
                        }
                    />
                </label>
                <label class="dialog__label">
                    "Description"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" disabled=move || busy.get() on:click=move |_| submit.run(())>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Confirmation dialog before a pocket and its sources are removed.
#[component]
fn DeletePocketDialog(on_cancel: Callback<()>, on_confirm: Callback<()>) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Delete Pocket"</h2>
                <p class="dialog__danger">
                    "This permanently deletes the pocket, its sources, and its conversations."
                </p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--danger" on:click=move |_| on_confirm.run(())>
                        "Delete"
                    </button>
                </div>
            </div>
        </div>
    }
}
