//! Authenticated page chrome: top navigation, session bootstrap, notices.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every authenticated page wraps its content in [`AppShell`]. The shell
//! resolves the session exactly once per visit (current user, then org
//! membership with a one-shot repair when the signup trigger left none),
//! redirects to `/login` when there is no user, applies the stored theme,
//! and renders the notice stack that mutation failures push onto.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::AuthState;
use crate::state::cache::{CacheLedger, SETTINGS_KEY, now_ms};
use crate::state::settings::SettingsState;
use crate::state::ui::NoticesState;

/// Chrome around authenticated pages: topbar, bootstrap, notices.
#[component]
pub fn AppShell(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();

    let navigate = use_navigate();
    crate::util::auth::install_unauth_redirect(auth, navigate);

    // Resolve the session once; later shell mounts reuse the adopted org.
    let started = RwSignal::new(false);
    Effect::new(move || {
        if started.get() {
            return;
        }
        started.set(true);
        if auth.get_untracked().ready() {
            return;
        }
        auth.update(|a| a.loading = true);
        leptos::task::spawn_local(async move {
            bootstrap_session(auth).await;
        });
    });

    // Fetch settings through the freshness ledger once the session
    // resolves; the theme effect below and the chat gate both read them.
    // The settings family has a zero stale time, so every shell mount
    // re-checks the gate against the backend.
    let cache = expect_context::<RwSignal<CacheLedger>>();
    Effect::new(move || {
        if !auth.get().ready() {
            return;
        }
        let now = now_ms();
        if cache.get_untracked().is_fresh(SETTINGS_KEY, now) || settings.get_untracked().loading {
            return;
        }
        cache.update(|c| c.mark(SETTINGS_KEY, now));
        settings.update(|s| s.loading = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_settings().await {
                Ok(loaded) => settings.update(|s| {
                    s.accept(loaded);
                    s.loading = false;
                }),
                Err(e) => settings.update(|s| {
                    s.error = Some(e);
                    s.loading = false;
                }),
            }
        });
    });

    // Re-apply the theme whenever the stored preference changes.
    Effect::new(move || {
        let pref = settings.get().settings.map(|s| s.theme).unwrap_or_default();
        crate::util::dark_mode::apply(crate::util::dark_mode::resolve(pref));
    });

    let on_sign_out = Callback::new(move |()| {
        crate::util::auth::clear_token();
        auth.update(|a| *a = AuthState::default());
        #[cfg(feature = "hydrate")]
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    });

    view! {
        <div class="app-shell">
            <header class="app-shell__topbar">
                <a class="app-shell__brand" href="/">"Pocketry"</a>
                <nav class="app-shell__nav">
                    <NavLink href="/" label="Memories"/>
                    <NavLink href="/pockets" label="Pockets"/>
                    <NavLink href="/tasks" label="Tasks"/>
                    <NavLink href="/analytics" label="Analytics"/>
                    <NavLink href="/settings" label="Settings"/>
                </nav>
                <span class="app-shell__spacer"></span>
                <span class="app-shell__org">{move || auth.get().org_name.unwrap_or_default()}</span>
                <button class="btn app-shell__signout" on:click=move |_| on_sign_out.run(())>
                    "Sign out"
                </button>
            </header>

            <NoticeStack notices=notices/>

            <main class="app-shell__main">
                {move || {
                    let state = auth.get();
                    if let Some(detail) = state.setup_error {
                        view! { <SetupErrorPanel detail=detail on_sign_out=on_sign_out/> }.into_any()
                    } else if state.ready() {
                        children().into_any()
                    } else {
                        view! {
                            <p class="app-shell__loading">
                                {if state.loading { "Loading..." } else { "Redirecting to login..." }}
                            </p>
                        }
                            .into_any()
                    }
                }}
            </main>
        </div>
    }
}

/// Topbar link that highlights itself on its own route.
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    let pathname = use_location().pathname;
    view! {
        <a
            class="app-shell__link"
            class:app-shell__link--active=move || pathname.get() == href
            href=href
        >
            {label}
        </a>
    }
}

/// Dismissible notice lines pushed by failed mutations.
#[component]
fn NoticeStack(notices: RwSignal<NoticesState>) -> impl IntoView {
    view! {
        <div class="notice-stack">
            {move || {
                notices
                    .get()
                    .items
                    .into_iter()
                    .map(|notice| {
                        let id = notice.id;
                        view! {
                            <div class="notice">
                                <span class="notice__text">{notice.text}</span>
                                <button
                                    class="notice__dismiss"
                                    on:click=move |_| notices.update(|n| n.dismiss(id))
                                    aria-label="Dismiss"
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

/// Terminal bootstrap failure: show the diagnostic and offer sign out.
#[component]
fn SetupErrorPanel(detail: String, on_sign_out: Callback<()>) -> impl IntoView {
    view! {
        <div class="setup-error">
            <h2>"Workspace setup failed"</h2>
            <p>"Your account has no workspace and one could not be created."</p>
            <pre class="setup-error__detail">{detail}</pre>
            <button class="btn" on:click=move |_| on_sign_out.run(())>
                "Sign out"
            </button>
        </div>
    }
}

/// Resolve user and org membership, repairing a missing membership once.
///
/// The signup trigger normally provisions an org; when it has not, create
/// one named after the email local part and re-list a single time. Two tabs
/// racing here can both create an org; accepted, the backend keeps both and
/// the first listed owner org wins.
async fn bootstrap_session(auth: RwSignal<AuthState>) {
    let Some(user) = crate::net::api::fetch_current_user().await else {
        auth.update(|a| {
            a.user = None;
            a.loading = false;
        });
        return;
    };
    let email = user.email.clone();
    auth.update(|a| a.user = Some(user));

    let memberships = crate::net::api::list_orgs().await.unwrap_or_default();
    if let Some(membership) = crate::state::auth::pick_membership(&memberships) {
        let membership = membership.clone();
        auth.update(|a| {
            a.adopt(&membership);
            a.loading = false;
        });
        return;
    }

    leptos::logging::warn!("no org membership found, attempting repair");
    let org_name = crate::state::auth::fallback_org_name(&email);
    let create_error = crate::net::api::create_org(&org_name).await.err();

    let memberships = crate::net::api::list_orgs().await.unwrap_or_default();
    if let Some(membership) = crate::state::auth::pick_membership(&memberships) {
        let membership = membership.clone();
        auth.update(|a| {
            a.adopt(&membership);
            a.loading = false;
        });
        return;
    }

    auth.update(|a| {
        a.setup_error = Some(crate::state::auth::setup_failure_message(
            &email,
            create_error.as_deref(),
        ));
        a.loading = false;
    });
}
