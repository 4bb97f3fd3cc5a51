//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    analytics::AnalyticsPage, login::LoginPage, memories::MemoriesPage, pocket::PocketPage,
    pockets::PocketsPage, settings::SettingsPage, tasks::TasksPage,
};
use crate::state::auth::AuthState;
use crate::state::cache::CacheLedger;
use crate::state::memories::MemoriesState;
use crate::state::settings::SettingsState;
use crate::state::ui::NoticesState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing. The
/// memories list and the fetch-freshness ledger live here rather than on the
/// memories page so quick route switches keep their data.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let settings = RwSignal::new(SettingsState::default());
    let notices = RwSignal::new(NoticesState::default());
    let memories = RwSignal::new(MemoriesState::default());
    let cache = RwSignal::new(CacheLedger::default());

    provide_context(auth);
    provide_context(settings);
    provide_context(notices);
    provide_context(memories);
    provide_context(cache);

    view! {
        <Stylesheet id="leptos" href="/pkg/pocketry.css"/>
        <Title text="Pocketry"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=MemoriesPage/>
                <Route path=StaticSegment("pockets") view=PocketsPage/>
                <Route path=(StaticSegment("pocket"), ParamSegment("id")) view=PocketPage/>
                <Route path=StaticSegment("tasks") view=TasksPage/>
                <Route path=StaticSegment("analytics") view=AnalyticsPage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
            </Routes>
        </Router>
    }
}
