//! Analytics page: org-wide usage counters.

use leptos::prelude::*;

use crate::components::app_shell::AppShell;
use crate::net::types::OrgAnalytics;
use crate::state::auth::AuthState;

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let analytics = RwSignal::new(None::<OrgAnalytics>);
    let loading = RwSignal::new(false);

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
            analytics.set(crate::net::api::analytics(&org_id).await);
            loading.set(false);
        });
    });

    view! {
        <AppShell>
            <div class="analytics-page">
                <h2>"Analytics"</h2>
                {move || {
                    if loading.get() {
                        return view! { <p>"Loading analytics..."</p> }.into_any();
                    }
                    match analytics.get() {
                        Some(counters) => view! {
                            <div class="analytics-page__cards">
                                <StatCard label="Pockets" value=counters.pockets/>
                                <StatCard label="Sources" value=counters.sources/>
                                <StatCard label="Chunks" value=counters.chunks/>
                                <StatCard label="Conversations" value=counters.conversations/>
                                <StatCard label="Messages" value=counters.messages/>
                            </div>
                        }
                            .into_any(),
                        None => view! { <p class="analytics-page__empty">"No analytics available."</p> }
                            .into_any(),
                    }
                }}
            </div>
        </AppShell>
    }
}

#[component]
fn StatCard(label: &'static str, value: i64) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__value">{value}</span>
            <span class="stat-card__label">{label}</span>
        </div>
    }
}
