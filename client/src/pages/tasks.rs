//! Tasks page: the org's ingestion queue as the worker reports it.

use leptos::prelude::*;

use crate::components::app_shell::AppShell;
use crate::net::types::{Task, TaskStatus};
use crate::state::auth::AuthState;
use crate::state::tasks::{TASK_POLL_SECS, TasksState, retryable, status_label, type_label};
use crate::state::ui::NoticesState;

#[component]
pub fn TasksPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticesState>>();

    let tasks = RwSignal::new(TasksState::default());

    let loaded = RwSignal::new(false);
    Effect::new(move || {
        if loaded.get() {
            return;
        }
        let Some(org_id) = auth.get().org_id else {
            return;
        };
        loaded.set(true);
        tasks.update(|t| t.loading = true);
        leptos::task::spawn_local(async move {
            match crate::net::api::list_tasks(&org_id).await {
                Ok(items) => tasks.update(|t| {
                    t.items = items;
                    t.error = None;
                    t.loading = false;
                }),
                Err(e) => tasks.update(|t| {
                    t.error = Some(e);
                    t.loading = false;
                }),
            }
        });
    });

    // Keep the table live while the worker is busy.
    #[cfg(feature = "hydrate")]
    {
        let alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let in_flight = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_secs(TASK_POLL_SECS)).await;
                if !alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                if !tasks.get_untracked().needs_poll()
                    || in_flight.swap(true, std::sync::atomic::Ordering::Relaxed)
                {
                    continue;
                }
                if let Some(org_id) = auth.get_untracked().org_id {
                    if let Ok(items) = crate::net::api::list_tasks(&org_id).await {
                        tasks.update(|t| t.items = items);
                    }
                }
                in_flight.store(false, std::sync::atomic::Ordering::Relaxed);
            }
        });
        on_cleanup(move || alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_retry = Callback::new(move |id: String| {
        leptos::task::spawn_local(async move {
            match crate::net::api::retry_task(&id).await {
                Ok(task) => tasks.update(|t| t.upsert(task)),
                Err(e) => notices.update(|n| n.push(format!("Retry failed: {e}"))),
            }
        });
    });

    view! {
        <AppShell>
            <div class="tasks-page">
                <h2>"Ingestion Tasks"</h2>

                {move || {
                    let counts = tasks.get().counts();
                    view! {
                        <div class="tasks-page__summary">
                            <span class="task-count task-count--pending">
                                {format!("{} pending", counts.pending)}
                            </span>
                            <span class="task-count task-count--processing">
                                {format!("{} processing", counts.processing)}
                            </span>
                            <span class="task-count task-count--completed">
                                {format!("{} completed", counts.completed)}
                            </span>
                            <span class="task-count task-count--failed">
                                {format!("{} failed", counts.failed)}
                            </span>
                        </div>
                    }
                }}

                <Show when=move || tasks.get().error.is_some()>
                    <p class="tasks-page__error">{move || tasks.get().error.unwrap_or_default()}</p>
                </Show>

                <Show
                    when=move || !tasks.get().loading
                    fallback=move || view! { <p>"Loading tasks..."</p> }
                >
                    {move || {
                        let items = tasks.get().items;
                        if items.is_empty() {
                            return view! { <p class="tasks-page__empty">"No ingestion tasks yet."</p> }
                                .into_any();
                        }
                        view! {
                            <table class="task-table">
                                <thead>
                                    <tr>
                                        <th>"Type"</th>
                                        <th>"Source"</th>
                                        <th>"Status"</th>
                                        <th>"Attempts"</th>
                                        <th>"Created"</th>
                                        <th></th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {items
                                        .into_iter()
                                        .map(|task| view! { <TaskRow task=task on_retry=on_retry/> })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }}
                </Show>
            </div>
        </AppShell>
    }
}

/// One task line. Processing rows show the progress percent inline.
#[component]
fn TaskRow(task: Task, on_retry: Callback<String>) -> impl IntoView {
    let status_class = format!("task-row__status task-row__status--{}", status_label(task.status).to_lowercase());
    let status_text = if task.status == TaskStatus::Processing {
        format!("{} ({}%)", status_label(task.status), task.progress)
    } else {
        status_label(task.status).to_owned()
    };
    let source_title = task
        .sources
        .as_ref()
        .map_or_else(|| "—".to_owned(), |s| s.title.clone());
    let created = crate::util::format::relative_time_now(&task.created_at);
    let error = task.last_error.clone().unwrap_or_default();
    let can_retry = retryable(&task);
    let retry_id = task.id.clone();

    view! {
        <tr class="task-row">
            <td>{type_label(task.task_type)}</td>
            <td class="task-row__source">{source_title}</td>
            <td>
                <span class=status_class title=error>{status_text}</span>
            </td>
            <td>{task.attempts}</td>
            <td>{created}</td>
            <td>
                {can_retry
                    .then(|| {
                        view! {
                            <button class="btn task-row__retry" on:click=move |_| on_retry.run(retry_id.clone())>
                                "Retry"
                            </button>
                        }
                    })}
            </td>
        </tr>
    }
}
