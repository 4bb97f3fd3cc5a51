//! Shared chat surface: thread history, streaming draft, input row.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both chat surfaces (per-pocket ask and General Chat) render through this
//! panel. The panel owns presentation only: the page owns the
//! [`ChatThread`] signal and starts streams through `on_send`, so the same
//! markup serves either endpoint. Assistant markdown is rendered and then
//! sanitized at the injection point.

use leptos::prelude::*;

use crate::net::types::{ChatRole, Citation};
use crate::state::chat::{ChatThread, StreamingDraft};

/// One chat thread with an input row. Input disables itself while a stream
/// is in flight or while the page reports `send_blocked`.
#[component]
pub fn ChatPanel(
    thread: RwSignal<ChatThread>,
    on_send: Callback<String>,
    #[prop(into)] send_blocked: Signal<bool>,
    #[prop(optional)] block_hint: &'static str,
    #[prop(default = "Ask a question...")] placeholder: &'static str,
) -> impl IntoView {
    let input = RwSignal::new(String::new());
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    // Pin the scroll to the newest content as tokens arrive.
    Effect::new(move || {
        let state = thread.get();
        let _ = state.messages.len();
        let _ = state.draft.as_ref().map(|d| d.answer.len());

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                let scroll_height = el.scroll_height();
                el.set_scroll_top(scroll_height);
            }
        }
    });

    let do_send = move || {
        let text = input.get();
        let prompt = text.trim();
        if prompt.is_empty() || thread.get().is_streaming() || send_blocked.get() {
            return;
        }
        on_send.run(prompt.to_owned());
        input.set(String::new());
    };

    let on_click = move |_| do_send();
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || {
        !input.get().trim().is_empty() && !thread.get().is_streaming() && !send_blocked.get()
    };

    view! {
        <div class="chat-panel">
            <div class="chat-panel__messages" node_ref=messages_ref>
                {move || {
                    let state = thread.get();
                    if state.messages.is_empty() && state.draft.is_none() {
                        return view! {
                            <div class="chat-panel__empty">"No messages yet"</div>
                        }
                            .into_any();
                    }

                    state
                        .messages
                        .iter()
                        .map(|msg| {
                            let content = msg.content.clone();
                            let is_user = msg.role == ChatRole::User;
                            let is_assistant = msg.role == ChatRole::Assistant;
                            let is_error = msg.role == ChatRole::Error;

                            view! {
                                <div
                                    class="chat-panel__message"
                                    class:chat-panel__message--user=is_user
                                    class:chat-panel__message--assistant=is_assistant
                                    class:chat-panel__message--error=is_error
                                >
                                    {if is_assistant {
                                        let rendered = crate::util::sanitize::clean(
                                            &crate::util::markdown::render(&content),
                                        );
                                        view! {
                                            <div class="chat-panel__markdown" inner_html=rendered></div>
                                        }
                                            .into_any()
                                    } else {
                                        view! { <span class="chat-panel__text">{content}</span> }.into_any()
                                    }}
                                    {citation_chips(msg.citations.clone())}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}

                {move || thread.get().draft.map(draft_view)}
            </div>

            <div class="chat-panel__input-row">
                <input
                    class="chat-panel__input"
                    type="text"
                    placeholder=placeholder
                    disabled=move || thread.get().is_streaming() || send_blocked.get()
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button class="btn btn--primary chat-panel__send" on:click=on_click disabled=move || !can_send()>
                    "Send"
                </button>
            </div>
            {move || {
                (send_blocked.get() && !block_hint.is_empty())
                    .then(|| view! { <p class="chat-panel__hint">{block_hint}</p> })
            }}
        </div>
    }
}

/// The in-flight assistant answer: retrieval progress, then tokens.
fn draft_view(draft: StreamingDraft) -> impl IntoView {
    let StreamingDraft {
        answer,
        thinking,
        status,
        queries,
        sources,
    } = draft;
    let rendered = (!answer.is_empty())
        .then(|| crate::util::sanitize::clean(&crate::util::markdown::render(&answer)));

    view! {
        <div class="chat-panel__message chat-panel__message--assistant chat-panel__message--streaming">
            {status.map(|status| view! { <div class="chat-panel__status">{status}</div> })}
            {(!queries.is_empty())
                .then(|| {
                    view! {
                        <div class="chat-panel__queries">
                            {queries
                                .into_iter()
                                .map(|query| view! { <span class="chat-panel__query">{query}</span> })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                })}
            {(!thinking.is_empty()).then(|| view! { <div class="chat-panel__thinking">{thinking}</div> })}
            {match rendered {
                Some(html) => view! { <div class="chat-panel__markdown" inner_html=html></div> }.into_any(),
                None => view! { <div class="chat-panel__waiting">"Thinking..."</div> }.into_any(),
            }}
            {citation_chips(sources)}
        </div>
    }
}

/// Citation chips under an assistant message. Snippets ride in tooltips.
fn citation_chips(citations: Vec<Citation>) -> Option<impl IntoView> {
    if citations.is_empty() {
        return None;
    }
    let chips = citations
        .into_iter()
        .map(|citation| {
            let label = citation.title.unwrap_or_else(|| "Untitled".to_owned());
            let snippet = citation.snippet.unwrap_or_default();
            view! { <span class="chat-panel__citation" title=snippet>{label}</span> }
        })
        .collect::<Vec<_>>();
    Some(view! { <div class="chat-panel__citations">{chips}</div> })
}
