//! Chat thread state shared by pocket chat and General Chat.
//!
//! DESIGN
//! ======
//! Each chat surface owns one [`ChatThread`]. `begin` records the user's
//! message and opens a streaming draft; every decoded stream event then goes
//! through [`ChatThread::apply`]. The draft is the single streaming gate:
//! the first terminal frame (`done` or `error`) consumes it, and any frame
//! arriving after that is dropped, so a finalized answer can never be
//! appended twice or mutated afterwards.
//!
//! The finalized message keeps the token text accumulated during the
//! stream; the `done` payload contributes only citations and conversation
//! identity.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::stream_decode::StreamEvent;
use crate::net::types::{ChatRole, Citation, DonePayload, StoredMessage};

/// A rendered chat message.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    /// Render key. Server id for loaded history, fresh UUID for messages
    /// created this session.
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub citations: Vec<Citation>,
}

/// In-flight assistant answer, alive between `begin` and the terminal frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamingDraft {
    /// Answer text accumulated from `token` frames.
    pub answer: String,
    /// Reasoning text accumulated from `thinking` frames.
    pub thinking: String,
    /// Latest retrieval progress line.
    pub status: Option<String>,
    /// Search queries the backend reported issuing.
    pub queries: Vec<String>,
    /// Citations for content considered so far.
    pub sources: Vec<Citation>,
}

/// One conversation thread plus its in-flight draft.
#[derive(Clone, Debug, Default)]
pub struct ChatThread {
    pub messages: Vec<ChatMessage>,
    pub draft: Option<StreamingDraft>,
    /// Server conversation id, adopted from the first `done` frame and kept
    /// for follow-up questions.
    pub conversation_id: Option<String>,
}

impl ChatThread {
    /// True while a draft is open; the input row disables itself on this.
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.draft.is_some()
    }

    /// Record the user's message and open the streaming draft. Ignored while
    /// a draft is already open, so a double submit cannot fork the thread.
    pub fn begin(&mut self, prompt: &str) {
        if self.draft.is_some() {
            return;
        }
        self.messages.push(ChatMessage {
            id: fresh_id(),
            role: ChatRole::User,
            content: prompt.to_owned(),
            citations: Vec::new(),
        });
        self.draft = Some(StreamingDraft::default());
    }

    /// Fold one decoded stream event into the thread. Every event is dropped
    /// when no draft is open, which is what enforces the terminal-frame-once
    /// rule.
    pub fn apply(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Done(payload) => self.finish(payload),
            StreamEvent::Error(message) => self.fail(&message),
            other => {
                if let Some(draft) = self.draft.as_mut() {
                    match other {
                        StreamEvent::Status(text) => draft.status = Some(text),
                        StreamEvent::Queries(queries) => draft.queries = queries,
                        StreamEvent::Sources(sources) => draft.sources = sources,
                        StreamEvent::Thinking(text) => draft.thinking.push_str(&text),
                        StreamEvent::Token(text) => draft.answer.push_str(&text),
                        StreamEvent::Done(_) | StreamEvent::Error(_) => {}
                    }
                }
            }
        }
    }

    /// Replace the thread with stored history.
    pub fn load_stored(&mut self, conversation_id: &str, stored: Vec<StoredMessage>) {
        self.messages = stored
            .into_iter()
            .map(|m| ChatMessage {
                id: m.id,
                role: m.role,
                content: m.content,
                citations: m.citations,
            })
            .collect();
        self.draft = None;
        self.conversation_id = Some(conversation_id.to_owned());
    }

    /// Reset to an empty thread (the new-conversation action). No-op while
    /// streaming; the draft would otherwise leak into the fresh thread.
    pub fn clear(&mut self) {
        if self.draft.is_some() {
            return;
        }
        self.messages.clear();
        self.conversation_id = None;
    }

    fn finish(&mut self, payload: DonePayload) {
        let Some(draft) = self.draft.take() else {
            return;
        };
        self.messages.push(ChatMessage {
            id: payload.message_id.unwrap_or_else(fresh_id),
            role: ChatRole::Assistant,
            content: draft.answer,
            citations: payload.citations,
        });
        if self.conversation_id.is_none()
            && let Some(cid) = payload.conversation_id
            && !cid.is_empty()
        {
            self.conversation_id = Some(cid);
        }
    }

    fn fail(&mut self, message: &str) {
        if self.draft.take().is_none() {
            return;
        }
        self.messages.push(ChatMessage {
            id: fresh_id(),
            role: ChatRole::Error,
            content: message.to_owned(),
            citations: Vec::new(),
        });
    }
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
