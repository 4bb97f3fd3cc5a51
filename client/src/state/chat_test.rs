use super::*;

fn done_event(conversation_id: Option<&str>) -> StreamEvent {
    StreamEvent::Done(DonePayload {
        answer: "ignored full answer".to_owned(),
        citations: vec![Citation {
            title: Some("Cited source".to_owned()),
            ..Default::default()
        }],
        conversation_id: conversation_id.map(str::to_owned),
        message_id: Some("msg-served".to_owned()),
    })
}

fn streaming_thread() -> ChatThread {
    let mut thread = ChatThread::default();
    thread.begin("What is in my pocket?");
    thread
}

// =============================================================
// begin
// =============================================================

#[test]
fn default_thread_is_idle() {
    let thread = ChatThread::default();
    assert!(!thread.is_streaming());
    assert!(thread.messages.is_empty());
    assert!(thread.conversation_id.is_none());
}

#[test]
fn begin_records_user_message_and_opens_draft() {
    let thread = streaming_thread();
    assert!(thread.is_streaming());
    assert_eq!(thread.messages.len(), 1);
    assert_eq!(thread.messages[0].role, ChatRole::User);
    assert_eq!(thread.messages[0].content, "What is in my pocket?");
}

#[test]
fn begin_while_streaming_is_ignored() {
    let mut thread = streaming_thread();
    thread.begin("second submit");
    assert_eq!(thread.messages.len(), 1);
}

// =============================================================
// Progress events
// =============================================================

#[test]
fn token_frames_accumulate_in_draft() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Token("Hello ".to_owned()));
    thread.apply(StreamEvent::Token("world".to_owned()));
    assert_eq!(thread.draft.as_ref().unwrap().answer, "Hello world");
}

#[test]
fn thinking_frames_accumulate_in_draft() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Thinking("Searching".to_owned()));
    thread.apply(StreamEvent::Thinking(" sources".to_owned()));
    assert_eq!(thread.draft.as_ref().unwrap().thinking, "Searching sources");
}

#[test]
fn status_frame_replaces_previous_status() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Status("Searching".to_owned()));
    thread.apply(StreamEvent::Status("Reading 3 chunks".to_owned()));
    assert_eq!(thread.draft.as_ref().unwrap().status.as_deref(), Some("Reading 3 chunks"));
}

#[test]
fn queries_and_sources_replace_previous_values() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Queries(vec!["first".to_owned()]));
    thread.apply(StreamEvent::Queries(vec!["second".to_owned()]));
    thread.apply(StreamEvent::Sources(vec![Citation::default()]));
    let draft = thread.draft.as_ref().unwrap();
    assert_eq!(draft.queries, vec!["second".to_owned()]);
    assert_eq!(draft.sources.len(), 1);
}

#[test]
fn events_without_a_draft_are_dropped() {
    let mut thread = ChatThread::default();
    thread.apply(StreamEvent::Token("orphan".to_owned()));
    assert!(thread.messages.is_empty());
    assert!(thread.draft.is_none());
}

// =============================================================
// done
// =============================================================

#[test]
fn done_finalizes_with_accumulated_answer_not_payload_text() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Token("streamed ".to_owned()));
    thread.apply(StreamEvent::Token("answer".to_owned()));
    thread.apply(done_event(Some("conv-1")));

    assert!(!thread.is_streaming());
    assert_eq!(thread.messages.len(), 2);
    let answer = &thread.messages[1];
    assert_eq!(answer.role, ChatRole::Assistant);
    assert_eq!(answer.content, "streamed answer");
    assert_eq!(answer.citations.len(), 1);
    assert_eq!(answer.id, "msg-served");
}

#[test]
fn done_adopts_conversation_id_when_none_active() {
    let mut thread = streaming_thread();
    thread.apply(done_event(Some("conv-1")));
    assert_eq!(thread.conversation_id.as_deref(), Some("conv-1"));
}

#[test]
fn done_keeps_existing_conversation_id() {
    let mut thread = streaming_thread();
    thread.conversation_id = Some("conv-original".to_owned());
    thread.apply(done_event(Some("conv-other")));
    assert_eq!(thread.conversation_id.as_deref(), Some("conv-original"));
}

#[test]
fn second_done_is_dropped() {
    let mut thread = streaming_thread();
    thread.apply(done_event(Some("conv-1")));
    thread.apply(done_event(Some("conv-2")));
    assert_eq!(thread.messages.len(), 2);
    assert_eq!(thread.conversation_id.as_deref(), Some("conv-1"));
}

#[test]
fn tokens_after_done_are_dropped() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Token("final".to_owned()));
    thread.apply(done_event(None));
    thread.apply(StreamEvent::Token(" late".to_owned()));
    assert_eq!(thread.messages[1].content, "final");
}

// =============================================================
// error
// =============================================================

#[test]
fn error_pushes_inline_error_message() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Token("half an ans".to_owned()));
    thread.apply(StreamEvent::Error("model unavailable".to_owned()));

    assert!(!thread.is_streaming());
    assert_eq!(thread.messages.len(), 2);
    assert_eq!(thread.messages[1].role, ChatRole::Error);
    assert_eq!(thread.messages[1].content, "model unavailable");
}

#[test]
fn error_after_done_is_dropped() {
    let mut thread = streaming_thread();
    thread.apply(done_event(None));
    thread.apply(StreamEvent::Error("late failure".to_owned()));
    assert_eq!(thread.messages.len(), 2);
    assert_eq!(thread.messages[1].role, ChatRole::Assistant);
}

#[test]
fn done_after_error_is_dropped() {
    let mut thread = streaming_thread();
    thread.apply(StreamEvent::Error("boom".to_owned()));
    thread.apply(done_event(Some("conv-1")));
    assert_eq!(thread.messages.len(), 2);
    assert!(thread.conversation_id.is_none());
}

// =============================================================
// History / reset
// =============================================================

#[test]
fn load_stored_replaces_thread() {
    let mut thread = streaming_thread();
    thread.draft = None;
    thread.load_stored(
        "conv-9",
        vec![StoredMessage {
            id: "m1".to_owned(),
            role: ChatRole::Assistant,
            content: "old answer".to_owned(),
            citations: Vec::new(),
            created_at: String::new(),
        }],
    );
    assert_eq!(thread.messages.len(), 1);
    assert_eq!(thread.messages[0].id, "m1");
    assert_eq!(thread.conversation_id.as_deref(), Some("conv-9"));
}

#[test]
fn clear_resets_idle_thread() {
    let mut thread = streaming_thread();
    thread.apply(done_event(Some("conv-1")));
    thread.clear();
    assert!(thread.messages.is_empty());
    assert!(thread.conversation_id.is_none());
}

#[test]
fn clear_while_streaming_is_ignored() {
    let mut thread = streaming_thread();
    thread.clear();
    assert!(thread.is_streaming());
    assert_eq!(thread.messages.len(), 1);
}
