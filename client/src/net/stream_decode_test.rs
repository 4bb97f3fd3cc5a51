use super::*;

// =============================================================
// Helpers
// =============================================================

fn session_bytes() -> Vec<u8> {
    let frames = [
        r#"data: {"type":"status","payload":"Searching your memories"}"#,
        r#"data: {"type":"queries","payload":["reading list","scifi books"]}"#,
        r#"data: {"type":"sources","payload":[{"memory_id":"m-1","title":"Reading list","snippet":"Dune"}]}"#,
        r#"data: {"type":"thinking","payload":"Two memories mention books."}"#,
        r#"data: {"type":"token","payload":"Dune"}"#,
        r#"data: {"type":"token","payload":" and café ☕ reads"}"#,
        r#"data: {"type":"done","payload":{"answer":"Dune and café ☕ reads","citations":[{"memory_id":"m-1","title":"Reading list"}],"conversation_id":"c-1","message_id":"msg-1"}}"#,
    ];
    let mut out = String::new();
    for frame in frames {
        out.push_str(frame);
        out.push_str("\n\n");
    }
    out.into_bytes()
}

fn decode_single_shot(bytes: &[u8]) -> Vec<StreamEvent> {
    FrameDecoder::new().push(bytes)
}

// =============================================================
// Whole-session decoding
// =============================================================

#[test]
fn decodes_a_full_session_in_order() {
    let events = decode_single_shot(&session_bytes());
    assert_eq!(events.len(), 7);
    assert_eq!(events[0], StreamEvent::Status("Searching your memories".to_owned()));
    assert_eq!(
        events[1],
        StreamEvent::Queries(vec!["reading list".to_owned(), "scifi books".to_owned()])
    );
    assert!(matches!(&events[2], StreamEvent::Sources(citations) if citations.len() == 1));
    assert_eq!(events[4], StreamEvent::Token("Dune".to_owned()));
    assert_eq!(events[5], StreamEvent::Token(" and café ☕ reads".to_owned()));

    let StreamEvent::Done(payload) = &events[6] else {
        panic!("expected done, got {:?}", events[6]);
    };
    assert_eq!(payload.conversation_id.as_deref(), Some("c-1"));
    assert_eq!(payload.citations.len(), 1);
    assert_eq!(payload.answer, "Dune and café ☕ reads");
}

// =============================================================
// Chunk-boundary independence
// =============================================================

#[test]
fn every_two_way_split_matches_single_shot() {
    let bytes = session_bytes();
    let expected = decode_single_shot(&bytes);
    assert_eq!(expected.len(), 7);

    for split in 0..=bytes.len() {
        let mut decoder = FrameDecoder::new();
        let mut events = decoder.push(&bytes[..split]);
        events.extend(decoder.push(&bytes[split..]));
        assert_eq!(events, expected, "split at byte {split}");
    }
}

#[test]
fn byte_at_a_time_delivery_matches_single_shot() {
    let bytes = session_bytes();
    let expected = decode_single_shot(&bytes);

    let mut decoder = FrameDecoder::new();
    let mut events = Vec::new();
    for byte in &bytes {
        events.extend(decoder.push(std::slice::from_ref(byte)));
    }
    assert_eq!(events, expected);
}

#[test]
fn separator_split_across_chunks_completes_the_frame() {
    let mut decoder = FrameDecoder::new();
    assert!(decoder.push(b"data: {\"type\":\"token\",\"payload\":\"hi\"}\n").is_empty());
    let events = decoder.push(b"\n");
    assert_eq!(events, vec![StreamEvent::Token("hi".to_owned())]);
}

#[test]
fn multibyte_utf8_split_mid_code_point_survives() {
    let frame = "data: {\"type\":\"token\",\"payload\":\"☕\"}\n\n".as_bytes().to_vec();
    // The cup emoji is three bytes; cut inside it.
    let cut = frame.iter().position(|b| *b >= 0xE0).unwrap() + 1;

    let mut decoder = FrameDecoder::new();
    assert!(decoder.push(&frame[..cut]).is_empty());
    let events = decoder.push(&frame[cut..]);
    assert_eq!(events, vec![StreamEvent::Token("☕".to_owned())]);
}

// =============================================================
// Skip semantics
// =============================================================

#[test]
fn frames_without_data_prefix_are_dropped() {
    let mut decoder = FrameDecoder::new();
    let events = decoder.push(b": keepalive\n\ndata: {\"type\":\"token\",\"payload\":\"x\"}\n\n");
    assert_eq!(events, vec![StreamEvent::Token("x".to_owned())]);
}

#[test]
fn malformed_json_is_skipped_silently() {
    let mut decoder = FrameDecoder::new();
    let events = decoder.push(
        b"data: {not json\n\ndata: {\"type\":\"token\",\"payload\":\"a\"}\n\ndata: {\"type\":\"oops\"}\n\ndata: {\"type\":\"token\",\"payload\":\"b\"}\n\n",
    );
    assert_eq!(
        events,
        vec![StreamEvent::Token("a".to_owned()), StreamEvent::Token("b".to_owned())]
    );
}

#[test]
fn empty_frames_between_separators_are_ignored() {
    let mut decoder = FrameDecoder::new();
    let events = decoder.push(b"\n\n\n\ndata: {\"type\":\"status\",\"payload\":\"ok\"}\n\n");
    assert_eq!(events, vec![StreamEvent::Status("ok".to_owned())]);
}

#[test]
fn whitespace_after_prefix_is_tolerated() {
    let mut decoder = FrameDecoder::new();
    let events = decoder.push(b"data:    {\"type\":\"error\",\"payload\":\"backend unavailable\"}   \n\n");
    assert_eq!(events, vec![StreamEvent::Error("backend unavailable".to_owned())]);
}

#[test]
fn trailing_partial_frame_stays_buffered() {
    let mut decoder = FrameDecoder::new();
    let events = decoder.push(b"data: {\"type\":\"token\",\"payload\":\"a\"}\n\ndata: {\"type\":\"tok");
    assert_eq!(events, vec![StreamEvent::Token("a".to_owned())]);

    let events = decoder.push(b"en\",\"payload\":\"b\"}\n\n");
    assert_eq!(events, vec![StreamEvent::Token("b".to_owned())]);
}
