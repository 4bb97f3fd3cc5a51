//! Incremental decoder for chat answer streams.
//!
//! DESIGN
//! ======
//! Both ask surfaces deliver newline-delimited `data: {json}` frames over a
//! plain POST response body (SSE-shaped, without real SSE headers). The
//! decoder owns no I/O: the reader loop in `net::stream` feeds it raw byte
//! chunks and forwards whatever frames completed. Buffering is byte-level so
//! a chunk boundary may fall anywhere, including inside a multi-byte UTF-8
//! sequence or inside the frame separator itself.
//!
//! Frames that do not carry the `data:` prefix or fail to parse are dropped
//! without surfacing an error; the protocol treats them as noise.

#[cfg(test)]
#[path = "stream_decode_test.rs"]
mod stream_decode_test;

use serde::Deserialize;

use crate::net::types::{Citation, DonePayload};

/// One decoded frame from a chat stream.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum StreamEvent {
    /// Human-readable retrieval progress line.
    Status(String),
    /// Search queries issued by the retrieval backend.
    Queries(Vec<String>),
    /// Citation metadata for content considered so far.
    Sources(Vec<Citation>),
    /// Streamed reasoning text, appended to the draft's thinking trail.
    Thinking(String),
    /// Incremental answer text to append.
    Token(String),
    /// Terminal success payload.
    Done(DonePayload),
    /// Terminal failure string.
    Error(String),
}

/// Stateful frame splitter. Create one per request; feed every chunk through
/// [`FrameDecoder::push`] in arrival order.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one network chunk and return the events it completed, in
    /// stream order. Incomplete trailing bytes stay buffered for the next
    /// push.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = find_frame_separator(&self.buffer) {
            let frame: Vec<u8> = self.buffer[..pos].to_vec();
            self.buffer.drain(..pos + 2);
            if let Some(event) = decode_frame(&frame) {
                events.push(event);
            }
        }
        events
    }
}

/// Byte offset of the next `\n\n` separator, if a full frame is buffered.
/// `0x0A` never occurs inside a multi-byte UTF-8 sequence, so scanning at
/// the byte level cannot split a code point.
fn find_frame_separator(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

/// Decode one complete frame. `None` covers every skip case: missing
/// `data:` prefix, invalid JSON, unknown event type.
fn decode_frame(frame: &[u8]) -> Option<StreamEvent> {
    let text = String::from_utf8_lossy(frame);
    let body = text.strip_prefix("data:")?;
    serde_json::from_str(body.trim()).ok()
}
