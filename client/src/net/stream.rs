//! Driver for streamed chat requests.
//!
//! Opens a `POST` against one of the two ask endpoints, reads the response
//! body incrementally, and forwards each decoded [`StreamEvent`] to the
//! caller. Framing lives in [`stream_decode`](super::stream_decode); this
//! module only moves bytes.
//!
//! All of it is gated behind `#[cfg(feature = "hydrate")]` since it requires
//! a browser environment. There is no abort or reconnect: once opened, a
//! stream is read to the end, and a failed read surfaces as `Err` for the
//! caller to turn into an inline error message.

#[cfg(feature = "hydrate")]
use super::api;
#[cfg(feature = "hydrate")]
use super::stream_decode::FrameDecoder;
#[cfg(feature = "hydrate")]
use super::stream_decode::StreamEvent;
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;
#[cfg(feature = "hydrate")]
use wasm_bindgen_futures::JsFuture;

/// Stream an answer about one pocket's sources.
///
/// # Errors
///
/// Returns an error string when the request cannot be opened or the body
/// stream fails mid-read. Events already forwarded stay applied.
#[cfg(feature = "hydrate")]
pub async fn ask_pocket<F>(
    pocket_id: &str,
    query: &str,
    conversation_id: Option<&str>,
    on_event: F,
) -> Result<(), String>
where
    F: FnMut(StreamEvent),
{
    let body = match conversation_id {
        Some(cid) => serde_json::json!({
            "pocket_id": pocket_id,
            "query": query,
            "conversation_id": cid,
        }),
        None => serde_json::json!({ "pocket_id": pocket_id, "query": query }),
    };
    run_stream("/ask/stream", &body, on_event).await
}

/// Stream an answer grounded in the org's published memories.
///
/// # Errors
///
/// Returns an error string when the request cannot be opened or the body
/// stream fails mid-read. Events already forwarded stay applied.
#[cfg(feature = "hydrate")]
pub async fn ask_general<F>(
    org_id: &str,
    question: &str,
    conversation_id: Option<&str>,
    on_event: F,
) -> Result<(), String>
where
    F: FnMut(StreamEvent),
{
    let body = match conversation_id {
        Some(cid) => serde_json::json!({
            "org_id": org_id,
            "question": question,
            "conversation_id": cid,
        }),
        None => serde_json::json!({ "org_id": org_id, "question": question }),
    };
    run_stream("/general-chat/ask/stream", &body, on_event).await
}

/// Open the request and pump body chunks through a [`FrameDecoder`] until
/// the stream ends.
#[cfg(feature = "hydrate")]
async fn run_stream<F>(path: &str, body: &serde_json::Value, mut on_event: F) -> Result<(), String>
where
    F: FnMut(StreamEvent),
{
    let resp = api::with_auth(gloo_net::http::Request::post(&api::endpoint(&api::api_url(), path)))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(api::fail(resp).await);
    }

    let Some(stream) = resp.body() else {
        return Err("response had no body".to_owned());
    };
    let reader: web_sys::ReadableStreamDefaultReader = stream
        .get_reader()
        .dyn_into()
        .map_err(|_| "body stream is not readable".to_owned())?;

    let mut decoder = FrameDecoder::default();
    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|_| "stream read failed".to_owned())?;
        let done = js_sys::Reflect::get(&chunk, &wasm_bindgen::JsValue::from_str("done"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            return Ok(());
        }
        let value = js_sys::Reflect::get(&chunk, &wasm_bindgen::JsValue::from_str("value"))
            .map_err(|_| "stream chunk unavailable".to_owned())?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();
        for event in decoder.push(&bytes) {
            on_event(event);
        }
    }
}
