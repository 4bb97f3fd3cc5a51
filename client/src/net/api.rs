//! Typed REST client for the external knowledge-base API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning `None`/error since every endpoint is browser-only.
//!
//! ERROR HANDLING
//! ==============
//! Successful responses arrive as `{"data": T}` envelopes (`/auth/me` is the
//! one bare-object exception); non-2xx responses carry `{"message": ...}`
//! which becomes the `Err` string, with `API error: {status}` as the
//! fallback. 204 maps to unit. Callers toast or degrade; nothing here
//! panics or retries.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{
    Conversation, DownloadTicket, LlmPreference, Membership, Memory, MemoryColor, Org, OrgAnalytics, Pocket,
    PocketStats, SessionUser, Source, StoredMessage, Task, ThemePref, UploadInit, UserSettings,
};
#[cfg(feature = "hydrate")]
use serde::Deserialize;
use serde::Serialize;
#[cfg(feature = "hydrate")]
use serde::de::DeserializeOwned;

/// Default API service origin, matching the backend's local dev port.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// localStorage key overriding the API origin for non-default deployments.
pub const API_URL_STORAGE_KEY: &str = "pocketry.api_url";

/// Resolve the API origin: localStorage override first, then the default.
pub fn api_url() -> String {
    crate::util::storage::get(API_URL_STORAGE_KEY)
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn api_error_message(status: u16) -> String {
    format!("API error: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

// The backend expects `api_key`, not `key`.
#[cfg(any(test, feature = "hydrate"))]
fn openrouter_key_body(key: &str) -> serde_json::Value {
    serde_json::json!({ "api_key": key })
}

/// Fields accepted by `POST /memories` and `PATCH /memories/:id`. Absent
/// fields are omitted from the body so PATCH stays partial.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MemoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MemoryColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

/// Fields accepted by `PATCH /settings`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePref>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_preference: Option<LlmPreference>,
}

// =============================================================
// Request plumbing (hydrate only)
// =============================================================

#[cfg(feature = "hydrate")]
#[derive(Deserialize)]
struct Data<T> {
    data: T,
}

#[cfg(feature = "hydrate")]
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[cfg(feature = "hydrate")]
pub(crate) fn with_auth(req: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
    match crate::util::auth::load_token() {
        Some(token) => req.header("Authorization", &bearer_value(&token)),
        None => req,
    }
}

#[cfg(feature = "hydrate")]
pub(crate) async fn fail(resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => api_error_message(status),
    }
}

#[cfg(feature = "hydrate")]
async fn get_data<T: DeserializeOwned>(path: &str, query: &[(&str, &str)]) -> Result<T, String> {
    let mut req = with_auth(gloo_net::http::Request::get(&endpoint(&api_url(), path)));
    if !query.is_empty() {
        req = req.query(query.iter().copied());
    }
    let resp = req.send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(fail(resp).await);
    }
    let body: Data<T> = resp.json().await.map_err(|e| e.to_string())?;
    Ok(body.data)
}

#[cfg(feature = "hydrate")]
async fn post_data<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, String> {
    let resp = with_auth(gloo_net::http::Request::post(&endpoint(&api_url(), path)))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(fail(resp).await);
    }
    let body: Data<T> = resp.json().await.map_err(|e| e.to_string())?;
    Ok(body.data)
}

#[cfg(feature = "hydrate")]
async fn post_data_empty<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let resp = with_auth(gloo_net::http::Request::post(&endpoint(&api_url(), path)))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(fail(resp).await);
    }
    let body: Data<T> = resp.json().await.map_err(|e| e.to_string())?;
    Ok(body.data)
}

#[cfg(feature = "hydrate")]
async fn patch_data<T: DeserializeOwned, B: Serialize>(path: &str, body: &B) -> Result<T, String> {
    let resp = with_auth(gloo_net::http::Request::patch(&endpoint(&api_url(), path)))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(fail(resp).await);
    }
    let body: Data<T> = resp.json().await.map_err(|e| e.to_string())?;
    Ok(body.data)
}

#[cfg(feature = "hydrate")]
async fn delete_unit(path: &str) -> Result<(), String> {
    let resp = with_auth(gloo_net::http::Request::delete(&endpoint(&api_url(), path)))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(fail(resp).await);
    }
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
fn server_side<T>() -> Result<T, String> {
    Err("not available on server".to_owned())
}

// =============================================================
// Auth
// =============================================================

/// Fetch the authenticated user from `/auth/me`. Returns `None` when the
/// session token is missing/expired or on the server.
pub async fn fetch_current_user() -> Option<SessionUser> {
    #[cfg(feature = "hydrate")]
    {
        let resp = with_auth(gloo_net::http::Request::get(&endpoint(&api_url(), "/auth/me")))
            .send()
            .await
            .ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<SessionUser>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct RequestCodeResponse {
    ok: bool,
    #[serde(default)]
    code: Option<String>,
}

/// Request a 6-character login code via `POST /auth/email/request-code`.
/// Returns the echoed code when the backend is configured to echo them.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server responds
/// with a non-OK status.
pub async fn request_login_code(email: &str) -> Result<Option<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email });
        let resp = gloo_net::http::Request::post(&endpoint(&api_url(), "/auth/email/request-code"))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(fail(resp).await);
        }
        let body: RequestCodeResponse = resp.json().await.map_err(|e| e.to_string())?;
        if !body.ok {
            return Err("code request failed".to_owned());
        }
        Ok(body.code)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = email;
        server_side()
    }
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Deserialize)]
struct VerifyCodeResponse {
    ok: bool,
    #[serde(default)]
    token: String,
}

/// Verify a login code via `POST /auth/email/verify-code` and return the
/// session token to store.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails, the server responds
/// with a non-OK status, or the code is rejected.
pub async fn verify_login_code(email: &str, code: &str) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "code": code });
        let resp = gloo_net::http::Request::post(&endpoint(&api_url(), "/auth/email/verify-code"))
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(fail(resp).await);
        }
        let body: VerifyCodeResponse = resp.json().await.map_err(|e| e.to_string())?;
        if !body.ok || body.token.is_empty() {
            return Err("verification rejected".to_owned());
        }
        Ok(body.token)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, code);
        server_side()
    }
}

// =============================================================
// Orgs
// =============================================================

/// List the current user's org memberships.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn list_orgs() -> Result<Vec<Membership>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/orgs", &[]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        server_side()
    }
}

/// Create an org (membership bootstrap repair path).
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn create_org(name: &str) -> Result<Org, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data("/orgs", &serde_json::json!({ "name": name })).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = name;
        server_side()
    }
}

// =============================================================
// Memories
// =============================================================

/// List every memory in the org; filtering and partitioning happen
/// client-side.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn list_memories(org_id: &str) -> Result<Vec<Memory>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/memories", &[("org_id", org_id)]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = org_id;
        server_side()
    }
}

/// Create a memory.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn create_memory(patch: &MemoryPatch) -> Result<Memory, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data("/memories", patch).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = patch;
        server_side()
    }
}

/// Partially update a memory (also used for pin/archive toggles).
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn update_memory(id: &str, patch: &MemoryPatch) -> Result<Memory, String> {
    #[cfg(feature = "hydrate")]
    {
        patch_data(&memory_path(id), patch).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, patch);
        server_side()
    }
}

/// Delete a memory.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn delete_memory(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        delete_unit(&memory_path(id)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Publish a draft memory, making it AI-searchable.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn publish_memory(id: &str) -> Result<Memory, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data_empty(&format!("/memories/{id}/publish")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Distinct tags across the org's memories.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn memory_tags(org_id: &str) -> Result<Vec<String>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/memories/tags", &[("org_id", org_id)]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = org_id;
        server_side()
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn memory_path(id: &str) -> String {
    format!("/memories/{id}")
}

// =============================================================
// Pockets
// =============================================================

/// List pockets for the org.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn list_pockets(org_id: &str) -> Result<Vec<Pocket>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/pockets", &[("org_id", org_id)]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = org_id;
        server_side()
    }
}

/// Fetch a single pocket. Returns `None` on failure so the pocket page can
/// show its not-found state.
pub async fn fetch_pocket(id: &str) -> Option<Pocket> {
    #[cfg(feature = "hydrate")]
    {
        get_data(&format!("/pockets/{id}"), &[]).await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        None
    }
}

/// Create a pocket.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn create_pocket(org_id: &str, name: &str) -> Result<Pocket, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data("/pockets", &serde_json::json!({ "org_id": org_id, "name": name })).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (org_id, name);
        server_side()
    }
}

/// Rename a pocket and update its description line.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn update_pocket(id: &str, name: &str, description: Option<&str>) -> Result<Pocket, String> {
    #[cfg(feature = "hydrate")]
    {
        patch_data(
            &format!("/pockets/{id}"),
            &serde_json::json!({ "name": name, "description": description }),
        )
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, name, description);
        server_side()
    }
}

/// Delete a pocket and everything in it.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn delete_pocket(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        delete_unit(&format!("/pockets/{id}")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Per-pocket document/chunk counters.
pub async fn pocket_stats(pocket_id: &str) -> Option<PocketStats> {
    #[cfg(feature = "hydrate")]
    {
        get_data(&format!("/stats/{pocket_id}"), &[]).await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = pocket_id;
        None
    }
}

// =============================================================
// Sources
// =============================================================

/// List sources in a pocket.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn list_sources(pocket_id: &str) -> Result<Vec<Source>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/sources", &[("pocket_id", pocket_id)]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = pocket_id;
        server_side()
    }
}

/// Save a URL source.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn save_url(pocket_id: &str, url: &str, title: Option<&str>) -> Result<Source, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data(
            "/sources/url",
            &serde_json::json!({ "pocket_id": pocket_id, "url": url, "title": title }),
        )
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (pocket_id, url, title);
        server_side()
    }
}

/// Delete a source.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn delete_source(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        delete_unit(&format!("/sources/{id}")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Re-run ingestion for a failed source.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn reprocess_source(id: &str) -> Result<Source, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data_empty(&format!("/sources/{id}/reprocess")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Signed download URL for a stored file source.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn download_ticket(id: &str) -> Result<DownloadTicket, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data(&format!("/sources/{id}/download"), &[]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Upload one file: init for a signed URL, `PUT` the bytes directly to
/// storage, then complete to enqueue ingestion. Mirrors the backend's
/// three-step contract; no rollback if a later step fails.
///
/// # Errors
///
/// Returns the API error string of whichever step failed.
#[cfg(feature = "hydrate")]
pub async fn upload_file(pocket_id: &str, file: web_sys::File) -> Result<Source, String> {
    let name = file.name();
    let mime = file.type_();
    let size = file.size();
    let init: UploadInit = post_data(
        "/sources/upload/init",
        &serde_json::json!({
            "pocket_id": pocket_id,
            "filename": name,
            "mime_type": mime,
            "size_bytes": size,
        }),
    )
    .await?;

    let put = gloo_net::http::Request::put(&init.upload_url)
        .header("Authorization", &bearer_value(&init.token))
        .header("Content-Type", &mime)
        .body(file)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !put.ok() {
        return Err("file upload failed".to_owned());
    }

    post_data_empty(&format!("/sources/upload/{}/complete", init.source.id)).await
}

// =============================================================
// Chat history
// =============================================================

/// Stored messages of a pocket conversation.
pub async fn pocket_messages(conversation_id: &str) -> Option<Vec<StoredMessage>> {
    #[cfg(feature = "hydrate")]
    {
        get_data(&format!("/ask/{conversation_id}/messages"), &[]).await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = conversation_id;
        None
    }
}

/// General Chat conversation headers for the org.
pub async fn general_conversations(org_id: &str) -> Option<Vec<Conversation>> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/general-chat/conversations", &[("org_id", org_id)]).await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = org_id;
        None
    }
}

/// Stored messages of a General Chat conversation.
pub async fn general_messages(conversation_id: &str) -> Option<Vec<StoredMessage>> {
    #[cfg(feature = "hydrate")]
    {
        get_data(&format!("/general-chat/conversations/{conversation_id}/messages"), &[])
            .await
            .ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = conversation_id;
        None
    }
}

/// Delete a General Chat conversation.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn delete_general_conversation(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        delete_unit(&format!("/general-chat/conversations/{id}")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

// =============================================================
// Tasks + analytics
// =============================================================

/// Ingestion tasks for the org.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn list_tasks(org_id: &str) -> Result<Vec<Task>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/tasks", &[("org_id", org_id)]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = org_id;
        server_side()
    }
}

/// Retry a failed task.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn retry_task(id: &str) -> Result<Task, String> {
    #[cfg(feature = "hydrate")]
    {
        post_data_empty(&format!("/tasks/{id}/retry")).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        server_side()
    }
}

/// Org-wide usage counters.
pub async fn analytics(org_id: &str) -> Option<OrgAnalytics> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/analytics", &[("org_id", org_id)]).await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = org_id;
        None
    }
}

// =============================================================
// Settings
// =============================================================

/// Per-user settings. Always re-fetched (zero stale time) because the BYOK
/// gate depends on it.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn fetch_settings() -> Result<UserSettings, String> {
    #[cfg(feature = "hydrate")]
    {
        get_data("/settings", &[]).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        server_side()
    }
}

/// Patch settings fields.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn update_settings(patch: &SettingsPatch) -> Result<UserSettings, String> {
    #[cfg(feature = "hydrate")]
    {
        patch_data("/settings", patch).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = patch;
        server_side()
    }
}

#[cfg(feature = "hydrate")]
#[derive(Deserialize)]
struct KeyChangeResponse {
    #[serde(default)]
    success: bool,
}

/// Store the user's OpenRouter key (encrypted by the backend).
///
/// # Errors
///
/// Returns the API error string on failure or rejection.
pub async fn set_openrouter_key(key: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body: KeyChangeResponse =
            post_data("/settings/openrouter-key", &openrouter_key_body(key)).await?;
        if body.success { Ok(()) } else { Err("key was not accepted".to_owned()) }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        server_side()
    }
}

/// Remove the stored OpenRouter key.
///
/// # Errors
///
/// Returns the API error string on failure.
pub async fn delete_openrouter_key() -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        delete_unit("/settings/openrouter-key").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        server_side()
    }
}
