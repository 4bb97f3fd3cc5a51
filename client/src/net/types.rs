//! Wire DTOs for the external knowledge-base API.
//!
//! DESIGN
//! ======
//! These types mirror the API service's JSON payloads so list/detail screens
//! and the chat stream can stay schema-driven. Status-like strings the UI
//! branches on are promoted to enums; numeric fields tolerate the float
//! encoding some JSON producers emit for integers.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated user as returned by `/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Unique user identifier (UUID string).
    pub id: String,
    /// Login email address.
    pub email: String,
}

/// An organization row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Org {
    /// Unique org identifier (UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-safe slug.
    #[serde(default)]
    pub slug: String,
}

/// Membership role within an org.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    #[default]
    Member,
}

/// A membership row linking the current user to an org, with the joined org.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Org this membership belongs to (UUID string).
    pub org_id: String,
    /// Role of the current user within the org.
    #[serde(default)]
    pub role: MemberRole,
    /// Joined org row, when the API expands it.
    #[serde(default)]
    pub orgs: Option<Org>,
}

impl Membership {
    /// Display name of the joined org, falling back to the org id.
    pub fn org_name(&self) -> &str {
        self.orgs.as_ref().map_or(self.org_id.as_str(), |o| o.name.as_str())
    }
}

/// The twelve memory palette colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryColor {
    #[default]
    Default,
    Coral,
    Peach,
    Sand,
    Mint,
    Sage,
    Fog,
    Storm,
    Dusk,
    Blossom,
    Clay,
    Chalk,
}

impl MemoryColor {
    /// All palette values in swatch order.
    pub const ALL: [MemoryColor; 12] = [
        MemoryColor::Default,
        MemoryColor::Coral,
        MemoryColor::Peach,
        MemoryColor::Sand,
        MemoryColor::Mint,
        MemoryColor::Sage,
        MemoryColor::Fog,
        MemoryColor::Storm,
        MemoryColor::Dusk,
        MemoryColor::Blossom,
        MemoryColor::Clay,
        MemoryColor::Chalk,
    ];

    /// Wire name, also used as the CSS modifier suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            MemoryColor::Default => "default",
            MemoryColor::Coral => "coral",
            MemoryColor::Peach => "peach",
            MemoryColor::Sand => "sand",
            MemoryColor::Mint => "mint",
            MemoryColor::Sage => "sage",
            MemoryColor::Fog => "fog",
            MemoryColor::Storm => "storm",
            MemoryColor::Dusk => "dusk",
            MemoryColor::Blossom => "blossom",
            MemoryColor::Clay => "clay",
            MemoryColor::Chalk => "chalk",
        }
    }
}

/// Publication status of a memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryStatus {
    #[default]
    Draft,
    Published,
}

/// A user-authored note. AI search only covers `published` memories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    /// Unique memory identifier (UUID string).
    pub id: String,
    /// Owning org (UUID string).
    pub org_id: String,
    /// Authoring user (UUID string).
    pub user_id: String,
    /// Optional title; untitled memories render a placeholder.
    pub title: Option<String>,
    /// Plain-text body, used for search.
    #[serde(default)]
    pub content: String,
    /// Rich-text body; sanitized before any DOM injection.
    #[serde(default)]
    pub content_html: String,
    /// Card color.
    #[serde(default)]
    pub color: MemoryColor,
    /// Lowercased tag list.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Draft or published.
    #[serde(default)]
    pub status: MemoryStatus,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// ISO 8601 last-update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// ISO 8601 publication timestamp, once published.
    #[serde(default)]
    pub published_at: Option<String>,
}

/// A per-topic container of ingested sources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pocket {
    /// Unique pocket identifier (UUID string).
    pub id: String,
    /// Owning org (UUID string).
    pub org_id: String,
    /// Display name.
    pub name: String,
    /// Optional description line.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the pocket is visible beyond explicit members.
    #[serde(default)]
    pub is_public: bool,
    /// Creating user (UUID string), if known.
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Ingested source kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Pdf,
    Txt,
    Docx,
    Url,
}

/// Ingestion lifecycle of a source. Transitions are driven entirely by the
/// external worker; the frontend polls and displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    #[default]
    Queued,
    Extracting,
    Chunking,
    Embedding,
    Ready,
    Failed,
}

impl SourceStatus {
    /// Whether the worker is finished with this source.
    pub fn is_terminal(self) -> bool {
        matches!(self, SourceStatus::Ready | SourceStatus::Failed)
    }

    /// Badge label shown in the source rail. The three mid-pipeline states
    /// collapse into one label.
    pub fn label(self) -> &'static str {
        match self {
            SourceStatus::Queued => "Queued",
            SourceStatus::Extracting | SourceStatus::Chunking | SourceStatus::Embedding => "Processing",
            SourceStatus::Ready => "Ready",
            SourceStatus::Failed => "Failed",
        }
    }
}

/// One ingested document or URL within a pocket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique source identifier (UUID string).
    pub id: String,
    /// Owning pocket (UUID string).
    pub pocket_id: String,
    /// Source kind.
    #[serde(rename = "type")]
    pub source_type: SourceType,
    /// Display title (filename or page title).
    pub title: String,
    /// Original URL for `url` sources.
    #[serde(default)]
    pub url: Option<String>,
    /// Object-store path for file sources.
    #[serde(default)]
    pub storage_path: Option<String>,
    /// File size in bytes, when known.
    #[serde(default, deserialize_with = "deserialize_opt_i64_from_number")]
    pub size_bytes: Option<i64>,
    /// Current ingestion status.
    #[serde(default)]
    pub status: SourceStatus,
    /// Failure detail when `status` is `failed`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

/// Citation metadata attached to an assistant answer. Pocket chat cites
/// sources, General Chat cites memories; both shapes share this type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Retrieved chunk (UUID string), when the backend exposes it.
    #[serde(default)]
    pub chunk_id: Option<String>,
    /// Cited source (UUID string), for pocket chat.
    #[serde(default)]
    pub source_id: Option<String>,
    /// Cited memory (UUID string), for General Chat.
    #[serde(default)]
    pub memory_id: Option<String>,
    /// Title of the cited source or memory.
    #[serde(default)]
    pub title: Option<String>,
    /// Short excerpt of the matched text.
    #[serde(default)]
    pub snippet: Option<String>,
    /// Palette color of the cited memory, if any.
    #[serde(default)]
    pub color: Option<String>,
}

/// A stored conversation header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier (UUID string).
    pub id: String,
    /// First-question-derived title, when the backend has set one.
    #[serde(default)]
    pub title: Option<String>,
    /// ISO 8601 timestamp of the latest message.
    #[serde(default)]
    pub updated_at: String,
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    /// Client-side only: a terminal stream failure rendered inline.
    Error,
}

/// A stored chat message as returned by the history endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Unique message identifier (UUID string).
    pub id: String,
    /// Author role.
    pub role: ChatRole,
    /// Message text (markdown for assistant messages).
    #[serde(default)]
    pub content: String,
    /// Citations attached to assistant messages.
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

/// Response of `POST /sources/upload/init`: the pending source row plus a
/// signed upload target.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UploadInit {
    /// The created source row in `queued` status.
    pub source: Source,
    /// Signed URL the file bytes are `PUT` to directly.
    #[serde(rename = "uploadUrl")]
    pub upload_url: String,
    /// Bearer token for the signed upload.
    pub token: String,
}

/// Response of `GET /sources/:id/download`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DownloadTicket {
    /// Short-lived signed URL for the stored file.
    pub url: String,
}

/// Per-pocket counters from `GET /stats/:pocketId`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PocketStats {
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub documents: i64,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub chunks: i64,
}

/// Org-wide counters from `GET /analytics`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgAnalytics {
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub pockets: i64,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub sources: i64,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub chunks: i64,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub conversations: i64,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub messages: i64,
}

/// Ingestion task kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "ingest-url")]
    IngestUrl,
    #[serde(rename = "ingest-file")]
    IngestFile,
}

/// Ingestion task status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

/// Joined source summary on a task row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSource {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

/// One background ingestion task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (UUID string).
    pub id: String,
    /// Task kind.
    #[serde(rename = "type")]
    pub task_type: TaskType,
    /// Current status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Progress percentage while processing.
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub progress: i64,
    /// Delivery attempts so far.
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub attempts: i64,
    /// Most recent failure detail.
    #[serde(default)]
    pub last_error: Option<String>,
    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Joined source summary, when the API expands it.
    #[serde(default)]
    pub sources: Option<TaskSource>,
}

/// Theme preference stored in user settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePref {
    Light,
    Dark,
    #[default]
    System,
}

/// Which LLM credential the backend should use for this user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmPreference {
    /// Platform-shared credential.
    #[default]
    Shared,
    /// User-supplied OpenRouter key, stored encrypted externally.
    Byokey,
}

/// Per-user settings from `GET /settings`. The OpenRouter key itself never
/// reaches this client; only its presence flag does.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub theme: ThemePref,
    #[serde(default)]
    pub llm_preference: LlmPreference,
    #[serde(default)]
    pub has_openrouter_key: bool,
}

/// Final payload of a chat stream's `done` frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DonePayload {
    /// Full answer text (the token stream already delivered it
    /// incrementally; panels keep their own accumulation).
    #[serde(default)]
    pub answer: String,
    /// Citations for the finalized answer.
    #[serde(default)]
    pub citations: Vec<Citation>,
    /// Conversation the exchange was stored under.
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// Stored id of the assistant message.
    #[serde(default)]
    pub message_id: Option<String>,
}

pub(crate) fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}

fn deserialize_opt_i64_from_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        other => {
            let number = other
                .as_i64()
                .or_else(|| other.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| {
                    #[allow(clippy::cast_possible_truncation)]
                    {
                        f as i64
                    }
                }));
            number.map(Some).ok_or_else(|| D::Error::custom("expected integer-compatible number or null"))
        }
    }
}
