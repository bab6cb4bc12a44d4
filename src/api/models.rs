use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Output detail level for message reads. Mirrors the provider's own format
/// parameter on the message get endpoint.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum Format {
    /// Message and thread ids only
    Minimal,
    /// Ids plus headers and snippet
    Metadata,
    /// Metadata plus plain-text body
    Full,
}

impl Format {
    pub fn api_param(self) -> &'static str {
        match self {
            Format::Minimal => "minimal",
            Format::Metadata => "metadata",
            Format::Full => "full",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub format: Format,
}

impl SearchRequest {
    pub const MIN_RESULTS: u32 = 1;
    pub const MAX_RESULTS: u32 = 100;

    /// Bounds check on `max_results`. Out-of-range values are rejected, not
    /// clamped, and the check runs before any network call.
    pub fn validate(&self) -> AppResult<()> {
        if (Self::MIN_RESULTS..=Self::MAX_RESULTS).contains(&self.max_results) {
            return Ok(());
        }

        Err(AppError::Validation(format!(
            "max-results must be between {} and {}, got {}",
            Self::MIN_RESULTS,
            Self::MAX_RESULTS,
            self.max_results
        )))
    }
}

/// Provider message resource, decoded once at the client boundary and
/// treated as read-only input everywhere else.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    pub id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub label_ids: Vec<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub payload: Option<MessagePart>,
}

/// One node of the recursive MIME payload tree.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePart {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub headers: Vec<MessageHeader>,
    #[serde(default)]
    pub body: Option<PartBody>,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartBody {
    #[serde(default)]
    pub data: Option<String>,
}

/// Reduced output shape keyed by the requested format. Untagged so each
/// variant serializes to exactly its own key set, nothing more.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProjectedMessage {
    Minimal {
        id: String,
        #[serde(rename = "threadId")]
        thread_id: String,
    },
    Metadata {
        id: String,
        #[serde(rename = "threadId")]
        thread_id: String,
        subject: String,
        from: String,
        to: String,
        date: String,
        snippet: String,
    },
    Full {
        id: String,
        #[serde(rename = "threadId")]
        thread_id: String,
        subject: String,
        from: String,
        to: String,
        date: String,
        snippet: String,
        body: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub result_count: usize,
    pub query: String,
    pub messages: Vec<ProjectedMessage>,
}

#[derive(Debug, Clone)]
pub struct SendRequest {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub message_id: String,
    pub thread_id: String,
    pub to: Vec<String>,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelListView {
    pub total_count: usize,
    pub system_count: usize,
    pub user_count: usize,
    pub labels: Vec<LabelView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelCreateView {
    pub action: &'static str,
    pub label_id: String,
    pub label_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelMutationView {
    pub action: &'static str,
    pub label_name: String,
    pub label_id: String,
    pub applied_count: usize,
    pub failed_count: usize,
    pub outcomes: Vec<MessageOutcome>,
}

/// Per-message result of a batch label mutation. Partial failure stays
/// visible instead of collapsing into an all-or-nothing error.
#[derive(Debug, Clone, Serialize)]
pub struct MessageOutcome {
    pub message_id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
