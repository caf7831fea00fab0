//! Streaming chat handler
//!
//! Forwards a chat turn to the MISO Agent API and relays its SSE response.
//! The relay only ever emits complete `data: ` events, whatever the
//! upstream chunk boundaries were.

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::Response,
};
use serde::Deserialize;
use validator::Validate;

use ally_common::{Error, Result, ValidatedJson};
use ally_miso::{sse, ChatRequest, FileRef};

use crate::api::middleware::ChatState;

/// Request for a streaming chat turn
#[derive(Debug, Deserialize, Validate)]
pub struct ChatTurnRequest {
    /// The user's message
    #[validate(length(min = 1, message = "Query is required"))]
    pub query: String,

    /// Omit to start a new conversation
    pub conversation_id: Option<String>,

    /// Anonymous user id; a shared default is used when absent
    pub user: Option<String>,

    /// Previously uploaded files to attach to this turn
    #[serde(default)]
    pub files: Vec<ChatFileInput>,
}

/// Reference to a previously uploaded file
#[derive(Debug, Deserialize)]
pub struct ChatFileInput {
    #[serde(rename = "type", default = "default_file_type")]
    pub file_type: String,
    pub upload_file_id: String,
}

fn default_file_type() -> String {
    "document".to_string()
}

impl From<ChatFileInput> for FileRef {
    fn from(input: ChatFileInput) -> Self {
        FileRef::uploaded(input.file_type, input.upload_file_id)
    }
}

/// Relay a chat turn as a server-sent-event stream
pub async fn chat(
    State(state): State<ChatState>,
    ValidatedJson(req): ValidatedJson<ChatTurnRequest>,
) -> Result<Response> {
    let request = ChatRequest {
        query: req.query,
        conversation_id: req.conversation_id,
        user: req.user,
        files: req.files.into_iter().map(Into::into).collect(),
    };

    let upstream = state.agent.chat(request).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(sse::relay(upstream)))
        .map_err(|e| Error::Internal(format!("Failed to build SSE response: {}", e)))
}
