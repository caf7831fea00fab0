//! Domain entities for the Chat domain
//!
//! These are view models brokered from MISO records, not a managed store.
//! MISO keeps one record per exchange (user query + assistant answer); the
//! client renders individual chat bubbles, so each record flattens into two
//! messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ally_miso::{ConversationSummary, MessageRecord, UploadedFile};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A chat bubble as the client renders it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachedFile>,
}

impl Message {
    /// Flatten one MISO exchange record into its user and assistant bubbles
    pub fn pair_from_record(record: &MessageRecord) -> (Message, Message) {
        let created_at = DateTime::from_timestamp(record.created_at, 0).unwrap_or_default();

        let attachments = record
            .message_files
            .iter()
            .map(|f| AttachedFile {
                id: f.id.clone(),
                name: String::new(),
                size: 0,
                mime_type: f.file_type.clone(),
                upload_file_id: Some(f.id.clone()),
                preview_url: (!f.url.is_empty()).then(|| f.url.clone()),
            })
            .collect();

        let user = Message {
            id: format!("{}:user", record.id),
            role: MessageRole::User,
            content: record.query.clone(),
            created_at,
            attachments,
        };

        let assistant = Message {
            id: format!("{}:assistant", record.id),
            role: MessageRole::Assistant,
            content: record.answer.clone(),
            created_at,
            attachments: Vec::new(),
        };

        (user, assistant)
    }
}

/// Conversation summary mirroring MISO's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub updated_at: DateTime<Utc>,
}

impl From<ConversationSummary> for Conversation {
    fn from(summary: ConversationSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            updated_at: DateTime::from_timestamp(summary.updated_at, 0).unwrap_or_default(),
        }
    }
}

/// A file attached to a chat query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachedFile {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl AttachedFile {
    /// Wrap the result of a MISO upload under a fresh local id
    pub fn from_upload(uploaded: UploadedFile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: uploaded.name,
            size: uploaded.size,
            mime_type: uploaded.mime_type,
            upload_file_id: Some(uploaded.id),
            preview_url: None,
        }
    }
}
