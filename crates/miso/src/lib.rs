//! MISO API clients
//!
//! MISO is the LLM-orchestration backend Ally brokers to. Two surfaces are
//! wrapped here behind async traits so domain handlers can be exercised
//! against mocks:
//!
//! - the **Agent API** (`/chat`, `/conversations`, `/messages`,
//!   `/files/upload`): conversational chat with an SSE streaming response;
//! - the **Workflow API** (`/workflows/run`): blocking content-generation
//!   runs whose outputs go through the shared response-shape normalizer.

pub mod agent;
pub mod mock;
pub mod sse;
pub mod workflow;

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use agent::AgentClient;
pub use mock::{MockAgentApi, MockWorkflowApi};
pub use sse::{relay, SseLineDecoder};
pub use workflow::WorkflowClient;

/// User identity sent upstream when a caller does not provide one
pub const DEFAULT_CHAT_USER: &str = "prd-generator-user";

/// Default timeout for non-streaming upstream calls
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// MISO client errors
#[derive(Debug, thiserror::Error)]
pub enum MisoError {
    #[error("Invalid MISO configuration: {0}")]
    Config(String),

    #[error("MISO request failed: {0}")]
    Request(String),

    #[error("Failed to parse MISO response: {0}")]
    Response(String),

    #[error("MISO returned {status}")]
    Upstream { status: u16, body: String },
}

impl From<MisoError> for ally_common::Error {
    fn from(err: MisoError) -> Self {
        match err {
            MisoError::Config(msg) => ally_common::Error::Internal(msg),
            MisoError::Request(msg) => ally_common::Error::Upstream {
                status: 502,
                message: msg,
                details: None,
            },
            MisoError::Response(msg) => ally_common::Error::UpstreamShape(msg),
            MisoError::Upstream { status, body } => ally_common::Error::Upstream {
                status,
                message: format!("MISO returned {}", status),
                details: Some(body),
            },
        }
    }
}

/// Connection settings for one MISO surface
#[derive(Debug, Clone)]
pub struct MisoConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl MisoConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Raw upstream byte stream (the SSE body of a chat response)
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, MisoError>> + Send>>;

/// A file reference attached to a chat query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(rename = "type")]
    pub file_type: String,
    pub transfer_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_file_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl FileRef {
    /// Reference a file previously pushed through `/files/upload`
    pub fn uploaded(file_type: impl Into<String>, upload_file_id: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            transfer_method: "local_file".to_string(),
            upload_file_id: Some(upload_file_id.into()),
            url: None,
        }
    }
}

/// A chat turn to forward to the Agent API
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub query: String,
    /// `None` starts a new upstream conversation
    pub conversation_id: Option<String>,
    /// `None` falls back to [`DEFAULT_CHAT_USER`]
    pub user: Option<String>,
    pub files: Vec<FileRef>,
}

/// Conversation record as MISO returns it (timestamps are unix seconds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub updated_at: i64,
}

/// One stored exchange: MISO keeps the user query and the assistant answer
/// in a single record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    pub conversation_id: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub message_files: Vec<MessageFile>,
}

/// File attached to a stored message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageFile {
    pub id: String,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default)]
    pub url: String,
}

/// Result of pushing a file through `/files/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime_type: String,
}

/// Paged listing envelope used by the Agent API
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// MISO Agent API surface
#[async_trait::async_trait]
pub trait AgentApi: Send + Sync {
    /// Start a streaming chat turn; the returned stream is the raw SSE body
    async fn chat(&self, request: ChatRequest) -> Result<ByteStream, MisoError>;

    async fn list_conversations(
        &self,
        user: &str,
        limit: u32,
        last_id: Option<&str>,
    ) -> Result<Vec<ConversationSummary>, MisoError>;

    async fn delete_conversation(&self, id: &str, user: &str) -> Result<(), MisoError>;

    async fn rename_conversation(
        &self,
        id: &str,
        name: Option<&str>,
        auto_generate: bool,
        user: &str,
    ) -> Result<ConversationSummary, MisoError>;

    async fn list_messages(
        &self,
        conversation_id: &str,
        user: &str,
        limit: u32,
    ) -> Result<Vec<MessageRecord>, MisoError>;

    async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
        user: &str,
    ) -> Result<UploadedFile, MisoError>;
}

/// MISO Workflow API surface
#[async_trait::async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Run a workflow in blocking mode and return the parsed response body.
    /// Callers normalize the body through `ally_common::shape`.
    async fn run(&self, inputs: Value, user: &str) -> Result<Value, MisoError>;
}
