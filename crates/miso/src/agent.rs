//! MISO Agent API implementation
//!
//! Calls the MISO Agent endpoints (`/chat`, `/conversations`, `/messages`,
//! `/files/upload`) using the reqwest HTTP client with bearer-token auth.

use futures::TryStreamExt;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;

use crate::{
    AgentApi, ByteStream, ChatRequest, ConversationSummary, FileRef, ListEnvelope, MessageRecord,
    MisoConfig, MisoError, UploadedFile, DEFAULT_CHAT_USER,
};

/// Connect timeout; the total-request timeout is applied per call because a
/// streaming chat body must be allowed to outlive it.
const CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Wire body for `POST /chat`
#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    inputs: serde_json::Value,
    query: &'a str,
    mode: &'static str,
    conversation_id: &'a str,
    user: &'a str,
    files: &'a [FileRef],
    auto_gen_name: bool,
}

impl<'a> ChatBody<'a> {
    fn new(request: &'a ChatRequest) -> Self {
        Self {
            inputs: json!({}),
            query: &request.query,
            mode: "streaming",
            conversation_id: request.conversation_id.as_deref().unwrap_or(""),
            user: request.user.as_deref().unwrap_or(DEFAULT_CHAT_USER),
            files: &request.files,
            auto_gen_name: true,
        }
    }
}

/// MISO Agent API client
pub struct AgentClient {
    client: Client,
    config: MisoConfig,
}

impl AgentClient {
    /// Create a new Agent API client
    pub fn new(config: MisoConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }

    /// Map a non-2xx response into `MisoError::Upstream`, consuming the body
    async fn upstream_error(response: reqwest::Response) -> MisoError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        MisoError::Upstream { status, body }
    }
}

#[async_trait::async_trait]
impl AgentApi for AgentClient {
    async fn chat(&self, request: ChatRequest) -> Result<ByteStream, MisoError> {
        let body = ChatBody::new(&request);

        tracing::debug!(
            conversation_id = %body.conversation_id,
            user = %body.user,
            files = body.files.len(),
            "Forwarding chat query to MISO"
        );

        let response = self
            .client
            .post(self.url("/chat"))
            .header("authorization", self.bearer())
            .json(&body)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let stream = response
            .bytes_stream()
            .map_err(|e| MisoError::Request(format!("Stream read failed: {}", e)));

        Ok(Box::pin(stream))
    }

    async fn list_conversations(
        &self,
        user: &str,
        limit: u32,
        last_id: Option<&str>,
    ) -> Result<Vec<ConversationSummary>, MisoError> {
        let mut query = vec![("user", user.to_string()), ("limit", limit.to_string())];
        if let Some(last_id) = last_id {
            query.push(("last_id", last_id.to_string()));
        }

        let response = self
            .client
            .get(self.url("/conversations"))
            .header("authorization", self.bearer())
            .query(&query)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope: ListEnvelope<ConversationSummary> = response
            .json()
            .await
            .map_err(|e| MisoError::Response(format!("Failed to parse response: {}", e)))?;

        Ok(envelope.data)
    }

    async fn delete_conversation(&self, id: &str, user: &str) -> Result<(), MisoError> {
        let response = self
            .client
            .delete(self.url(&format!("/conversations/{}", id)))
            .header("authorization", self.bearer())
            .json(&json!({ "user": user }))
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        Ok(())
    }

    async fn rename_conversation(
        &self,
        id: &str,
        name: Option<&str>,
        auto_generate: bool,
        user: &str,
    ) -> Result<ConversationSummary, MisoError> {
        let mut body = json!({
            "auto_generate": auto_generate,
            "user": user,
        });
        if let Some(name) = name {
            body["name"] = json!(name);
        }

        let response = self
            .client
            .post(self.url(&format!("/conversations/{}/rename", id)))
            .header("authorization", self.bearer())
            .json(&body)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| MisoError::Response(format!("Failed to parse response: {}", e)))
    }

    async fn list_messages(
        &self,
        conversation_id: &str,
        user: &str,
        limit: u32,
    ) -> Result<Vec<MessageRecord>, MisoError> {
        let response = self
            .client
            .get(self.url("/messages"))
            .header("authorization", self.bearer())
            .query(&[
                ("conversation_id", conversation_id),
                ("user", user),
                ("limit", &limit.to_string()),
            ])
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let envelope: ListEnvelope<MessageRecord> = response
            .json()
            .await
            .map_err(|e| MisoError::Response(format!("Failed to parse response: {}", e)))?;

        Ok(envelope.data)
    }

    async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
        user: &str,
    ) -> Result<UploadedFile, MisoError> {
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| MisoError::Request(format!("Invalid content type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("user", user.to_string());

        let response = self
            .client
            .post(self.url("/files/upload"))
            .header("authorization", self.bearer())
            .multipart(form)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| MisoError::Response(format!("Failed to parse response: {}", e)))
    }
}
