//! Mock MISO implementations
//!
//! Deterministic stand-ins for the Agent and Workflow APIs, used by handler
//! and integration tests. Mocks record the requests they receive so tests
//! can assert on the forwarded shapes.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use serde_json::{json, Value};

use crate::{
    AgentApi, ByteStream, ChatRequest, ConversationSummary, MessageRecord, MisoError,
    UploadedFile, WorkflowApi,
};

/// Mock Agent API
#[derive(Default)]
pub struct MockAgentApi {
    sse_chunks: Vec<Bytes>,
    conversations: Vec<ConversationSummary>,
    messages: Vec<MessageRecord>,
    uploaded: Option<UploadedFile>,
    fail_with: Option<(u16, String)>,
    chat_requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockAgentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// SSE chunks returned by `chat`, exactly as given (boundaries included)
    pub fn with_sse_chunks(mut self, chunks: Vec<&str>) -> Self {
        self.sse_chunks = chunks.into_iter().map(|c| Bytes::from(c.to_string())).collect();
        self
    }

    pub fn with_conversations(mut self, conversations: Vec<ConversationSummary>) -> Self {
        self.conversations = conversations;
        self
    }

    pub fn with_messages(mut self, messages: Vec<MessageRecord>) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_uploaded(mut self, uploaded: UploadedFile) -> Self {
        self.uploaded = Some(uploaded);
        self
    }

    /// Make every call fail as an upstream non-2xx
    pub fn failing(mut self, status: u16, body: &str) -> Self {
        self.fail_with = Some((status, body.to_string()));
        self
    }

    /// Chat requests received so far
    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().expect("mock lock poisoned").clone()
    }

    /// Shared handle to the recorded chat requests, for asserting after the
    /// mock has been moved into application state
    pub fn chat_request_log(&self) -> Arc<Mutex<Vec<ChatRequest>>> {
        self.chat_requests.clone()
    }

    fn check_failure(&self) -> Result<(), MisoError> {
        match &self.fail_with {
            Some((status, body)) => Err(MisoError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl AgentApi for MockAgentApi {
    async fn chat(&self, request: ChatRequest) -> Result<ByteStream, MisoError> {
        self.chat_requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);
        self.check_failure()?;

        let chunks: Vec<Result<Bytes, MisoError>> =
            self.sse_chunks.iter().cloned().map(Ok).collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn list_conversations(
        &self,
        _user: &str,
        limit: u32,
        _last_id: Option<&str>,
    ) -> Result<Vec<ConversationSummary>, MisoError> {
        self.check_failure()?;
        Ok(self
            .conversations
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn delete_conversation(&self, id: &str, _user: &str) -> Result<(), MisoError> {
        self.check_failure()?;
        if self.conversations.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(MisoError::Upstream {
                status: 404,
                body: json!({"error": "conversation not found"}).to_string(),
            })
        }
    }

    async fn rename_conversation(
        &self,
        id: &str,
        name: Option<&str>,
        _auto_generate: bool,
        _user: &str,
    ) -> Result<ConversationSummary, MisoError> {
        self.check_failure()?;
        Ok(ConversationSummary {
            id: id.to_string(),
            name: name.unwrap_or("Generated title").to_string(),
            updated_at: 1_700_000_000,
        })
    }

    async fn list_messages(
        &self,
        conversation_id: &str,
        _user: &str,
        limit: u32,
    ) -> Result<Vec<MessageRecord>, MisoError> {
        self.check_failure()?;
        Ok(self
            .messages
            .iter()
            .filter(|m| m.conversation_id == conversation_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn upload_file(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
        _user: &str,
    ) -> Result<UploadedFile, MisoError> {
        self.check_failure()?;
        Ok(self.uploaded.clone().unwrap_or_else(|| UploadedFile {
            id: "mock-file-id".to_string(),
            name: file_name.to_string(),
            size: data.len() as u64,
            mime_type: content_type.to_string(),
        }))
    }
}

/// Mock Workflow API
pub struct MockWorkflowApi {
    response: Value,
    fail_with: Option<(u16, String)>,
    runs: Arc<Mutex<Vec<(Value, String)>>>,
}

impl MockWorkflowApi {
    /// Respond to every run with the given body
    pub fn returning(response: Value) -> Self {
        Self {
            response,
            fail_with: None,
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail every run as an upstream non-2xx
    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Value::Null,
            fail_with: Some((status, body.to_string())),
            runs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `(inputs, user)` pairs received so far
    pub fn runs(&self) -> Vec<(Value, String)> {
        self.runs.lock().expect("mock lock poisoned").clone()
    }

    /// Shared handle to the recorded runs
    pub fn run_log(&self) -> Arc<Mutex<Vec<(Value, String)>>> {
        self.runs.clone()
    }
}

#[async_trait::async_trait]
impl WorkflowApi for MockWorkflowApi {
    async fn run(&self, inputs: Value, user: &str) -> Result<Value, MisoError> {
        self.runs
            .lock()
            .expect("mock lock poisoned")
            .push((inputs, user.to_string()));

        match &self.fail_with {
            Some((status, body)) => Err(MisoError::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.response.clone()),
        }
    }
}
