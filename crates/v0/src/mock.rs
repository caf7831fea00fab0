//! Mock v0 implementation
//!
//! Deterministic stand-in for the v0 Platform API, used by tests.

use std::sync::{Arc, Mutex};

use crate::{ChatCreated, CreateChat, ProjectCreated, V0Api, V0Error};

/// Mock v0 API
#[derive(Default)]
pub struct MockV0Api {
    fail_with: Option<(u16, String)>,
    chats: Arc<Mutex<Vec<CreateChat>>>,
}

impl MockV0Api {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as an upstream non-2xx
    pub fn failing(mut self, status: u16, body: &str) -> Self {
        self.fail_with = Some((status, body.to_string()));
        self
    }

    /// Chat creations received so far
    pub fn chats(&self) -> Vec<CreateChat> {
        self.chats.lock().expect("mock lock poisoned").clone()
    }

    fn check_failure(&self) -> Result<(), V0Error> {
        match &self.fail_with {
            Some((status, body)) => Err(V0Error::Upstream {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl V0Api for MockV0Api {
    async fn create_chat(&self, request: CreateChat) -> Result<ChatCreated, V0Error> {
        self.check_failure()?;
        self.chats
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        Ok(ChatCreated {
            id: "mock-chat-id".to_string(),
            url: "https://v0.dev/chat/mock-chat-id".to_string(),
            demo: Some("https://demo.v0.dev/mock-chat-id".to_string()),
        })
    }

    async fn create_project(&self, name: &str) -> Result<ProjectCreated, V0Error> {
        self.check_failure()?;
        Ok(ProjectCreated {
            id: "mock-project-id".to_string(),
            name: name.to_string(),
        })
    }
}
