//! v0 Platform API client
//!
//! v0 is the external UI-code-generation service used in the optional
//! downstream step of the idea-to-spec workflow: a generated prompt becomes
//! a v0 chat (which renders a live demo), optionally grouped under a v0
//! project.

pub mod client;
pub mod mock;

use serde::{Deserialize, Serialize};

pub use client::V0Client;
pub use mock::MockV0Api;

/// v0 client errors
#[derive(Debug, thiserror::Error)]
pub enum V0Error {
    #[error("v0 request failed: {0}")]
    Request(String),

    #[error("Failed to parse v0 response: {0}")]
    Response(String),

    #[error("v0 returned {status}")]
    Upstream { status: u16, body: String },
}

impl From<V0Error> for ally_common::Error {
    fn from(err: V0Error) -> Self {
        match err {
            V0Error::Request(msg) => ally_common::Error::Upstream {
                status: 502,
                message: msg,
                details: None,
            },
            V0Error::Response(msg) => ally_common::Error::UpstreamShape(msg),
            V0Error::Upstream { status, body } => ally_common::Error::Upstream {
                status,
                message: format!("v0 returned {}", status),
                details: Some(body),
            },
        }
    }
}

/// Request to create a v0 chat
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateChat {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(rename = "chatPrivacy", skip_serializing_if = "Option::is_none")]
    pub chat_privacy: Option<String>,
    #[serde(rename = "projectId", skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// A created v0 chat, with the web and demo URLs the client links to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCreated {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

/// A created v0 project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub id: String,
    pub name: String,
}

/// v0 Platform API surface
#[async_trait::async_trait]
pub trait V0Api: Send + Sync {
    async fn create_chat(&self, request: CreateChat) -> Result<ChatCreated, V0Error>;

    async fn create_project(&self, name: &str) -> Result<ProjectCreated, V0Error>;
}
