//! v0 Platform API implementation
//!
//! Calls the v0 REST API (`/v1/chats`, `/v1/projects`) using reqwest with
//! bearer-token auth. The API key always comes from configuration; there
//! is no fallback credential in the binary.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{ChatCreated, CreateChat, ProjectCreated, V0Api, V0Error};

/// Wire shape of a created chat. The web URL has appeared under both `url`
/// and `webUrl` across API versions; the demo URL under `demo` and
/// `demoUrl`.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    id: String,
    url: Option<String>,
    #[serde(rename = "webUrl")]
    web_url: Option<String>,
    demo: Option<String>,
    #[serde(rename = "demoUrl")]
    demo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    id: String,
    #[serde(default)]
    name: String,
}

/// v0 API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// v0 Platform API client
pub struct V0Client {
    client: Client,
    base_url: String,
    api_key: String,
}

impl V0Client {
    /// Create a new v0 client
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn upstream_error(response: reqwest::Response) -> V0Error {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());

        // Surface the API's own message when the body parses
        if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&body) {
            return V0Error::Upstream {
                status,
                body: parsed.error.message,
            };
        }

        V0Error::Upstream { status, body }
    }
}

#[async_trait::async_trait]
impl V0Api for V0Client {
    async fn create_chat(&self, request: CreateChat) -> Result<ChatCreated, V0Error> {
        tracing::debug!(has_system = request.system.is_some(), "Creating v0 chat");

        let response = self
            .client
            .post(self.url("/v1/chats"))
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| V0Error::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| V0Error::Response(format!("Failed to parse response: {}", e)))?;

        let url = chat
            .url
            .or(chat.web_url)
            .ok_or_else(|| V0Error::Response("chat response carries no url".to_string()))?;

        Ok(ChatCreated {
            id: chat.id,
            url,
            demo: chat.demo.or(chat.demo_url),
        })
    }

    async fn create_project(&self, name: &str) -> Result<ProjectCreated, V0Error> {
        tracing::debug!(name = %name, "Creating v0 project");

        let response = self
            .client
            .post(self.url("/v1/projects"))
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(|e| V0Error::Request(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let project: ProjectResponse = response
            .json()
            .await
            .map_err(|e| V0Error::Response(format!("Failed to parse response: {}", e)))?;

        Ok(ProjectCreated {
            id: project.id,
            name: if project.name.is_empty() {
                name.to_string()
            } else {
                project.name
            },
        })
    }
}
