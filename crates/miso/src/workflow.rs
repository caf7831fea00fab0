//! MISO Workflow API implementation
//!
//! Calls `POST /workflows/run` in blocking response mode. The parsed body is
//! returned as-is; callers extract named outputs through the shared
//! response-shape normalizer, since the payload nesting varies across
//! upstream endpoints and versions.

use reqwest::Client;
use serde_json::{json, Value};

use crate::{MisoConfig, MisoError, WorkflowApi};

/// MISO Workflow API client
pub struct WorkflowClient {
    client: Client,
    config: MisoConfig,
}

impl WorkflowClient {
    /// Create a new Workflow API client
    pub fn new(config: MisoConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    fn url(&self) -> String {
        format!(
            "{}/workflows/run",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl WorkflowApi for WorkflowClient {
    async fn run(&self, inputs: Value, user: &str) -> Result<Value, MisoError> {
        let body = json!({
            "inputs": inputs,
            "response_mode": "blocking",
            "user": user,
        });

        tracing::debug!(user = %user, "Running MISO workflow");

        let response = self
            .client
            .post(self.url())
            .header("authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| MisoError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(MisoError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| MisoError::Response(format!("Failed to parse response: {}", e)))
    }
}
