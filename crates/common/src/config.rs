//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at startup
//! and injected into application state. Handlers never read the process
//! environment directly.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default base URL for the v0 Platform API
const DEFAULT_V0_ENDPOINT: &str = "https://api.v0.dev";

/// Default timeout for outbound upstream requests, in seconds.
/// Generation workflows are slow; streaming chat responses are covered by
/// the read side, not the total-request timeout.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 120;

/// Default Mini-Ally session time-to-live, in hours
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// MISO Agent API (chat, conversations, messages, file upload)
    pub miso_agent_endpoint: String,
    pub miso_agent_api_key: String,

    /// MISO Workflow API (content generation)
    pub miso_endpoint: String,
    pub miso_api_key: String,

    /// Workflow key for the generic workflow-run surface; falls back to
    /// `miso_api_key` when unset
    pub miso_generator_api_key: Option<String>,

    /// v0 Platform API. The key is required; there is no fallback
    /// credential baked into the binary.
    pub v0_endpoint: String,
    pub v0_api_key: String,

    /// Outbound request timeout in seconds
    pub upstream_timeout_secs: u64,

    /// Mini-Ally session TTL in hours
    pub session_ttl_hours: u64,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            miso_agent_endpoint: env::var("MISO_AGENT_ENDPOINT")
                .map_err(|_| anyhow::anyhow!("MISO_AGENT_ENDPOINT is required"))?,
            miso_agent_api_key: env::var("MISO_AGENT_API_KEY")
                .map_err(|_| anyhow::anyhow!("MISO_AGENT_API_KEY is required"))?,

            miso_endpoint: env::var("MISO_ENDPOINT")
                .map_err(|_| anyhow::anyhow!("MISO_ENDPOINT is required"))?,
            miso_api_key: env::var("MISO_API_KEY")
                .map_err(|_| anyhow::anyhow!("MISO_API_KEY is required"))?,
            miso_generator_api_key: env::var("MISO_GENERATOR_API_KEY").ok(),

            v0_endpoint: env::var("V0_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_V0_ENDPOINT.to_string()),
            v0_api_key: env::var("V0_API_KEY")
                .map_err(|_| anyhow::anyhow!("V0_API_KEY is required"))?,

            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),

            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "ally=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        };

        Ok(config)
    }

    /// Workflow API key for the generic `/v1/workflows/run` surface
    pub fn generator_api_key(&self) -> &str {
        self.miso_generator_api_key
            .as_deref()
            .unwrap_or(&self.miso_api_key)
    }
}
