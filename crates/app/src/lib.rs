//! Ally application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use ally_chat::ChatState;
use ally_common::Config;
use ally_generator::GeneratorState;
use ally_miso::{AgentClient, MisoConfig, WorkflowClient};
use ally_sessions::SessionsState;
use ally_v0::V0Client;

/// How often the expired-session sweeper runs
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Create the main application router with all routes and state.
///
/// Must run inside a Tokio runtime: the session sweeper is spawned here.
pub fn create_app(config: &Config) -> Router {
    let timeout = Duration::from_secs(config.upstream_timeout_secs);

    // Upstream clients, one per credential surface
    let agent = Arc::new(AgentClient::new(
        MisoConfig::new(
            config.miso_agent_endpoint.clone(),
            config.miso_agent_api_key.clone(),
        )
        .with_timeout(timeout),
    ));
    let workflow = Arc::new(WorkflowClient::new(
        MisoConfig::new(config.miso_endpoint.clone(), config.miso_api_key.clone())
            .with_timeout(timeout),
    ));
    let runner = Arc::new(WorkflowClient::new(
        MisoConfig::new(config.miso_endpoint.clone(), config.generator_api_key())
            .with_timeout(timeout),
    ));
    let v0 = Arc::new(V0Client::new(
        config.v0_endpoint.clone(),
        config.v0_api_key.clone(),
        timeout,
    ));

    let chat_state = ChatState { agent };
    let generator_state = GeneratorState {
        workflow,
        runner,
        v0,
    };
    let sessions_state =
        SessionsState::with_ttl(chrono::Duration::hours(config.session_ttl_hours as i64));

    spawn_session_sweeper(&sessions_state);

    // Build router — compose domain routers with shared infrastructure routes
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/", axum::routing::get(|| async { "Ally API v0.1.0" }))
        .merge(ally_chat::routes().with_state(chat_state))
        .merge(ally_generator::routes().with_state(generator_state))
        .merge(ally_sessions::routes().with_state(sessions_state))
}

/// Periodically drop expired sessions and journeys so abandoned state does
/// not accumulate between reads
fn spawn_session_sweeper(state: &SessionsState) {
    let sessions = state.sessions.clone();
    let journeys = state.journeys.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let dropped = sessions.purge_expired() + journeys.purge_expired();
            if dropped > 0 {
                tracing::debug!(dropped, "Purged expired session state");
            }
        }
    });
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
