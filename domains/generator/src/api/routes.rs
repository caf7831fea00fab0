//! Route definitions for the Generator domain API

use axum::{routing::post, Router};

use super::handlers::{generate, v0, workflows};
use super::middleware::GeneratorState;

/// Create generation routes
fn generate_routes() -> Router<GeneratorState> {
    Router::new()
        .route("/v1/generate/prd", post(generate::generate_prd))
        .route("/v1/generate/design", post(generate::generate_design))
        .route("/v1/generate/database", post(generate::generate_database))
        .route("/v1/generate/questions", post(generate::generate_questions))
        .route("/v1/generate/hint", post(generate::generate_hint))
        .route("/v1/generate/prompt", post(generate::generate_prompt))
        .route("/v1/generate/summary", post(generate::generate_summary))
}

/// Create workflow and v0 hand-off routes
fn broker_routes() -> Router<GeneratorState> {
    Router::new()
        .route("/v1/workflows/run", post(workflows::run_workflow))
        .route("/v1/v0/chats", post(v0::create_chat))
        .route("/v1/v0/projects", post(v0::create_project))
}

/// Create all Generator domain API routes
pub fn routes() -> Router<GeneratorState> {
    Router::new().merge(generate_routes()).merge(broker_routes())
}
