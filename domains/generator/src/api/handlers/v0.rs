//! v0 hand-off API handlers
//!
//! The optional last step of the workflow: a generated prompt becomes a v0
//! chat (which renders a live demo), optionally grouped under a v0 project.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use validator::Validate;

use ally_common::{Result, ValidatedJson};
use ally_v0::{ChatCreated, CreateChat, ProjectCreated};

use crate::api::middleware::GeneratorState;

/// Request for creating a v0 chat
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChatRequest {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    pub system: Option<String>,
    pub chat_privacy: Option<String>,
    pub project_id: Option<String>,
}

/// Request for creating a v0 project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
}

/// Create a v0 chat from a generated prompt
pub async fn create_chat(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<CreateChatRequest>,
) -> Result<(StatusCode, Json<ChatCreated>)> {
    let created = state
        .v0
        .create_chat(CreateChat {
            message: req.message,
            system: req.system,
            chat_privacy: req.chat_privacy,
            project_id: req.project_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Create a v0 project to group generated chats
pub async fn create_project(
    State(state): State<GeneratorState>,
    ValidatedJson(req): ValidatedJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectCreated>)> {
    let created = state.v0.create_project(&req.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
