//! Mini-Ally session API handlers
//!
//! A returning visitor reads their session back to choose between resuming
//! and starting over. Reads of expired sessions behave exactly like reads
//! of missing ones; the expired entry is cleared on sight.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use ally_common::{Error, Result, ValidatedJson};

use crate::api::middleware::SessionsState;
use crate::domain::entities::{AllySession, ExpertQa, SessionStep};
use crate::domain::state::SessionStepMachine;

/// Longest accepted user id
const MAX_USER_ID_LENGTH: usize = 100;

/// Request for creating or updating a session. Fields accumulate over the
/// conversation, so everything but the path user id is optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertSessionRequest {
    #[validate(length(max = 200))]
    pub project_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 10000))]
    pub persona: String,

    #[serde(default)]
    #[validate(length(max = 10000))]
    pub pain_point: String,

    #[serde(default)]
    #[validate(length(max = 10000))]
    pub solution_idea: String,

    #[serde(default)]
    pub expert_qa: Vec<ExpertQa>,

    /// Omit to keep the current step
    pub step: Option<SessionStep>,
}

fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(Error::Validation("user_id is required".to_string()));
    }
    if user_id.len() > MAX_USER_ID_LENGTH {
        return Err(Error::Validation(format!(
            "user_id must be at most {} characters",
            MAX_USER_ID_LENGTH
        )));
    }
    Ok(())
}

/// Fetch a live session; expired sessions read as missing
pub async fn get_session(
    State(state): State<SessionsState>,
    Path(user_id): Path<String>,
) -> Result<Json<AllySession>> {
    validate_user_id(&user_id)?;

    let session = state
        .sessions
        .get(&user_id)
        .ok_or_else(|| Error::NotFound("Session not found or expired".to_string()))?;

    Ok(Json(session))
}

/// Create or update the session, restarting its TTL
pub async fn upsert_session(
    State(state): State<SessionsState>,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpsertSessionRequest>,
) -> Result<Json<AllySession>> {
    validate_user_id(&user_id)?;

    let existing = state.sessions.get(&user_id);
    let current_step = existing.map(|s| s.step).unwrap_or_default();

    let step = match req.step {
        Some(requested) => {
            SessionStepMachine::validate_change(current_step, requested)
                .map_err(|e| Error::Validation(e.to_string()))?;
            requested
        }
        None => current_step,
    };

    let session = AllySession {
        user_id: user_id.clone(),
        project_name: req.project_name,
        persona: req.persona,
        pain_point: req.pain_point,
        solution_idea: req.solution_idea,
        expert_qa: req.expert_qa,
        step,
        updated_at: Utc::now(),
    };

    state.sessions.insert(user_id, session.clone());

    tracing::debug!(user_id = %session.user_id, step = %session.step, "Session stored");
    Ok(Json(session))
}

/// Drop the session ("start over"). Idempotent.
pub async fn delete_session(
    State(state): State<SessionsState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    validate_user_id(&user_id)?;

    state.sessions.remove(&user_id);
    Ok(StatusCode::NO_CONTENT)
}
