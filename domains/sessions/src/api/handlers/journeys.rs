//! Journey-tracking API handlers
//!
//! A journey captures where a visitor came from and what they said they
//! wanted; each page landing re-reads it and emits a structured tracking
//! event. The events land in the log stream; there is no metrics pipeline
//! behind this.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use ally_common::{Error, Result, ValidatedJson};

use crate::api::middleware::SessionsState;
use crate::domain::entities::JourneyContext;

/// Request for starting a journey
#[derive(Debug, Deserialize, Validate)]
pub struct StartJourneyRequest {
    /// Where the visitor entered from (landing page, campaign, referral)
    #[validate(length(min = 1, max = 200, message = "Origin is required"))]
    pub origin: String,

    /// What the visitor said they want to do
    #[validate(length(min = 1, max = 200, message = "Intent is required"))]
    pub intent: String,
}

/// Request for recording a page landing
#[derive(Debug, Deserialize, Validate)]
pub struct JourneyEventRequest {
    #[validate(length(min = 1, max = 200, message = "Page is required"))]
    pub page: String,
}

/// Start a journey and hand back its context
pub async fn start_journey(
    State(state): State<SessionsState>,
    ValidatedJson(req): ValidatedJson<StartJourneyRequest>,
) -> Result<(StatusCode, Json<JourneyContext>)> {
    let journey = JourneyContext {
        journey_id: Uuid::new_v4().to_string(),
        origin: req.origin,
        intent: req.intent,
        started_at: Utc::now(),
    };

    state
        .journeys
        .insert(journey.journey_id.clone(), journey.clone());

    tracing::info!(
        journey_id = %journey.journey_id,
        origin = %journey.origin,
        intent = %journey.intent,
        "Journey started"
    );

    Ok((StatusCode::CREATED, Json(journey)))
}

/// Re-read a journey context
pub async fn get_journey(
    State(state): State<SessionsState>,
    Path(id): Path<String>,
) -> Result<Json<JourneyContext>> {
    let journey = state
        .journeys
        .get(&id)
        .ok_or_else(|| Error::NotFound("Journey not found or expired".to_string()))?;

    Ok(Json(journey))
}

/// Record a page landing against a journey
pub async fn record_event(
    State(state): State<SessionsState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<JourneyEventRequest>,
) -> Result<StatusCode> {
    let journey = state
        .journeys
        .get(&id)
        .ok_or_else(|| Error::NotFound("Journey not found or expired".to_string()))?;

    tracing::info!(
        journey_id = %journey.journey_id,
        origin = %journey.origin,
        intent = %journey.intent,
        page = %req.page,
        "Journey event"
    );

    Ok(StatusCode::NO_CONTENT)
}
