//! Route definitions for the Sessions domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{journeys, sessions, users};
use super::middleware::SessionsState;

/// Create session routes
fn session_routes() -> Router<SessionsState> {
    Router::new().route(
        "/v1/sessions/{user_id}",
        get(sessions::get_session)
            .put(sessions::upsert_session)
            .delete(sessions::delete_session),
    )
}

/// Create journey-tracking routes
fn journey_routes() -> Router<SessionsState> {
    Router::new()
        .route("/v1/journeys", post(journeys::start_journey))
        .route("/v1/journeys/{id}", get(journeys::get_journey))
        .route("/v1/journeys/{id}/events", post(journeys::record_event))
}

/// Create all Sessions domain API routes
pub fn routes() -> Router<SessionsState> {
    Router::new()
        .route("/v1/users/anonymous", post(users::mint_anonymous_id))
        .merge(session_routes())
        .merge(journey_routes())
}
