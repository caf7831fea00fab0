//! Anonymous user id minting
//!
//! The app has no accounts; the client keeps a stable anonymous id and
//! sends it with chat and session calls.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

/// A freshly minted anonymous user id
#[derive(Debug, Serialize)]
pub struct AnonymousUser {
    pub user_id: String,
}

/// Mint a stable anonymous user id for the client to persist
pub async fn mint_anonymous_id() -> (StatusCode, Json<AnonymousUser>) {
    let user = AnonymousUser {
        user_id: format!("anon-{}", Uuid::new_v4()),
    };
    (StatusCode::CREATED, Json(user))
}
