//! Route definitions for the Chat domain API

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use super::handlers::{chat, conversations, files, messages};
use super::middleware::ChatState;

/// Uploads stream through to MISO; cap request bodies a little above the
/// per-file limit enforced by the upload handler.
const BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Create all Chat domain API routes
pub fn routes() -> Router<ChatState> {
    Router::new()
        .route("/v1/chat", post(chat::chat))
        .route("/v1/conversations", get(conversations::list_conversations))
        .route(
            "/v1/conversations/{id}",
            delete(conversations::delete_conversation),
        )
        .route(
            "/v1/conversations/{id}/rename",
            post(conversations::rename_conversation),
        )
        .route("/v1/messages", get(messages::list_messages))
        .route("/v1/files/upload", post(files::upload_file))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}
