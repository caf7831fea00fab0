//! Message history API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use ally_common::{Error, Result};
use ally_miso::DEFAULT_CHAT_USER;

use crate::api::middleware::ChatState;
use crate::domain::entities::Message;

/// Default page size for message history
const DEFAULT_LIMIT: u32 = 20;

/// Query params for listing messages
#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
    pub conversation_id: Option<String>,
    pub user: Option<String>,
    pub limit: Option<u32>,
}

/// List the message history of a conversation.
///
/// MISO stores one record per exchange; each record is flattened into a
/// user bubble and an assistant bubble, oldest first.
pub async fn list_messages(
    State(state): State<ChatState>,
    Query(query): Query<ListMessagesQuery>,
) -> Result<Json<Vec<Message>>> {
    let conversation_id = query
        .conversation_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::Validation("conversation_id is required".to_string()))?;

    let user = query.user.as_deref().unwrap_or(DEFAULT_CHAT_USER);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);

    let records = state
        .agent
        .list_messages(conversation_id, user, limit)
        .await?;

    let mut messages = Vec::with_capacity(records.len() * 2);
    for record in &records {
        let (user_msg, assistant_msg) = Message::pair_from_record(record);
        messages.push(user_msg);
        messages.push(assistant_msg);
    }
    // Stable sort: a record's user bubble stays ahead of its answer
    messages.sort_by_key(|m| m.created_at);

    Ok(Json(messages))
}
