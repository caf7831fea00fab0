//! Conversation management API handlers
//!
//! Conversations live in MISO; these handlers broker the upstream records
//! into the client's view models.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use ally_common::{Error, ListQuery, Result, ValidatedJson};
use ally_miso::DEFAULT_CHAT_USER;

use crate::api::middleware::ChatState;
use crate::domain::entities::Conversation;

/// Query params for deleting a conversation
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user: Option<String>,
}

/// Request for renaming a conversation
#[derive(Debug, Deserialize, Validate)]
pub struct RenameConversationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    /// Ask MISO to derive a name from the conversation content
    #[serde(default)]
    pub auto_generate: bool,

    pub user: Option<String>,
}

/// List conversations for a user
pub async fn list_conversations(
    State(state): State<ChatState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Conversation>>> {
    let user = query.user.as_deref().unwrap_or(DEFAULT_CHAT_USER);

    let summaries = state
        .agent
        .list_conversations(user, query.limit(), query.last_id.as_deref())
        .await?;

    let conversations: Vec<Conversation> = summaries.into_iter().map(Into::into).collect();
    Ok(Json(conversations))
}

/// Delete a conversation
pub async fn delete_conversation(
    State(state): State<ChatState>,
    Path(id): Path<String>,
    Query(query): Query<UserQuery>,
) -> Result<StatusCode> {
    let user = query.user.as_deref().unwrap_or(DEFAULT_CHAT_USER);

    state.agent.delete_conversation(&id, user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Rename a conversation, either explicitly or by asking MISO to generate
/// a name
pub async fn rename_conversation(
    State(state): State<ChatState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RenameConversationRequest>,
) -> Result<Json<Conversation>> {
    if req.name.is_none() && !req.auto_generate {
        return Err(Error::Validation(
            "Either name or auto_generate is required".to_string(),
        ));
    }

    let user = req.user.as_deref().unwrap_or(DEFAULT_CHAT_USER);

    let renamed = state
        .agent
        .rename_conversation(&id, req.name.as_deref(), req.auto_generate, user)
        .await?;

    Ok(Json(renamed.into()))
}
