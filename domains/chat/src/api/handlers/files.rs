//! File upload handler
//!
//! Streams an uploaded file through to the MISO upload endpoint and returns
//! the attachment reference the chat handler accepts back.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use ally_common::{Error, Result};
use ally_miso::DEFAULT_CHAT_USER;

use crate::api::middleware::ChatState;
use crate::domain::entities::AttachedFile;

/// Per-file size cap, matching the upstream upload limit
const MAX_FILE_BYTES: usize = 15 * 1024 * 1024;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Upload a file for later attachment to a chat turn
pub async fn upload_file(
    State(state): State<ChatState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<AttachedFile>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    let mut user: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| Error::Validation("File name is required".to_string()))?;
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::Validation(format!("Failed to read file: {}", e)))?;

                if data.len() > MAX_FILE_BYTES {
                    return Err(Error::Validation(format!(
                        "File exceeds the {} MB limit",
                        MAX_FILE_BYTES / (1024 * 1024)
                    )));
                }

                file = Some((name, content_type, data.to_vec()));
            }
            Some("user") => {
                user = field.text().await.ok().filter(|u| !u.is_empty());
            }
            _ => {}
        }
    }

    let (name, content_type, data) =
        file.ok_or_else(|| Error::Validation("File is required".to_string()))?;
    let user = user.as_deref().unwrap_or(DEFAULT_CHAT_USER);

    tracing::debug!(name = %name, size = data.len(), "Forwarding file upload to MISO");

    let uploaded = state
        .agent
        .upload_file(&name, &content_type, data, user)
        .await?;

    Ok((StatusCode::CREATED, Json(AttachedFile::from_upload(uploaded))))
}
