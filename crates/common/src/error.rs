//! Common error types and handling for Ally

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Ally application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream returned a non-2xx status. The status is mirrored back to
    /// the caller, with the upstream body attached as details.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// Upstream answered 2xx but none of the known response shapes matched
    #[error("Unexpected upstream response shape: {0}")]
    UpstreamShape(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream { status, .. } => {
                // Mirror the upstream status; a 2xx here would mean the
                // caller misclassified the response, so treat it as a
                // gateway failure instead.
                match StatusCode::from_u16(*status) {
                    Ok(code) if code.is_client_error() || code.is_server_error() => code,
                    _ => StatusCode::BAD_GATEWAY,
                }
            }
            Error::UpstreamShape(_) => StatusCode::BAD_GATEWAY,
            Error::Unexpected(_) | Error::Serialization(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Upstream { .. } => "UPSTREAM_ERROR",
            Error::UpstreamShape(_) => "UPSTREAM_SHAPE_ERROR",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Log internal errors with full context
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, "Internal server error");
        }

        let details = match &self {
            Error::Upstream { details, .. } => details.clone(),
            _ => None,
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "details": details,
            }
        }));

        (status, body).into_response()
    }
}
