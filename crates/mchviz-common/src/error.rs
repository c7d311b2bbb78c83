use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Failures signalled by a content backend.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The backend could not produce the requested plot.
    #[error("Failed to graph: {0}")]
    FailToGraph(String),

    #[error("Content backend unavailable: {0}")]
    Unavailable(String),
}

pub type ContentResult<T> = std::result::Result<T, ContentError>;

/// Errors surfaced to HTTP clients as a JSON body with a matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Template(_) | ApiError::Content(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
