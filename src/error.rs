use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Inference endpoint returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected inference response shape: {0}")]
    UnexpectedShape(String),

    #[error("Unparseable model output: {0}")]
    UnparseableResponse(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Missing credentials and missing resources can never succeed on a later
    /// attempt; everything else coming back from the endpoint is worth another try.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Error::Config(_) | Error::NotFound(_) | Error::BadRequest(_)
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Upstream { status, .. } => (
                StatusCode::BAD_GATEWAY,
                format!("Inference service error: {}", status),
            ),
            Error::Reqwest(err) => (StatusCode::BAD_GATEWAY, format!("External service error: {}", err)),
            Error::UnexpectedShape(msg) | Error::UnparseableResponse(msg) => {
                (StatusCode::BAD_GATEWAY, msg)
            }
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Anyhow(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
