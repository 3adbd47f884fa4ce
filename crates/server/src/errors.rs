use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error, warn};

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found. Only authorized users can be updated.";

/// Per-request failures. Transport-level problems answer in plain text,
/// domain errors as `{"status":"error","message":...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Error reading request body")]
    UnreadableBody(String),
    #[error("Error parsing JSON")]
    MalformedJson(#[source] serde_json::Error),
    #[error("{}", USER_NOT_FOUND_MESSAGE)]
    UserNotFound,
    #[error("Error saving database")]
    Storage(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.to_string();
        match self {
            ApiError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, msg).into_response(),
            ApiError::UnreadableBody(detail) => {
                warn!(error = %detail, "failed to read request body");
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::MalformedJson(e) => {
                debug!(error = %e, "rejected malformed request json");
                (StatusCode::BAD_REQUEST, msg).into_response()
            }
            ApiError::UserNotFound => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"status": "error", "message": msg})),
            )
                .into_response(),
            ApiError::Storage(e) => {
                error!(error = %e, "failed to persist user store");
                (StatusCode::INTERNAL_SERVER_ERROR, msg).into_response()
            }
        }
    }
}

/// Failures before the first request is served; all of them are fatal.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot load user store: {0}")]
    Storage(#[from] ServiceError),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}
