use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Resume or email required")]
    MissingInput,

    #[error("Resume not found")]
    ResumeNotFound,

    #[error("Resume file is empty or invalid")]
    EmptyResume,

    #[error("API request failed with status {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("API returned an unparseable body: {0}")]
    UpstreamMalformedResponse(String),

    #[error("Resume store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Auth service unavailable: {0}")]
    AuthUnavailable(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::MissingInput | AppError::EmptyResume => {
                StatusCode::BAD_REQUEST
            }
            AppError::ResumeNotFound => StatusCode::NOT_FOUND,
            AppError::UpstreamError { .. }
            | AppError::UpstreamMalformedResponse(_)
            | AppError::StoreUnavailable(_)
            | AppError::NetworkError(_)
            | AppError::AuthUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            AppError::InvalidInput(_)
            | AppError::MissingInput
            | AppError::ResumeNotFound
            | AppError::EmptyResume => json!({ "error": self.to_string() }),
            AppError::UpstreamError { .. }
            | AppError::UpstreamMalformedResponse(_)
            | AppError::NetworkError(_) => json!({
                "error": "Failed to fetch jobs",
                "details": self.to_string(),
            }),
            AppError::StoreUnavailable(e) => json!({
                "error": "Resume store unavailable",
                "details": e.to_string(),
            }),
            AppError::AuthUnavailable(msg) => json!({
                "message": "Auth service unavailable",
                "error": msg,
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("{self}");
        }

        (status, Json(self.body())).into_response()
    }
}
