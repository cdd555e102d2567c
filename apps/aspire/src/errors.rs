use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::advice::orchestrator::AdviceError;
use crate::embedding::EmbeddingError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(#[from] EmbeddingError),
}

impl From<AdviceError> for AppError {
    fn from(err: AdviceError) -> Self {
        match err {
            AdviceError::EmptyQuery => AppError::Validation(err.to_string()),
            AdviceError::EmbeddingService(e) => AppError::EmbeddingService(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::EmbeddingService(e) => {
                tracing::error!("Embedding service error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EMBEDDING_SERVICE_ERROR",
                    "The query could not be embedded".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
