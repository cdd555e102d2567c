//! Axum route handlers for the Advice API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CareerAdviceRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CareerAdviceResponse {
    pub status: &'static str,
    pub jobs: String,
    pub courses: String,
    pub advice: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/career-advice
///
/// Retrieves matching jobs and courses for the query and asks the model for advice.
/// A generation failure still returns both summaries with status "partial".
pub async fn handle_career_advice(
    State(state): State<AppState>,
    payload: Result<Json<CareerAdviceRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))?;

    let query = request
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation("query cannot be empty".to_string()))?;

    let result = state.advisor.query(&query).await?;

    match result.advice {
        Ok(advice) => Ok(Json(CareerAdviceResponse {
            status: "success",
            jobs: result.jobs_summary,
            courses: result.courses_summary,
            advice,
        })
        .into_response()),
        Err(e) => {
            tracing::error!("{e}");
            let body = Json(json!({
                "status": "partial",
                "jobs": result.jobs_summary,
                "courses": result.courses_summary,
                "error": {
                    "code": "ADVICE_GENERATION_ERROR",
                    "message": "Advice could not be generated; retrieval results are included"
                }
            }));
            Ok((StatusCode::BAD_GATEWAY, body).into_response())
        }
    }
}
