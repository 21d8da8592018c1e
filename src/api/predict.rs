//! Triage endpoint handler

use axum::{extract::State, http::HeaderMap};
use tracing::info;

use crate::api::middleware::REQUEST_ID_HEADER;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, PredictRequest, PredictResponse};

/// POST /api/predict
pub async fn predict(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    // Set by the logging middleware
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    info!(
        request_id = %request_id,
        question_chars = request.question.as_deref().map(str::len).unwrap_or(0),
        "Processing triage request"
    );

    let advice = state
        .triage_service
        .triage(request.question.as_deref())
        .await?;

    info!(request_id = %request_id, outcome = %advice.outcome, "Triage request completed");

    let question = if state.echo_question {
        request.question
    } else {
        None
    };

    Ok(Json(PredictResponse {
        answer: advice.answer,
        question,
    }))
}
