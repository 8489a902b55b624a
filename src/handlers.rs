use crate::error::AppError;
use crate::models::{QuizRequest, QuizResponse};
use crate::state::{self, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

fn request_id_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn generate_quiz_info() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Quiz API is working",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST": "Generate a multiple-choice quiz"
        }
    }))
}

pub async fn generate_quiz(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>, AppError> {
    let req_id = request_id_from_headers(&headers);
    let Json(payload) = payload
        .map_err(|rejection| AppError::validation(rejection.status(), rejection.body_text(), req_id.clone()))?;
    payload
        .validate()
        .map_err(|errors| AppError::validation(StatusCode::UNPROCESSABLE_ENTITY, errors.to_string(), req_id.clone()))?;

    info!(
        request_id = %req_id,
        topic = %payload.topic,
        difficulty = %payload.difficulty,
        "generating quiz"
    );

    match state::generate_quiz(&state, &payload).await {
        Ok(quiz) => Ok(Json(quiz)),
        Err(err) => {
            warn!(request_id = %req_id, code = err.code(), "quiz generation failed: {}", err);
            Err(AppError::upstream(err, req_id))
        }
    }
}
