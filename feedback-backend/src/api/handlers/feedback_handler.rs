// feedback-backend/src/api/handlers/feedback_handler.rs
use crate::api::dto::feedback_dto::SubmissionResponse;
use crate::api::AppState;
use crate::error::AppResult;
use crate::extractors::{ClientMetadata, FeedbackSubmission};
use axum::{extract::State, routing::post, Json, Router};
use tracing::info;

/// フォーム送信を受け付ける（urlencoded / multipart）
pub async fn submit_feedback_handler(
    State(app_state): State<AppState>,
    ClientMetadata(metadata): ClientMetadata,
    FeedbackSubmission(form): FeedbackSubmission,
) -> AppResult<Json<SubmissionResponse>> {
    let receipt = app_state.feedback_service.submit(&form, metadata).await?;

    info!(feedback_id = receipt.id, "Feedback submission accepted");

    Ok(Json(SubmissionResponse::success(receipt.redirect)))
}

pub fn feedback_router(app_state: AppState) -> Router {
    Router::new()
        .route("/submit-feedback", post(submit_feedback_handler))
        .with_state(app_state)
}
