// feedback-backend/src/api/handlers/stats_handler.rs
use crate::api::dto::stats_dto::FeedbackStatsDto;
use crate::api::AppState;
use crate::error::AppResult;
use axum::{extract::State, routing::get, Json, Router};

pub async fn get_feedback_stats_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<FeedbackStatsDto>> {
    let stats = app_state.stats_service.compute_stats().await?;
    Ok(Json(stats))
}

pub fn stats_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/feedback/stats", get(get_feedback_stats_handler))
        .with_state(app_state)
}
