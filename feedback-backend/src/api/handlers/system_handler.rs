// feedback-backend/src/api/handlers/system_handler.rs
use crate::api::AppState;
use crate::db;
use crate::error::AppResult;
use axum::{extract::State, routing::get, Router};

/// DB へ到達できれば "OK"
pub async fn health_check_handler(State(app_state): State<AppState>) -> AppResult<&'static str> {
    db::ping(&app_state.db).await?;
    Ok("OK")
}

pub fn system_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .with_state(app_state)
}
