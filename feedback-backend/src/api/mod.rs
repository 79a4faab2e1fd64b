// feedback-backend/src/api/mod.rs
use crate::config::AppConfig;
use crate::db::DbPool;
use crate::error::ErrorResponse;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::{feedback_service::FeedbackService, stats_service::StatsService};
use crate::utils::email::Notifier;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::error;

pub mod dto;
pub mod handlers;

use handlers::{
    feedback_handler::feedback_router, page_handler::page_router, stats_handler::stats_router,
    system_handler::system_router,
};

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub feedback_service: Arc<FeedbackService>,
    pub stats_service: Arc<StatsService>,
    pub db: DbPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            feedback_service: Arc::new(FeedbackService::new(db.clone(), notifier)),
            stats_service: Arc::new(StatsService::new(db.clone())),
            db,
            config: Arc::new(config),
        }
    }
}

/// 全ルートとミドルウェアを組み立てる
pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.server.body_limit;

    Router::new()
        .merge(page_router(app_state.clone()))
        .merge(feedback_router(app_state.clone()))
        .merge(stats_router(app_state.clone()))
        .merge(system_router(app_state))
        // Form / Multipart extractor が上限超過を 413 の Rejection として返す
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        // 最外周。ハンドラー内の panic も JSON の 500 として返す
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(detail = %detail, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::unexpected()),
    )
        .into_response()
}
