// tests/common/app_helper.rs

use async_trait::async_trait;
use axum::Router;
use feedback_backend::{
    api::{create_router, AppState},
    config::AppConfig,
    domain::feedback_model::Model as FeedbackModel,
    utils::email::{NotificationError, Notifier},
};
use std::sync::{Arc, Mutex};

use crate::common;

/// 通知を送らずに ID だけ記録する Notifier
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<i32>>,
}

impl RecordingNotifier {
    pub fn sent_ids(&self) -> Vec<i32> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, record: &FeedbackModel) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(record.id);
        Ok(())
    }
}

/// 常に送信に失敗する Notifier
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _record: &FeedbackModel) -> Result<(), NotificationError> {
        Err(NotificationError::Transport(
            "connection refused by smtp relay".to_string(),
        ))
    }
}

/// 通知なしのアプリをセットアップ
pub async fn setup_app() -> (Router, common::db::TestDatabase) {
    setup_app_with_notifier(None).await
}

/// Notifier を差し込んでアプリをセットアップ
pub async fn setup_app_with_notifier(
    notifier: Option<Arc<dyn Notifier>>,
) -> (Router, common::db::TestDatabase) {
    common::init_test_env();

    let db = common::db::TestDatabase::new().await;
    let app_state = AppState::new(db.connection.clone(), AppConfig::for_testing(), notifier);

    (create_router(app_state), db)
}
