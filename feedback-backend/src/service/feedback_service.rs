// feedback-backend/src/service/feedback_service.rs

use crate::api::dto::feedback_dto::{AuditSummaryDto, FeedbackDto};
use crate::db::DbPool;
use crate::domain::feedback_form::{FeedbackForm, RequestMetadata};
use crate::domain::feedback_model::Model as FeedbackModel;
use crate::domain::submission_log_model::{Model as SubmissionLogModel, SubmissionLogBuilder};
use crate::domain::submission_status::SubmissionStatus;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::feedback_repository::FeedbackRepository;
use crate::repository::submission_log_repository::SubmissionLogRepository;
use crate::utils::email::Notifier;
use crate::utils::error_helper::{database_error, internal_server_error};
use crate::utils::validation::validate_feedback;
use chrono::Utc;
use std::sync::Arc;

/// 送信成功後の遷移先
pub const SUCCESS_REDIRECT: &str = "/success";

/// 保存に成功した送信の受領情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: i32,
    pub redirect: &'static str,
}

pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
    log_repo: Arc<SubmissionLogRepository>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl FeedbackService {
    pub fn new(db_pool: DbPool, notifier: Option<Arc<dyn Notifier>>) -> Self {
        Self {
            feedback_repo: Arc::new(FeedbackRepository::new(db_pool.clone())),
            log_repo: Arc::new(SubmissionLogRepository::new(db_pool)),
            notifier,
        }
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    /// フィードバックを検証・保存し、オペレーターへ通知する
    ///
    /// - 検証エラーは何も書き込まずに返す
    /// - 保存失敗は `database_error` を監査ログに残して 500
    /// - 通知失敗は `email_failed` を残すが結果は成功のまま
    pub async fn submit(
        &self,
        form: &FeedbackForm,
        metadata: RequestMetadata,
    ) -> AppResult<SubmissionReceipt> {
        let feedback = validate_feedback(form).inspect_err(|e| {
            log_with_context!(
                tracing::Level::WARN,
                "Feedback validation failed",
                "field" => e.field.as_str(),
                "reason" => &e.reason
            );
        })?;

        let active_model = feedback.into_active_model(metadata, Utc::now());

        let record = match self.feedback_repo.create_with_audit(active_model).await {
            Ok(record) => record,
            Err(e) => return Err(self.record_database_error(e.to_string()).await),
        };

        log_with_context!(
            tracing::Level::INFO,
            "Feedback stored",
            "feedback_id" => record.id,
            "recommend" => &record.recommend
        );

        self.notify(&record).await;

        Ok(SubmissionReceipt {
            id: record.id,
            redirect: SUCCESS_REDIRECT,
        })
    }

    // 保存失敗を独立したトランザクションで監査ログに残し、返すべきエラーを決める
    async fn record_database_error(&self, detail: String) -> AppError {
        let entry = SubmissionLogBuilder::database_error(detail.clone()).build();

        match self.log_repo.create(entry).await {
            Ok(_) => database_error(detail, "feedback_service::submit"),
            Err(audit_err) => {
                log_with_context!(
                    tracing::Level::ERROR,
                    "Failed to record database error in submissions log",
                    "original_error" => &detail,
                    "audit_error" => &audit_err.to_string()
                );
                internal_server_error(audit_err, "feedback_service::record_database_error")
            }
        }
    }

    // 通知はベストエフォート。失敗は email_failed として記録するのみ
    async fn notify(&self, record: &FeedbackModel) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        let Err(e) = notifier.send(record).await else {
            return;
        };

        log_with_context!(
            tracing::Level::WARN,
            "Feedback notification failed",
            "feedback_id" => record.id,
            "error" => &e.to_string()
        );

        let entry = SubmissionLogBuilder::email_failed(record.id, e.to_string()).build();
        if let Err(audit_err) = self.log_repo.create(entry).await {
            log_with_context!(
                tracing::Level::ERROR,
                "Failed to record email failure in submissions log",
                "feedback_id" => record.id,
                "error" => &audit_err.to_string()
            );
        }
    }

    /// 管理画面用に全件を新しい順で返す
    pub async fn list_all(&self) -> AppResult<Vec<FeedbackDto>> {
        let records = self.feedback_repo.find_all_newest_first().await?;
        Ok(records.into_iter().map(FeedbackDto::from).collect())
    }

    pub async fn get_feedback(&self, id: i32) -> AppResult<Option<FeedbackDto>> {
        Ok(self.feedback_repo.find_by_id(id).await?.map(Into::into))
    }

    pub async fn submission_logs(&self, feedback_id: i32) -> AppResult<Vec<SubmissionLogModel>> {
        Ok(self.log_repo.find_by_feedback_id(feedback_id).await?)
    }

    pub async fn logs_with_status(
        &self,
        status: SubmissionStatus,
    ) -> AppResult<Vec<SubmissionLogModel>> {
        Ok(self.log_repo.find_by_status(status).await?)
    }

    /// 監査ログのステータス別件数
    pub async fn audit_summary(&self) -> AppResult<AuditSummaryDto> {
        Ok(AuditSummaryDto {
            success: self.log_repo.count_by_status(SubmissionStatus::Success).await?,
            email_failed: self
                .log_repo
                .count_by_status(SubmissionStatus::EmailFailed)
                .await?,
            database_error: self
                .log_repo
                .count_by_status(SubmissionStatus::DatabaseError)
                .await?,
        })
    }
}
