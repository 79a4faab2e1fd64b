// feedback-backend/src/api/dto/feedback_dto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::feedback_model::Model as FeedbackModel;

pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Feedback submitted successfully!";

/// `POST /submit-feedback` の成功レスポンス
///
/// 失敗時は [`crate::error::ErrorResponse`] が同じ `success` / `message` 形式で返る。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl SubmissionResponse {
    pub fn success(redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            message: SUBMISSION_SUCCESS_MESSAGE.to_string(),
            redirect: Some(redirect.into()),
        }
    }
}

/// 管理画面の一覧行
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackDto {
    pub id: i32,
    pub content_quality: i32,
    pub clarity: i32,
    pub engagement: i32,
    pub satisfaction: i32,
    pub apply_likelihood: i32,
    pub most_valuable: String,
    pub improvements: String,
    pub recommend: String,
    pub created_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<FeedbackModel> for FeedbackDto {
    fn from(model: FeedbackModel) -> Self {
        Self {
            id: model.id,
            content_quality: model.content_quality,
            clarity: model.clarity,
            engagement: model.engagement,
            satisfaction: model.satisfaction,
            apply_likelihood: model.apply_likelihood,
            most_valuable: model.most_valuable,
            improvements: model.improvements,
            recommend: model.recommend,
            created_at: model.created_at,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
        }
    }
}

/// 監査ログのステータス別件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummaryDto {
    pub success: u64,
    pub email_failed: u64,
    pub database_error: u64,
}
