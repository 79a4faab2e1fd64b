// src/domain/submission_log_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

use super::submission_status::SubmissionStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub feedback_id: Option<i32>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::feedback_model::Entity",
        from = "Column::FeedbackId",
        to = "super::feedback_model::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Feedback,
}

impl Related<super::feedback_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn status(&self) -> Option<SubmissionStatus> {
        self.status.parse().ok()
    }
}

// 監査ログエントリービルダー
pub struct SubmissionLogBuilder {
    feedback_id: Option<i32>,
    status: SubmissionStatus,
    error_message: Option<String>,
}

impl SubmissionLogBuilder {
    pub fn new(status: SubmissionStatus) -> Self {
        Self {
            feedback_id: None,
            status,
            error_message: None,
        }
    }

    pub fn success(feedback_id: i32) -> Self {
        Self::new(SubmissionStatus::Success).feedback_id(feedback_id)
    }

    pub fn email_failed(feedback_id: i32, error: impl Into<String>) -> Self {
        Self::new(SubmissionStatus::EmailFailed)
            .feedback_id(feedback_id)
            .error_message(error)
    }

    pub fn database_error(error: impl Into<String>) -> Self {
        Self::new(SubmissionStatus::DatabaseError).error_message(error)
    }

    pub fn feedback_id(mut self, id: i32) -> Self {
        self.feedback_id = Some(id);
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn build(self) -> ActiveModel {
        // error_message は失敗ステータスでのみ保持する
        let error_message = if self.status.is_failure() {
            self.error_message
        } else {
            None
        };

        ActiveModel {
            id: NotSet,
            feedback_id: Set(self.feedback_id),
            status: Set(self.status.as_str().to_string()),
            error_message: Set(error_message),
            created_at: Set(Utc::now()),
        }
    }
}
