// src/repository/submission_log_repository.rs
use crate::domain::submission_log_model::{
    self, ActiveModel as SubmissionLogActiveModel, Entity as SubmissionLogEntity,
    Model as SubmissionLogModel,
};
use crate::domain::submission_status::SubmissionStatus;
use crate::with_transaction;
use sea_orm::{entity::*, query::*, DbConn, DbErr, PaginatorTrait};

pub struct SubmissionLogRepository {
    db: DbConn,
}

impl SubmissionLogRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// 監査ログを独立したトランザクションで追記
    pub async fn create(
        &self,
        entry: SubmissionLogActiveModel,
    ) -> Result<SubmissionLogModel, DbErr> {
        with_transaction!(self.db, |txn| async move { entry.insert(txn).await })
    }

    pub async fn find_by_feedback_id(
        &self,
        feedback_id: i32,
    ) -> Result<Vec<SubmissionLogModel>, DbErr> {
        SubmissionLogEntity::find()
            .filter(submission_log_model::Column::FeedbackId.eq(feedback_id))
            .order_by_asc(submission_log_model::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn find_by_status(
        &self,
        status: SubmissionStatus,
    ) -> Result<Vec<SubmissionLogModel>, DbErr> {
        SubmissionLogEntity::find()
            .filter(submission_log_model::Column::Status.eq(status.as_str()))
            .order_by_asc(submission_log_model::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn count_by_status(&self, status: SubmissionStatus) -> Result<u64, DbErr> {
        SubmissionLogEntity::find()
            .filter(submission_log_model::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
    }
}
