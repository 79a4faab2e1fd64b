use sea_orm_migration::prelude::*;

use crate::m20250801_000001_create_feedback_table::Feedback;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 送信監査ログテーブルの作成（追記専用）
        manager
            .create_table(
                Table::create()
                    .table(SubmissionsLog::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubmissionsLog::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    // DB エラー時はフィードバックが存在しないため NULL 許容
                    .col(ColumnDef::new(SubmissionsLog::FeedbackId).integer())
                    .col(ColumnDef::new(SubmissionsLog::Status).string().not_null())
                    .col(ColumnDef::new(SubmissionsLog::ErrorMessage).text())
                    .col(
                        ColumnDef::new(SubmissionsLog::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_log_feedback_id")
                            .from(SubmissionsLog::Table, SubmissionsLog::FeedbackId)
                            .to(Feedback::Table, Feedback::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        // インデックスの作成
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_log_feedback_id")
                    .table(SubmissionsLog::Table)
                    .col(SubmissionsLog::FeedbackId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_log_status")
                    .table(SubmissionsLog::Table)
                    .col(SubmissionsLog::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubmissionsLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SubmissionsLog {
    Table,
    Id,
    FeedbackId,
    Status,
    ErrorMessage,
    CreatedAt,
}
