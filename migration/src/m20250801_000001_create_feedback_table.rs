use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // フィードバックテーブルの作成
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::ContentQuality).integer().not_null())
                    .col(ColumnDef::new(Feedback::Clarity).integer().not_null())
                    .col(ColumnDef::new(Feedback::Engagement).integer().not_null())
                    .col(ColumnDef::new(Feedback::Satisfaction).integer().not_null())
                    .col(ColumnDef::new(Feedback::ApplyLikelihood).integer().not_null())
                    .col(ColumnDef::new(Feedback::MostValuable).text().not_null())
                    .col(ColumnDef::new(Feedback::Improvements).text().not_null())
                    .col(ColumnDef::new(Feedback::Recommend).text().not_null())
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Feedback::IpAddress).text())
                    .col(ColumnDef::new(Feedback::UserAgent).text())
                    .to_owned(),
            )
            .await?;

        // 管理画面の新しい順ソート用
        manager
            .create_index(
                Index::create()
                    .name("idx_feedback_created_at")
                    .table(Feedback::Table)
                    .col(Feedback::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Feedback {
    Table,
    Id,
    ContentQuality,
    Clarity,
    Engagement,
    Satisfaction,
    ApplyLikelihood,
    MostValuable,
    Improvements,
    Recommend,
    CreatedAt,
    IpAddress,
    UserAgent,
}
