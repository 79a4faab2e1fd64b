// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// フィードバック関連マイグレーション
mod m20250801_000001_create_feedback_table;
mod m20250801_000002_create_submissions_log_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. フィードバック本体
            Box::new(m20250801_000001_create_feedback_table::Migration),
            // 2. 監査ログ（feedback への外部キーを持つ）
            Box::new(m20250801_000002_create_submissions_log_table::Migration),
        ]
    }
}
