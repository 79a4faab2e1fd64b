//! インメモリ SQLite を使ったテスト用データベース

use feedback_backend::config::AppConfig;
use feedback_backend::db::{create_db_pool, run_migrations};
use feedback_backend::domain::{feedback_model, submission_log_model};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

pub struct TestDatabase {
    pub connection: DatabaseConnection,
}

impl TestDatabase {
    /// テストごとに独立した DB を作成し、マイグレーションを適用する
    pub async fn new() -> Self {
        let config = AppConfig::for_testing();

        let connection = create_db_pool(&config)
            .await
            .expect("connect to in-memory sqlite");
        run_migrations(&connection).await.expect("run migrations");

        Self { connection }
    }

    /// 任意の SQL を実行（障害を再現するトリガーの作成用）
    pub async fn execute(&self, sql: &str) {
        self.connection
            .execute_unprepared(sql)
            .await
            .unwrap_or_else(|e| panic!("failed to execute `{}`: {}", sql, e));
    }

    /// feedback への INSERT を常に失敗させる
    pub async fn fail_feedback_inserts(&self) {
        self.execute(
            "CREATE TRIGGER fail_feedback_insert BEFORE INSERT ON feedback \
             BEGIN SELECT RAISE(ABORT, 'simulated feedback insert failure'); END;",
        )
        .await;
    }

    /// 指定ステータスの監査ログ INSERT を失敗させる（None なら全ステータス）
    pub async fn fail_log_inserts(&self, status: Option<&str>) {
        let (name, condition) = match status {
            Some(status) => (
                format!("fail_log_insert_{}", status),
                format!("WHEN NEW.status = '{}' ", status),
            ),
            None => ("fail_log_insert_all".to_string(), String::new()),
        };
        self.execute(&format!(
            "CREATE TRIGGER {} BEFORE INSERT ON submissions_log {}\
             BEGIN SELECT RAISE(ABORT, 'simulated audit insert failure'); END;",
            name, condition
        ))
        .await;
    }

    pub async fn feedback_count(&self) -> u64 {
        feedback_model::Entity::find()
            .count(&self.connection)
            .await
            .unwrap()
    }

    pub async fn logs(&self) -> Vec<submission_log_model::Model> {
        submission_log_model::Entity::find()
            .order_by_asc(submission_log_model::Column::Id)
            .all(&self.connection)
            .await
            .unwrap()
    }
}
