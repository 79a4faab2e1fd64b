// src/db.rs
use crate::config::AppConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::time::Duration;

pub type DbPool = DatabaseConnection;

pub async fn create_db_pool(config: &AppConfig) -> Result<DbPool, DbErr> {
    let mut opt = ConnectOptions::new(config.database.url.clone());

    // インメモリ SQLite は接続ごとに別 DB になるため 1 接続に固定
    let max_connections = if is_in_memory(&config.database.url) {
        1
    } else {
        config.database.max_connections
    };

    // 接続オプションを設定
    opt.max_connections(max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.debug);

    Database::connect(opt).await
}

/// 未適用のマイグレーションをすべて適用する
pub async fn run_migrations(conn: &DbPool) -> Result<(), DbErr> {
    Migrator::up(conn, None).await
}

/// 接続確認（ヘルスチェック用）
pub async fn ping(conn: &DbPool) -> Result<(), DbErr> {
    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await?;
    Ok(())
}

fn is_in_memory(url: &str) -> bool {
    url.starts_with("sqlite::memory:") || url.contains("mode=memory")
}
