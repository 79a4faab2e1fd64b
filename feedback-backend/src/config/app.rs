use super::mail::MailConfig;
use dotenvy::dotenv;
use std::env;
use thiserror::Error;

pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key";
pub const DEFAULT_DATABASE_PATH: &str = "feedback.db";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub body_limit: usize,
}

/// 起動時に一度だけ構築し、各サービスへ注入する設定
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub secret_key: String,
    pub debug: bool,
    pub mail: MailConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意のキー解決関数から設定を構築する
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value,
            })?,
            None => 5000,
        };

        // DATABASE_URL が優先、なければ DATABASE_PATH の SQLite ファイル
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            let path = lookup("DATABASE_PATH").unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());
            sqlite_url(&path)
        });

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            secret_key: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            debug: lookup("APP_DEBUG").is_some_and(|value| parse_flag(&value)),
            mail: MailConfig::from_lookup(&lookup)?,
            server: ServerConfig {
                body_limit: 64 * 1024, // 64KB
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// RUST_LOG 未指定時のフィルタ
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "feedback_backend=debug,tower_http=debug"
        } else {
            "feedback_backend=info,tower_http=info"
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }

    /// テスト用の設定を作成（インメモリ SQLite、メール通知なし）
    pub fn for_testing() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            secret_key: "test-secret-key".to_string(),
            debug: true,
            mail: MailConfig::default(),
            server: ServerConfig {
                body_limit: 64 * 1024,
            },
        }
    }
}

/// "true" (大文字小文字を区別しない) のみ真とみなす
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn sqlite_url(path: &str) -> String {
    format!("sqlite://{}?mode=rwc", path)
}
