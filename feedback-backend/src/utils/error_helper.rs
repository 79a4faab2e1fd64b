// feedback-backend/src/utils/error_helper.rs

//! エラーハンドリングの統一化ヘルパー
//!
//! サービス層で共通して使用するログ付きエラー変換を提供します。

use crate::error::AppError;
use tracing::error;

/// データベースエラーをログ付きで生成
///
/// # Arguments
/// * `error` - 元のエラー
/// * `context` - エラーが発生したコンテキスト
pub fn database_error<E: std::fmt::Display>(error: E, context: &str) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Database operation failed"
    );
    AppError::Database(format!("{}: {}", context, error))
}

/// 想定外のエラーをログ付きで生成
pub fn internal_server_error<E: std::fmt::Display>(error: E, context: &str) -> AppError {
    error!(
        error = %error,
        context = %context,
        "Internal server error occurred"
    );
    AppError::Unexpected(format!("{}: {}", context, error))
}
