// src/error.rs

use crate::utils::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const DATABASE_ERROR_MESSAGE: &str = "Database error occurred. Please try again.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}

// axum でエラーをHTTPレスポンスに変換するための実装
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    success: false,
                    message: err.message(),
                    field: Some(err.field.as_str().to_string()),
                    error_type: "validation_error".to_string(),
                },
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    success: false,
                    message,
                    field: None,
                    error_type: "bad_request".to_string(),
                },
            ),
            AppError::PayloadTooLarge(message) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse {
                    success: false,
                    message,
                    field: None,
                    error_type: "payload_too_large".to_string(),
                },
            ),
            AppError::Database(detail) => {
                // サーバーログには詳細を出し、クライアントには固定文言のみ返す
                error!(detail = %detail, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        success: false,
                        message: DATABASE_ERROR_MESSAGE.to_string(),
                        field: None,
                        error_type: "database_error".to_string(),
                    },
                )
            }
            AppError::Unexpected(detail) => {
                error!(detail = %detail, "Unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::unexpected(),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;

/// 統一的なエラーレスポンス構造
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub error_type: String,
}

impl ErrorResponse {
    pub fn unexpected() -> Self {
        Self {
            success: false,
            message: UNEXPECTED_ERROR_MESSAGE.to_string(),
            field: None,
            error_type: "unexpected_error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback_form::FeedbackField;
    use crate::utils::validation::ValidationReason;

    #[test]
    fn test_validation_error_is_bad_request() {
        let err = AppError::from(ValidationError::new(
            FeedbackField::Clarity,
            ValidationReason::OutOfRange,
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_database_and_unexpected_are_server_errors() {
        let db = AppError::from(DbErr::Custom("locked".to_string()));
        assert!(matches!(db, AppError::Database(ref d) if d.contains("locked")));
        assert_eq!(db.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let unexpected = AppError::Unexpected("boom".to_string());
        assert_eq!(
            unexpected.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
