// feedback-backend/src/extractors/feedback_submission.rs
use crate::domain::feedback_form::{FeedbackField, FeedbackForm};
use crate::error::AppError;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::FormRejection,
        FromRequest, Multipart, Request,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Form,
};

/// フィードバックフォームの本文を取り出す Extractor
///
/// `application/x-www-form-urlencoded` と `multipart/form-data` の両方を受け付ける。
/// 未知のフィールドは読み飛ばす。
#[derive(Debug, Clone, Default)]
pub struct FeedbackSubmission(pub FeedbackForm);

impl<S> FromRequest<S> for FeedbackSubmission
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(req.headers()) {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(multipart_rejection_to_error)?;
            return read_multipart(multipart).await.map(FeedbackSubmission);
        }

        let Form(form) = Form::<FeedbackForm>::from_request(req, state)
            .await
            .map_err(form_rejection_to_error)?;
        Ok(FeedbackSubmission(form))
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("multipart/form-data")
        })
}

async fn read_multipart(mut multipart: Multipart) -> Result<FeedbackForm, AppError> {
    let mut form = FeedbackForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error_to_error)?
    {
        let Some(key) = field.name().and_then(FeedbackField::from_form_key) else {
            continue;
        };
        let value = field.text().await.map_err(multipart_error_to_error)?;
        form.set_if_absent(key, value);
    }

    Ok(form)
}

fn to_app_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

fn form_rejection_to_error(rejection: FormRejection) -> AppError {
    to_app_error(rejection.status(), rejection.body_text())
}

fn multipart_rejection_to_error(rejection: MultipartRejection) -> AppError {
    to_app_error(rejection.status(), rejection.body_text())
}

fn multipart_error_to_error(error: MultipartError) -> AppError {
    to_app_error(
        error.status(),
        format!("Failed to read multipart data: {}", error.body_text()),
    )
}
