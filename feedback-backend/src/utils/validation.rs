// feedback-backend/src/utils/validation.rs

//! フィードバック入力の検証
//!
//! 存在 → 範囲 → 文字数の順にチェックし、最初に見つかった違反のみを返す。

use crate::domain::feedback_form::{FeedbackField, FeedbackForm, NewFeedback};
use std::num::IntErrorKind;
use thiserror::Error;
use validator::{ValidateLength, ValidateRange};

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// 自由記述欄の最大文字数（トリム後）
pub const MAX_TEXT_LENGTH: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    NotAnInteger,
    OutOfRange,
    TooLong,
}

/// 入力の拒否理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.message())]
pub struct ValidationError {
    pub field: FeedbackField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: FeedbackField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }

    /// クライアントに返すメッセージ
    pub fn message(&self) -> String {
        match self.reason {
            ValidationReason::Missing => format!("Missing or empty field: {}", self.field),
            ValidationReason::NotAnInteger => format!(
                "{} must be a whole number between {} and {}",
                self.field, RATING_MIN, RATING_MAX
            ),
            ValidationReason::OutOfRange => format!(
                "{} must be between {} and {}",
                self.field, RATING_MIN, RATING_MAX
            ),
            ValidationReason::TooLong => {
                format!("{} section exceeds maximum length", self.field.section_name())
            }
        }
    }
}

/// フォーム入力を検証し、正規化済みのフィードバックを返す
pub fn validate_feedback(form: &FeedbackForm) -> Result<NewFeedback, ValidationError> {
    // 1. 必須フィールド
    for field in FeedbackField::REQUIRED {
        require(form, field)?;
    }

    // 2. 評価値（1〜5 の整数）
    let mut ratings = [0; 5];
    for (slot, field) in ratings.iter_mut().zip(FeedbackField::RATINGS) {
        *slot = parse_rating(field, require(form, field)?)?;
    }
    let [content_quality, clarity, engagement, satisfaction, apply_likelihood] = ratings;

    // 3. 自由記述の文字数
    let most_valuable = bounded_text(form, FeedbackField::MostValuable)?;
    let improvements = bounded_text(form, FeedbackField::Improvements)?;

    Ok(NewFeedback {
        content_quality,
        clarity,
        engagement,
        satisfaction,
        apply_likelihood,
        most_valuable,
        improvements,
        recommend: require(form, FeedbackField::Recommend)?.to_string(),
    })
}

/// 値が存在し、空白以外の文字を含むことを確認する
///
/// 返り値はトリム前の値。
fn require(form: &FeedbackForm, field: FeedbackField) -> Result<&str, ValidationError> {
    match form.get(field) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ValidationError::new(field, ValidationReason::Missing)),
    }
}

fn parse_rating(field: FeedbackField, raw: &str) -> Result<i32, ValidationError> {
    let value: i32 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
        let reason = match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ValidationReason::OutOfRange,
            _ => ValidationReason::NotAnInteger,
        };
        ValidationError::new(field, reason)
    })?;

    if value.validate_range(Some(RATING_MIN), Some(RATING_MAX), None, None) {
        Ok(value)
    } else {
        Err(ValidationError::new(field, ValidationReason::OutOfRange))
    }
}

fn bounded_text(form: &FeedbackForm, field: FeedbackField) -> Result<String, ValidationError> {
    let text = require(form, field)?.trim().to_string();
    if text.validate_length(None, Some(MAX_TEXT_LENGTH), None) {
        Ok(text)
    } else {
        Err(ValidationError::new(field, ValidationReason::TooLong))
    }
}
