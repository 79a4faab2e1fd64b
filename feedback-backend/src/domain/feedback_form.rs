// src/domain/feedback_form.rs

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use serde::Deserialize;
use std::fmt;

use super::feedback_model;

/// フォームのフィールド名（検証順）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackField {
    ContentQuality,
    Clarity,
    Engagement,
    Satisfaction,
    ApplyLikelihood,
    MostValuable,
    Improvements,
    Recommend,
}

impl FeedbackField {
    /// 必須フィールド（存在チェックはこの順で行う）
    pub const REQUIRED: [Self; 8] = [
        Self::ContentQuality,
        Self::Clarity,
        Self::Engagement,
        Self::Satisfaction,
        Self::ApplyLikelihood,
        Self::MostValuable,
        Self::Improvements,
        Self::Recommend,
    ];

    /// 1〜5 の評価フィールド
    pub const RATINGS: [Self; 5] = [
        Self::ContentQuality,
        Self::Clarity,
        Self::Engagement,
        Self::Satisfaction,
        Self::ApplyLikelihood,
    ];

    /// フォーム上のキー名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContentQuality => "content_quality",
            Self::Clarity => "clarity",
            Self::Engagement => "engagement",
            Self::Satisfaction => "satisfaction",
            Self::ApplyLikelihood => "apply_likelihood",
            Self::MostValuable => "most_valuable",
            Self::Improvements => "improvements",
            Self::Recommend => "recommend",
        }
    }

    /// フォーム上のキー名から逆引き
    pub fn from_form_key(key: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|field| field.as_str() == key)
    }

    /// 画面・メッセージ用のセクション名
    pub fn section_name(&self) -> &'static str {
        match self {
            Self::ContentQuality => "Content quality",
            Self::Clarity => "Clarity",
            Self::Engagement => "Engagement",
            Self::Satisfaction => "Overall satisfaction",
            Self::ApplyLikelihood => "Likelihood to apply",
            Self::MostValuable => "Most valuable",
            Self::Improvements => "Improvements",
            Self::Recommend => "Recommendation",
        }
    }
}

impl fmt::Display for FeedbackField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `POST /submit-feedback` のフォーム入力（未検証）
///
/// すべて任意項目として受け取り、存在チェックはバリデータで行う。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    pub content_quality: Option<String>,
    pub clarity: Option<String>,
    pub engagement: Option<String>,
    pub satisfaction: Option<String>,
    pub apply_likelihood: Option<String>,
    pub most_valuable: Option<String>,
    pub improvements: Option<String>,
    pub recommend: Option<String>,
}

impl FeedbackForm {
    pub fn get(&self, field: FeedbackField) -> Option<&str> {
        let value = match field {
            FeedbackField::ContentQuality => &self.content_quality,
            FeedbackField::Clarity => &self.clarity,
            FeedbackField::Engagement => &self.engagement,
            FeedbackField::Satisfaction => &self.satisfaction,
            FeedbackField::ApplyLikelihood => &self.apply_likelihood,
            FeedbackField::MostValuable => &self.most_valuable,
            FeedbackField::Improvements => &self.improvements,
            FeedbackField::Recommend => &self.recommend,
        };
        value.as_deref()
    }

    /// 未設定の場合のみ値を入れる（同名フィールドは最初の値を採用）
    pub fn set_if_absent(&mut self, field: FeedbackField, value: String) {
        let slot = match field {
            FeedbackField::ContentQuality => &mut self.content_quality,
            FeedbackField::Clarity => &mut self.clarity,
            FeedbackField::Engagement => &mut self.engagement,
            FeedbackField::Satisfaction => &mut self.satisfaction,
            FeedbackField::ApplyLikelihood => &mut self.apply_likelihood,
            FeedbackField::MostValuable => &mut self.most_valuable,
            FeedbackField::Improvements => &mut self.improvements,
            FeedbackField::Recommend => &mut self.recommend,
        };
        slot.get_or_insert(value);
    }
}

/// リクエスト由来の付帯情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// 検証済みのフィードバック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub content_quality: i32,
    pub clarity: i32,
    pub engagement: i32,
    pub satisfaction: i32,
    pub apply_likelihood: i32,
    pub most_valuable: String,
    pub improvements: String,
    pub recommend: String,
}

impl NewFeedback {
    pub fn into_active_model(
        self,
        metadata: RequestMetadata,
        created_at: DateTime<Utc>,
    ) -> feedback_model::ActiveModel {
        feedback_model::ActiveModel {
            id: NotSet,
            content_quality: Set(self.content_quality),
            clarity: Set(self.clarity),
            engagement: Set(self.engagement),
            satisfaction: Set(self.satisfaction),
            apply_likelihood: Set(self.apply_likelihood),
            most_valuable: Set(self.most_valuable),
            improvements: Set(self.improvements),
            recommend: Set(self.recommend),
            created_at: Set(created_at),
            ip_address: Set(metadata.ip_address),
            user_agent: Set(metadata.user_agent),
        }
    }
}
