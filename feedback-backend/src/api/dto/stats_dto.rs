// feedback-backend/src/api/dto/stats_dto.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::repository::feedback_repository::RatingAverages;

/// 評価項目ごとの平均（小数第 2 位で丸め、レコードが無ければ null）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageRatingsDto {
    pub content_quality: Option<f64>,
    pub clarity: Option<f64>,
    pub engagement: Option<f64>,
    pub satisfaction: Option<f64>,
    pub apply_likelihood: Option<f64>,
}

impl From<RatingAverages> for AverageRatingsDto {
    fn from(averages: RatingAverages) -> Self {
        Self {
            content_quality: averages.content_quality.and_then(round2),
            clarity: averages.clarity.and_then(round2),
            engagement: averages.engagement.and_then(round2),
            satisfaction: averages.satisfaction.and_then(round2),
            apply_likelihood: averages.apply_likelihood.and_then(round2),
        }
    }
}

/// `GET /api/feedback/stats` のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStatsDto {
    pub total_submissions: u64,
    pub average_ratings: AverageRatingsDto,
    pub recommendations: BTreeMap<String, u64>,
}

/// 小数第 2 位で丸める（ちょうど半分は偶数側）。有限値でなければ None（JSON では null）
pub fn round2(value: f64) -> Option<f64> {
    value
        .is_finite()
        .then(|| (value * 100.0).round_ties_even() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.0), Some(4.0));
        assert_eq!(round2(3.333333), Some(3.33));
        assert_eq!(round2(3.666666), Some(3.67));
        // ちょうど半分
        assert_eq!(round2(17.0 / 8.0), Some(2.12));
        assert_eq!(round2(2.375), Some(2.38));
        assert_eq!(round2(0.125), Some(0.12));
        // 2.675 は二進表現で半分より僅かに小さい
        assert_eq!(round2(2.675), Some(2.67));
        assert_eq!(round2(f64::NAN), None);
        assert_eq!(round2(f64::INFINITY), None);
    }

    #[test]
    fn test_empty_stats_serialize_nulls() {
        let stats = FeedbackStatsDto {
            total_submissions: 0,
            average_ratings: RatingAverages::default().into(),
            recommendations: BTreeMap::new(),
        };

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_submissions"], 0);
        assert!(json["average_ratings"]["content_quality"].is_null());
        assert!(json["average_ratings"]["apply_likelihood"].is_null());
        assert_eq!(json["recommendations"], serde_json::json!({}));
    }
}
