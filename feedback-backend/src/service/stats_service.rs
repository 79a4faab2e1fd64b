// feedback-backend/src/service/stats_service.rs

use crate::api::dto::stats_dto::FeedbackStatsDto;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::log_with_context;
use crate::repository::feedback_repository::FeedbackRepository;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 集計はリクエストごとに計算する（キャッシュなし）
pub struct StatsService {
    feedback_repo: Arc<FeedbackRepository>,
}

impl StatsService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            feedback_repo: Arc::new(FeedbackRepository::new(db_pool)),
        }
    }

    pub async fn compute_stats(&self) -> AppResult<FeedbackStatsDto> {
        let total_submissions = self.feedback_repo.count_all().await?;
        let averages = self.feedback_repo.rating_averages().await?;

        let recommendations: BTreeMap<String, u64> = self
            .feedback_repo
            .count_by_recommend()
            .await?
            .into_iter()
            .map(|(value, count)| (value, u64::try_from(count).unwrap_or_default()))
            .collect();

        log_with_context!(
            tracing::Level::DEBUG,
            "Feedback stats computed",
            "total_submissions" => total_submissions,
            "recommend_values" => recommendations.len()
        );

        Ok(FeedbackStatsDto {
            total_submissions,
            average_ratings: averages.into(),
            recommendations,
        })
    }
}
