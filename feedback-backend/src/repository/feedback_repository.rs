// src/repository/feedback_repository.rs
use crate::domain::feedback_model::{
    self, ActiveModel as FeedbackActiveModel, Entity as FeedbackEntity, Model as FeedbackModel,
};
use crate::domain::submission_log_model::SubmissionLogBuilder;
use crate::with_transaction;
use sea_orm::{
    entity::*, query::*, sea_query::Expr, ConnectionTrait, DbConn, DbErr, PaginatorTrait,
    Statement,
};

/// 5 項目の平均値（レコードが無い場合はすべて None）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingAverages {
    pub content_quality: Option<f64>,
    pub clarity: Option<f64>,
    pub engagement: Option<f64>,
    pub satisfaction: Option<f64>,
    pub apply_likelihood: Option<f64>,
}

// AVG は PostgreSQL では NUMERIC を返すため倍精度に揃える
const RATING_AVERAGES_SQL: &str = "SELECT \
    CAST(AVG(content_quality) AS DOUBLE PRECISION) AS content_quality, \
    CAST(AVG(clarity) AS DOUBLE PRECISION) AS clarity, \
    CAST(AVG(engagement) AS DOUBLE PRECISION) AS engagement, \
    CAST(AVG(satisfaction) AS DOUBLE PRECISION) AS satisfaction, \
    CAST(AVG(apply_likelihood) AS DOUBLE PRECISION) AS apply_likelihood \
    FROM feedback";

pub struct FeedbackRepository {
    db: DbConn,
}

impl FeedbackRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// フィードバックと成功ログを同一トランザクションで保存
    ///
    /// どちらかの INSERT が失敗した場合は両方ともロールバックされる。
    pub async fn create_with_audit(
        &self,
        feedback: FeedbackActiveModel,
    ) -> Result<FeedbackModel, DbErr> {
        with_transaction!(self.db, |txn| async move {
            let record = feedback.insert(txn).await?;
            SubmissionLogBuilder::success(record.id)
                .build()
                .insert(txn)
                .await?;
            Ok::<_, DbErr>(record)
        })
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<FeedbackModel>, DbErr> {
        FeedbackEntity::find_by_id(id).one(&self.db).await
    }

    /// 新しい順に全件取得（同時刻は ID の降順）
    pub async fn find_all_newest_first(&self) -> Result<Vec<FeedbackModel>, DbErr> {
        FeedbackEntity::find()
            .order_by_desc(feedback_model::Column::CreatedAt)
            .order_by_desc(feedback_model::Column::Id)
            .all(&self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        FeedbackEntity::find().count(&self.db).await
    }

    pub async fn rating_averages(&self) -> Result<RatingAverages, DbErr> {
        let row = self
            .db
            .query_one(Statement::from_string(
                self.db.get_database_backend(),
                RATING_AVERAGES_SQL.to_string(),
            ))
            .await?;

        let Some(row) = row else {
            return Ok(RatingAverages::default());
        };

        Ok(RatingAverages {
            content_quality: row.try_get("", "content_quality")?,
            clarity: row.try_get("", "clarity")?,
            engagement: row.try_get("", "engagement")?,
            satisfaction: row.try_get("", "satisfaction")?,
            apply_likelihood: row.try_get("", "apply_likelihood")?,
        })
    }

    /// 推薦の回答値ごとの件数
    pub async fn count_by_recommend(&self) -> Result<Vec<(String, i64)>, DbErr> {
        FeedbackEntity::find()
            .select_only()
            .column(feedback_model::Column::Recommend)
            .column_as(Expr::col(feedback_model::Column::Id).count(), "count")
            .group_by(feedback_model::Column::Recommend)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
    }
}
