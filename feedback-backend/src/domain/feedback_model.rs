// src/domain/feedback_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 保存済みフィードバック。作成後は更新・削除されない
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub content_quality: i32,
    pub clarity: i32,
    pub engagement: i32,
    pub satisfaction: i32,
    pub apply_likelihood: i32,
    #[sea_orm(column_type = "Text")]
    pub most_valuable: String,
    #[sea_orm(column_type = "Text")]
    pub improvements: String,
    #[sea_orm(column_type = "Text")]
    pub recommend: String,
    pub created_at: DateTime<Utc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub ip_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::submission_log_model::Entity")]
    SubmissionLogs,
}

impl Related<super::submission_log_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubmissionLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 5 項目の評価値を表示順で返す
    pub fn ratings(&self) -> [(&'static str, i32); 5] {
        [
            ("Content Quality", self.content_quality),
            ("Clarity", self.clarity),
            ("Engagement", self.engagement),
            ("Overall Satisfaction", self.satisfaction),
            ("Likelihood to Apply", self.apply_likelihood),
        ]
    }
}
