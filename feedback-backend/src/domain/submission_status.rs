// feedback-backend/src/domain/submission_status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 送信試行の結果を表すenum（submissions_log.status）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Success,
    EmailFailed,
    DatabaseError,
}

impl SubmissionStatus {
    /// SubmissionStatusを文字列として取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::EmailFailed => "email_failed",
            Self::DatabaseError => "database_error",
        }
    }

    /// すべての有効なステータスを取得
    pub fn all() -> Vec<Self> {
        vec![Self::Success, Self::EmailFailed, Self::DatabaseError]
    }

    /// 失敗を表すステータスかチェック（error_message を伴う）
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid submission status: '{}'. Valid statuses are: {}",
                    s,
                    Self::all()
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

// データベースとの変換用
impl From<SubmissionStatus> for String {
    fn from(status: SubmissionStatus) -> Self {
        status.as_str().to_string()
    }
}
