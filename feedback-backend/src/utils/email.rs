// feedback-backend/src/utils/email.rs

use crate::config::MailConfig;
use crate::domain::feedback_model::Model as FeedbackModel;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::info;

/// 通知本文に載せる自由記述の最大文字数
pub const EXCERPT_LENGTH: usize = 100;

/// メール送信エラー
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("SMTP configuration error: {0}")]
    Configuration(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Failed to send email: {0}")]
    Transport(String),
}

/// 新規フィードバックの通知先
///
/// 送信はベストエフォート。失敗は呼び出し側で監査ログに記録する。
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, record: &FeedbackModel) -> Result<(), NotificationError>;
}

/// 通知メールの件名と本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSummary {
    pub subject: String,
    pub body: String,
}

/// 通知メールを組み立てる
pub fn compose_summary(record: &FeedbackModel) -> FeedbackSummary {
    let ratings = record
        .ratings()
        .iter()
        .map(|(label, value)| format!("- {}: {}/5", label, value))
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        r#"New feedback submission received:

Submission ID: {id}
Timestamp: {timestamp}

Ratings:
{ratings}

Most Valuable: {most_valuable}

Improvements Suggested: {improvements}

Would Recommend: {recommend}
"#,
        id = record.id,
        timestamp = record.created_at.format("%Y-%m-%d %H:%M:%S"),
        ratings = ratings,
        most_valuable = excerpt(&record.most_valuable, EXCERPT_LENGTH),
        improvements = excerpt(&record.improvements, EXCERPT_LENGTH),
        recommend = record.recommend,
    );

    FeedbackSummary {
        subject: format!("New Feedback Received - ID: {}", record.id),
        body,
    }
}

/// 先頭 `max_chars` 文字に "..." を続ける。短い本文にも必ず付く
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let end = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(byte_index, _)| byte_index);
    format!("{}...", &text[..end])
}

/// SMTP でオペレーターへ通知するNotifier
pub struct SmtpNotifier {
    config: MailConfig,
}

impl SmtpNotifier {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// 認証情報が揃っている場合のみ Notifier を返す
    pub fn from_config(config: &MailConfig) -> Option<Self> {
        config.is_configured().then(|| Self::new(config.clone()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let host = self
            .config
            .server
            .as_deref()
            .ok_or_else(|| NotificationError::Configuration("MAIL_SERVER is not set".to_string()))?;

        let (username, password) = match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) => (username.clone(), password.clone()),
            _ => {
                return Err(NotificationError::Configuration(
                    "SMTP credentials are not set".to_string(),
                ))
            }
        };

        let builder = if self.config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| NotificationError::Configuration(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };

        Ok(builder
            .port(self.config.port)
            .credentials(Credentials::new(username, password))
            .build())
    }

    fn message(&self, summary: FeedbackSummary) -> Result<Message, NotificationError> {
        let sender = parse_mailbox(self.config.sender())?;
        let recipient = parse_mailbox(self.config.recipient())?;

        Message::builder()
            .from(sender)
            .to(recipient)
            .subject(summary.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(summary.body)
            .map_err(|e| NotificationError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, record: &FeedbackModel) -> Result<(), NotificationError> {
        let message = self.message(compose_summary(record))?;
        let transport = self.transport()?;

        transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        info!(
            feedback_id = record.id,
            recipient = %mask_email(self.config.recipient().unwrap_or_default()),
            "Notification email sent"
        );

        Ok(())
    }
}

fn parse_mailbox(address: Option<&str>) -> Result<Mailbox, NotificationError> {
    let address = address
        .ok_or_else(|| NotificationError::Configuration("No mail address configured".to_string()))?;
    address
        .parse()
        .map_err(|_| NotificationError::InvalidAddress(mask_email(address)))
}

/// メールアドレスをマスク
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let masked_local = match local.chars().next() {
            Some(first) if local.chars().count() > 2 => format!("{}****", first),
            _ => "*".repeat(local.chars().count()),
        };
        format!("{}{}", masked_local, domain)
    } else {
        "****@****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> FeedbackModel {
        FeedbackModel {
            id: 42,
            content_quality: 5,
            clarity: 4,
            engagement: 3,
            satisfaction: 5,
            apply_likelihood: 2,
            most_valuable: "great".to_string(),
            improvements: "x".repeat(150),
            recommend: "yes".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 8, 1, 9, 30, 0).unwrap(),
            ip_address: None,
            user_agent: None,
        }
    }

    #[test]
    fn test_compose_summary() {
        let summary = compose_summary(&record());

        assert_eq!(summary.subject, "New Feedback Received - ID: 42");
        assert!(summary.body.contains("Submission ID: 42"));
        assert!(summary.body.contains("Timestamp: 2025-08-01 09:30:00"));
        assert!(summary.body.contains("- Content Quality: 5/5"));
        assert!(summary.body.contains("- Likelihood to Apply: 2/5"));
        assert!(summary.body.contains("Most Valuable: great...\n"));
        assert!(summary
            .body
            .contains(&format!("Improvements Suggested: {}...", "x".repeat(100))));
        assert!(summary.body.contains("Would Recommend: yes"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 100), "short...");
        assert_eq!(excerpt(&"a".repeat(100), 100), format!("{}...", "a".repeat(100)));
        assert_eq!(excerpt(&"a".repeat(101), 100), format!("{}...", "a".repeat(100)));
        // マルチバイト文字は文字単位で数える
        assert_eq!(excerpt("あいうえお", 3), "あいう...");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("test@example.com"), "t****@example.com");
        assert_eq!(mask_email("ab@example.com"), "**@example.com");
        assert_eq!(mask_email("a@example.com"), "*@example.com");
        assert_eq!(mask_email("invalid"), "****@****");
    }

    #[test]
    fn test_notifier_requires_credentials() {
        assert!(SmtpNotifier::from_config(&MailConfig::default()).is_none());

        let config = MailConfig {
            username: Some("ops@example.com".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(SmtpNotifier::from_config(&config).is_some());
    }

    #[tokio::test]
    async fn test_send_without_server_is_configuration_error() {
        let notifier = SmtpNotifier::new(MailConfig {
            username: Some("ops@example.com".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        });

        let err = notifier.send(&record()).await.unwrap_err();
        assert!(matches!(err, NotificationError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_send_with_invalid_sender_is_rejected() {
        let notifier = SmtpNotifier::new(MailConfig {
            server: Some("localhost".to_string()),
            username: Some("not-an-address".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        });

        let err = notifier.send(&record()).await.unwrap_err();
        assert!(matches!(err, NotificationError::InvalidAddress(_)));
    }
}
