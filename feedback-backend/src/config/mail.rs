use super::app::{parse_flag, ConfigError};

/// メール通知の設定
///
/// ユーザー名とパスワードの両方が揃っている場合のみ通知を行う。
#[derive(Clone, Debug)]
pub struct MailConfig {
    /// SMTP サーバーホスト
    pub server: Option<String>,
    /// SMTP サーバーポート
    pub port: u16,
    /// STARTTLS を使用するか
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    /// 送信者アドレス（未設定ならユーザー名）
    pub default_sender: Option<String>,
    /// 通知先アドレス（未設定ならユーザー名）
    pub recipient: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: None,
            port: 587,
            use_tls: true,
            username: None,
            password: None,
            default_sender: None,
            recipient: None,
        }
    }
}

impl MailConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match lookup("MAIL_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "MAIL_PORT",
                value,
            })?,
            None => 587,
        };

        Ok(Self {
            server: non_empty("MAIL_SERVER"),
            port,
            use_tls: lookup("MAIL_USE_TLS").map_or(true, |value| parse_flag(&value)),
            username: non_empty("MAIL_USERNAME"),
            password: non_empty("MAIL_PASSWORD"),
            default_sender: non_empty("MAIL_DEFAULT_SENDER"),
            recipient: non_empty("MAIL_RECIPIENT"),
        })
    }

    /// 通知に必要な認証情報が揃っているか
    pub fn is_configured(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    pub fn sender(&self) -> Option<&str> {
        self.default_sender.as_deref().or(self.username.as_deref())
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref().or(self.username.as_deref())
    }
}
