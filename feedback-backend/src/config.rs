// feedback-backend/src/config.rs
pub mod app;
pub mod mail;

pub use app::{AppConfig, ConfigError};
pub use mail::MailConfig;
