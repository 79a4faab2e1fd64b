// feedback-backend/src/utils/mod.rs
pub mod email;
pub mod error_helper;
pub mod html;
pub mod transaction;
pub mod validation;
