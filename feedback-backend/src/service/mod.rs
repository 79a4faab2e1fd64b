// feedback-backend/src/service/mod.rs
pub mod feedback_service;
pub mod stats_service;
