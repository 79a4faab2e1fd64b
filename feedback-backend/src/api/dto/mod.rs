// feedback-backend/src/api/dto/mod.rs
pub mod feedback_dto;
pub mod stats_dto;
