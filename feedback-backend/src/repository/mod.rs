// src/repository/mod.rs
pub mod feedback_repository;
pub mod submission_log_repository;
