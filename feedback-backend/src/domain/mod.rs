// src/domain/mod.rs
pub mod feedback_form;
pub mod feedback_model;
pub mod submission_log_model;
pub mod submission_status;
