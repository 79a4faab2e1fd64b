// feedback-backend/src/api/handlers/mod.rs
pub mod feedback_handler;
pub mod page_handler;
pub mod stats_handler;
pub mod system_handler;
