// feedback-backend/src/extractors/mod.rs
pub mod feedback_submission;
pub mod request_metadata;

pub use feedback_submission::FeedbackSubmission;
pub use request_metadata::ClientMetadata;
