pub mod quiz_extension_service;
pub mod submission_locks;

pub use quiz_extension_service::QuizExtensionService;
pub use submission_locks::SubmissionLocks;
