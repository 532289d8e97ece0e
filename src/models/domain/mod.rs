pub mod enrollment;
pub mod quiz;
pub mod quiz_extension;
pub mod quiz_submission;
pub mod user;
pub use enrollment::{CourseRole, Enrollment, EnrollmentState};
pub use quiz::{Quiz, QuizWorkflowState};
pub use quiz_extension::{ExtensionOutcome, ExtensionRequest, ExtensionResult, RejectionReason};
pub use quiz_submission::QuizSubmission;
pub use user::UserRole;
