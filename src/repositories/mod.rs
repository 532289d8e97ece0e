pub mod enrollment_repository;
pub mod quiz_repository;
pub mod quiz_submission_repository;

pub use enrollment_repository::{EnrollmentRepository, MongoEnrollmentRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use quiz_submission_repository::{MongoQuizSubmissionRepository, QuizSubmissionRepository};

#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use quiz_repository::MockQuizRepository;
#[cfg(test)]
pub use quiz_submission_repository::MockQuizSubmissionRepository;
