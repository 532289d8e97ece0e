use std::sync::Arc;

use crate::{
    auth::{Actor, Claims, PermissionOracle, TargetUser},
    errors::{AppError, AppResult},
    models::domain::{ExtensionRequest, ExtensionResult, Quiz, QuizSubmission, RejectionReason},
    repositories::{EnrollmentRepository, QuizRepository, QuizSubmissionRepository},
    services::submission_locks::SubmissionLocks,
};

/// Applies batches of attempt extensions to quiz submissions.
pub struct QuizExtensionService {
    quizzes: Arc<dyn QuizRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    submissions: Arc<dyn QuizSubmissionRepository>,
    oracle: Arc<dyn PermissionOracle>,
    locks: SubmissionLocks,
}

impl QuizExtensionService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        submissions: Arc<dyn QuizSubmissionRepository>,
        oracle: Arc<dyn PermissionOracle>,
    ) -> Self {
        Self {
            quizzes,
            enrollments,
            submissions,
            oracle,
            locks: SubmissionLocks::new(),
        }
    }

    /// Resolves the quiz and the caller's role, then applies each request in
    /// order. Returns one result per request.
    ///
    /// Fails as a whole with `NotFound` when the quiz is not in `course_id`
    /// and with `Forbidden` when the caller may not grant extensions there;
    /// in both cases nothing is written. Items whose target is not an
    /// active student of the course are rejected individually.
    pub async fn create_extensions(
        &self,
        claims: &Claims,
        course_id: &str,
        quiz_id: &str,
        requests: Vec<ExtensionRequest>,
    ) -> AppResult<Vec<ExtensionResult>> {
        let quiz = self.find_course_quiz(course_id, quiz_id).await?;

        let actor_enrollment = self
            .enrollments
            .find_by_course_and_user(course_id, &claims.sub)
            .await?;
        let actor = Actor::resolve(claims, course_id, actor_enrollment.as_ref());

        self.apply_batch(&actor, &quiz, requests).await
    }

    pub async fn apply_batch(
        &self,
        actor: &Actor,
        quiz: &Quiz,
        requests: Vec<ExtensionRequest>,
    ) -> AppResult<Vec<ExtensionResult>> {
        if actor.course_id != quiz.course_id {
            return Err(quiz_not_found(&actor.course_id, &quiz.id));
        }

        if !self.oracle.can_manage_extensions(actor, quiz) {
            log::warn!(
                "User '{}' may not grant extensions in course '{}'",
                actor.user_id,
                actor.course_id
            );
            return Err(AppError::Forbidden(
                "You are not allowed to grant quiz extensions in this course".to_string(),
            ));
        }

        log::info!(
            "Applying {} quiz extension(s) to quiz '{}' for user '{}'",
            requests.len(),
            quiz.id,
            actor.user_id
        );

        let mut results = Vec::with_capacity(requests.len());
        for request in &requests {
            results.push(self.apply_one(actor, quiz, request).await?);
        }

        Ok(results)
    }

    async fn apply_one(
        &self,
        actor: &Actor,
        quiz: &Quiz,
        request: &ExtensionRequest,
    ) -> AppResult<ExtensionResult> {
        let target = TargetUser {
            user_id: request.user_id.clone(),
            enrollment: self
                .enrollments
                .find_by_course_and_user(&quiz.course_id, &request.user_id)
                .await?,
        };

        if !self.oracle.can_grant_extension(actor, quiz, &target) {
            log::warn!(
                "Rejected extension for user '{}' on quiz '{}': not an active student",
                request.user_id,
                quiz.id
            );
            return Ok(ExtensionResult::rejected(
                &request.user_id,
                RejectionReason::Unauthorized,
            ));
        }

        let _guard = self.locks.acquire(&quiz.id, &request.user_id).await;

        let mut submission = self
            .submissions
            .find_by_quiz_and_user(&quiz.id, &request.user_id)
            .await?
            .unwrap_or_else(|| QuizSubmission::new(&quiz.id, &request.user_id));

        submission.apply_extension(request);
        let submission = self.submissions.upsert(submission).await?;

        Ok(ExtensionResult::applied(submission))
    }

    async fn find_course_quiz(&self, course_id: &str, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .filter(|quiz| quiz.belongs_to_course(course_id))
            .ok_or_else(|| quiz_not_found(course_id, quiz_id))
    }
}

fn quiz_not_found(course_id: &str, quiz_id: &str) -> AppError {
    AppError::NotFound(format!(
        "Quiz with id '{}' not found in course '{}'",
        quiz_id, course_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::CourseRolePolicy,
        models::domain::{CourseRole, Enrollment, UserRole},
        repositories::{MockEnrollmentRepository, MockQuizRepository, MockQuizSubmissionRepository},
    };

    const COURSE: &str = "course-1";
    const QUIZ: &str = "quiz-1";

    fn quiz() -> Quiz {
        let mut quiz = Quiz::new(COURSE, "Quiz").publish();
        quiz.id = QUIZ.to_string();
        quiz
    }

    fn quizzes_returning(quiz: Option<Quiz>) -> MockQuizRepository {
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_find_by_id()
            .returning(move |_| Ok(quiz.clone()));
        quizzes
    }

    /// Teacher `t1`, students `s1` and `s2`, student `s9` enrolled elsewhere.
    fn enrollments() -> MockEnrollmentRepository {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments
            .expect_find_by_course_and_user()
            .returning(|course_id, user_id| {
                let role = match user_id {
                    "t1" => CourseRole::Teacher,
                    "s1" | "s2" => CourseRole::Student,
                    _ => return Ok(None),
                };
                Ok(Some(Enrollment::new(course_id, user_id, role)))
            });
        enrollments
    }

    fn untouched_submissions() -> MockQuizSubmissionRepository {
        let mut submissions = MockQuizSubmissionRepository::new();
        submissions.expect_find_by_quiz_and_user().never();
        submissions.expect_upsert().never();
        submissions
    }

    fn service(
        quizzes: MockQuizRepository,
        enrollments: MockEnrollmentRepository,
        submissions: MockQuizSubmissionRepository,
    ) -> QuizExtensionService {
        QuizExtensionService::new(
            Arc::new(quizzes),
            Arc::new(enrollments),
            Arc::new(submissions),
            Arc::new(CourseRolePolicy),
        )
    }

    fn claims(user_id: &str) -> Claims {
        Claims::new(user_id, UserRole::User, 1)
    }

    #[tokio::test]
    async fn test_student_is_forbidden_and_nothing_is_written() {
        let service = service(
            quizzes_returning(Some(quiz())),
            enrollments(),
            untouched_submissions(),
        );

        let result = service
            .create_extensions(
                &claims("s1"),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 2)],
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_unenrolled_caller_is_forbidden_even_for_empty_batch() {
        let service = service(
            quizzes_returning(Some(quiz())),
            enrollments(),
            untouched_submissions(),
        );

        let result = service
            .create_extensions(&claims("stranger"), COURSE, QUIZ, vec![])
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_missing_quiz_is_not_found() {
        let mut enrollments = MockEnrollmentRepository::new();
        enrollments.expect_find_by_course_and_user().never();

        let service = service(quizzes_returning(None), enrollments, untouched_submissions());

        let result = service
            .create_extensions(
                &claims("t1"),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 2)],
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_quiz_from_other_course_is_not_found() {
        let service = service(
            quizzes_returning(Some(quiz())),
            enrollments(),
            untouched_submissions(),
        );

        let result = service
            .create_extensions(
                &claims("t1"),
                "course-2",
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 2)],
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_teacher_creates_submission_with_requested_attempts() {
        let mut submissions = MockQuizSubmissionRepository::new();
        submissions
            .expect_find_by_quiz_and_user()
            .times(1)
            .returning(|_, _| Ok(None));
        submissions
            .expect_upsert()
            .withf(|s: &QuizSubmission| {
                s.quiz_id == QUIZ && s.user_id == "s1" && s.extra_attempts == 2
            })
            .times(1)
            .returning(Ok);

        let service = service(quizzes_returning(Some(quiz())), enrollments(), submissions);

        let results = service
            .create_extensions(
                &claims("t1"),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 2)],
            )
            .await
            .expect("batch should apply");

        assert_eq!(results.len(), 1);
        assert!(results[0].is_applied());
        assert_eq!(results[0].extra_attempts(), Some(2));
    }

    #[tokio::test]
    async fn test_existing_submission_is_overwritten_not_accumulated() {
        let mut existing = QuizSubmission::new(QUIZ, "s1");
        existing.extra_attempts = 3;
        let existing_id = existing.id.clone();

        let mut submissions = MockQuizSubmissionRepository::new();
        submissions
            .expect_find_by_quiz_and_user()
            .returning(move |_, _| Ok(Some(existing.clone())));
        submissions
            .expect_upsert()
            .withf(move |s: &QuizSubmission| s.id == existing_id && s.extra_attempts == 2)
            .times(1)
            .returning(Ok);

        let service = service(quizzes_returning(Some(quiz())), enrollments(), submissions);

        let results = service
            .create_extensions(
                &claims("t1"),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 2)],
            )
            .await
            .expect("batch should apply");

        assert_eq!(results[0].extra_attempts(), Some(2));
    }

    #[tokio::test]
    async fn test_unenrolled_target_is_rejected_without_aborting_batch() {
        let mut submissions = MockQuizSubmissionRepository::new();
        submissions
            .expect_find_by_quiz_and_user()
            .times(2)
            .returning(|_, _| Ok(None));
        submissions.expect_upsert().times(2).returning(Ok);

        let service = service(quizzes_returning(Some(quiz())), enrollments(), submissions);

        let results = service
            .create_extensions(
                &claims("t1"),
                COURSE,
                QUIZ,
                vec![
                    ExtensionRequest::attempts("s1", 2),
                    ExtensionRequest::attempts("s9", 4),
                    ExtensionRequest::attempts("s2", 3),
                ],
            )
            .await
            .expect("batch should apply");

        let users: Vec<_> = results.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(users, vec!["s1", "s9", "s2"]);
        assert_eq!(results[0].extra_attempts(), Some(2));
        assert_eq!(
            results[1].outcome,
            crate::models::domain::ExtensionOutcome::Rejected(RejectionReason::Unauthorized)
        );
        assert_eq!(results[2].extra_attempts(), Some(3));
    }

    #[tokio::test]
    async fn test_teacher_cannot_extend_another_teacher() {
        let service = service(
            quizzes_returning(Some(quiz())),
            enrollments(),
            untouched_submissions(),
        );

        let results = service
            .create_extensions(
                &claims("t1"),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("t1", 1)],
            )
            .await
            .expect("batch should run");

        assert!(!results[0].is_applied());
    }

    #[tokio::test]
    async fn test_platform_admin_may_extend_without_enrollment() {
        let mut submissions = MockQuizSubmissionRepository::new();
        submissions
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(None));
        submissions.expect_upsert().times(1).returning(Ok);

        let service = service(quizzes_returning(Some(quiz())), enrollments(), submissions);

        let results = service
            .create_extensions(
                &Claims::new("root", UserRole::Admin, 1),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 1)],
            )
            .await
            .expect("admin batch should apply");

        assert!(results[0].is_applied());
    }

    #[tokio::test]
    async fn test_persistence_failure_surfaces_as_error() {
        let mut submissions = MockQuizSubmissionRepository::new();
        submissions
            .expect_find_by_quiz_and_user()
            .returning(|_, _| Ok(None));
        submissions
            .expect_upsert()
            .returning(|_| Err(AppError::DatabaseError("write failed".to_string())));

        let service = service(quizzes_returning(Some(quiz())), enrollments(), submissions);

        let result = service
            .create_extensions(
                &claims("t1"),
                COURSE,
                QUIZ,
                vec![ExtensionRequest::attempts("s1", 2)],
            )
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
