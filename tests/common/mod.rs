#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use tokio::sync::RwLock;

use quiz_extensions_server::{
    auth::{Claims, CourseRolePolicy},
    errors::AppResult,
    models::domain::{CourseRole, Enrollment, Quiz, QuizSubmission, UserRole},
    repositories::{EnrollmentRepository, QuizRepository, QuizSubmissionRepository},
    services::QuizExtensionService,
};

pub const COURSE: &str = "course-1";
pub const QUIZ: &str = "quiz-1";
pub const JWT_SECRET: &str = "integration_test_secret";

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub async fn insert(&self, quiz: Quiz) {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: Arc<RwLock<HashMap<(String, String), Enrollment>>>,
}

impl InMemoryEnrollmentRepository {
    pub async fn insert(&self, enrollment: Enrollment) {
        self.enrollments.write().await.insert(
            (enrollment.course_id.clone(), enrollment.user_id.clone()),
            enrollment,
        );
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn find_by_course_and_user(
        &self,
        course_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .get(&(course_id.to_string(), user_id.to_string()))
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryQuizSubmissionRepository {
    submissions: Arc<RwLock<HashMap<(String, String), QuizSubmission>>>,
}

impl InMemoryQuizSubmissionRepository {
    pub async fn get(&self, quiz_id: &str, user_id: &str) -> Option<QuizSubmission> {
        let submissions = self.submissions.read().await;
        submissions
            .get(&(quiz_id.to_string(), user_id.to_string()))
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl QuizSubmissionRepository for InMemoryQuizSubmissionRepository {
    async fn find_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Option<QuizSubmission>> {
        Ok(self.get(quiz_id, user_id).await)
    }

    async fn upsert(&self, submission: QuizSubmission) -> AppResult<QuizSubmission> {
        // Yield so concurrent batches interleave between read and write.
        tokio::task::yield_now().await;

        let mut submissions = self.submissions.write().await;
        submissions.insert(
            (submission.quiz_id.clone(), submission.user_id.clone()),
            submission.clone(),
        );
        Ok(submission)
    }
}

/// A published quiz in [`COURSE`] with teacher `t1`, students `s1`/`s2`
/// and no submissions yet.
pub struct Fixture {
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub enrollments: Arc<InMemoryEnrollmentRepository>,
    pub submissions: Arc<InMemoryQuizSubmissionRepository>,
    pub service: Arc<QuizExtensionService>,
}

impl Fixture {
    pub async fn new() -> Self {
        let quizzes = Arc::new(InMemoryQuizRepository::default());
        let enrollments = Arc::new(InMemoryEnrollmentRepository::default());
        let submissions = Arc::new(InMemoryQuizSubmissionRepository::default());

        let mut quiz = Quiz::new(COURSE, "quiz").publish();
        quiz.id = QUIZ.to_string();
        quizzes.insert(quiz).await;

        enrollments
            .insert(Enrollment::new(COURSE, "t1", CourseRole::Teacher))
            .await;
        enrollments
            .insert(Enrollment::new(COURSE, "s1", CourseRole::Student))
            .await;
        enrollments
            .insert(Enrollment::new(COURSE, "s2", CourseRole::Student))
            .await;

        let service = Arc::new(QuizExtensionService::new(
            quizzes.clone(),
            enrollments.clone(),
            submissions.clone(),
            Arc::new(CourseRolePolicy),
        ));

        Self {
            quizzes,
            enrollments,
            submissions,
            service,
        }
    }
}

pub fn claims(user_id: &str) -> Claims {
    Claims::new(user_id, UserRole::User, 1)
}

pub fn bearer_token(user_id: &str) -> String {
    let token = encode(
        &Header::default(),
        &claims(user_id),
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("test token should encode");
    format!("Bearer {}", token)
}
