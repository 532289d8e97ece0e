use std::sync::Arc;

use crate::{
    auth::CourseRolePolicy,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoEnrollmentRepository, MongoQuizRepository, MongoQuizSubmissionRepository,
    },
    services::QuizExtensionService,
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_extension_service: Arc<QuizExtensionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config, db: &Database) -> AppResult<Self> {
        let quiz_repository = Arc::new(MongoQuizRepository::new(db));
        quiz_repository.ensure_indexes().await?;

        let enrollment_repository = Arc::new(MongoEnrollmentRepository::new(db));
        enrollment_repository.ensure_indexes().await?;

        let submission_repository = Arc::new(MongoQuizSubmissionRepository::new(db));
        submission_repository.ensure_indexes().await?;

        let quiz_extension_service = Arc::new(QuizExtensionService::new(
            quiz_repository,
            enrollment_repository,
            submission_repository,
            Arc::new(CourseRolePolicy),
        ));

        Ok(Self::from_parts(quiz_extension_service, config))
    }

    pub fn from_parts(quiz_extension_service: Arc<QuizExtensionService>, config: Config) -> Self {
        Self {
            quiz_extension_service,
            config: Arc::new(config),
        }
    }
}
