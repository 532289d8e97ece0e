use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::QuizSubmission};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizSubmissionRepository: Send + Sync {
    async fn find_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Option<QuizSubmission>>;

    /// Inserts or replaces the submission keyed by `(quiz_id, user_id)`.
    async fn upsert(&self, submission: QuizSubmission) -> AppResult<QuizSubmission>;
}

pub struct MongoQuizSubmissionRepository {
    collection: Collection<QuizSubmission>,
}

impl MongoQuizSubmissionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("quiz_submissions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz_submissions collection");

        let quiz_user_index = IndexModel::builder()
            .keys(doc! { "quiz_id": 1, "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("quiz_user_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(quiz_user_index).await?;

        log::info!("Successfully created indexes for quiz_submissions collection");
        Ok(())
    }
}

#[async_trait]
impl QuizSubmissionRepository for MongoQuizSubmissionRepository {
    async fn find_by_quiz_and_user(
        &self,
        quiz_id: &str,
        user_id: &str,
    ) -> AppResult<Option<QuizSubmission>> {
        let submission = self
            .collection
            .find_one(doc! {
                "quiz_id": quiz_id,
                "user_id": user_id
            })
            .await?;
        Ok(submission)
    }

    async fn upsert(&self, submission: QuizSubmission) -> AppResult<QuizSubmission> {
        let filter = doc! {
            "quiz_id": &submission.quiz_id,
            "user_id": &submission.user_id
        };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, &submission)
            .with_options(options)
            .await?;

        Ok(submission)
    }
}
