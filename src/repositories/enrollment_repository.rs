use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Enrollment};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_course_and_user(
        &self,
        course_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Enrollment>>;
}

pub struct MongoEnrollmentRepository {
    collection: Collection<Enrollment>,
}

impl MongoEnrollmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("enrollments");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for enrollments collection");

        let course_user_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("course_user_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(course_user_index).await?;

        log::info!("Successfully created indexes for enrollments collection");
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for MongoEnrollmentRepository {
    async fn find_by_course_and_user(
        &self,
        course_id: &str,
        user_id: &str,
    ) -> AppResult<Option<Enrollment>> {
        let enrollment = self
            .collection
            .find_one(doc! {
                "course_id": course_id,
                "user_id": user_id
            })
            .await?;
        Ok(enrollment)
    }
}
