use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    pub workflow_state: QuizWorkflowState,
    pub allowed_attempts: i32, // -1 means unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizWorkflowState {
    Draft,
    Available,
    Closed,
}

impl Quiz {
    pub fn new(course_id: &str, title: &str) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            workflow_state: QuizWorkflowState::Draft,
            allowed_attempts: 1,
            published_at: None,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn publish(mut self) -> Self {
        self.workflow_state = QuizWorkflowState::Available;
        self.published_at = Some(Utc::now());
        self.modified_at = Some(Utc::now());
        self
    }

    pub fn belongs_to_course(&self, course_id: &str) -> bool {
        self.course_id == course_id
    }
}
