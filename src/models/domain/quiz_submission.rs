use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::quiz_extension::ExtensionRequest;

/// Per-student record for a quiz. Exactly one exists per `(quiz_id, user_id)`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSubmission {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub extra_attempts: u32,
    pub extra_time: u32, // minutes
    pub manually_unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl QuizSubmission {
    pub fn new(quiz_id: &str, user_id: &str) -> Self {
        QuizSubmission {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz_id.to_string(),
            user_id: user_id.to_string(),
            extra_attempts: 0,
            extra_time: 0,
            manually_unlocked: false,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Assigns the requested extension. `extra_attempts` is always replaced;
    /// the optional fields only when present.
    pub fn apply_extension(&mut self, request: &ExtensionRequest) {
        self.extra_attempts = request.extra_attempts;

        if let Some(extra_time) = request.extra_time {
            self.extra_time = extra_time;
        }
        if let Some(manually_unlocked) = request.manually_unlocked {
            self.manually_unlocked = manually_unlocked;
        }

        self.modified_at = Some(Utc::now());
    }
}
