use serde::Serialize;

use crate::models::domain::{ExtensionOutcome, ExtensionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionStatus {
    Applied,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizExtensionDto {
    pub quiz_id: String,
    pub user_id: String,
    pub status: ExtensionStatus,
    pub extra_attempts: Option<u32>,
    pub extra_time: Option<u32>,
    pub manually_unlocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl QuizExtensionDto {
    fn from_result(quiz_id: &str, result: ExtensionResult) -> Self {
        match result.outcome {
            ExtensionOutcome::Applied(submission) => QuizExtensionDto {
                quiz_id: quiz_id.to_string(),
                user_id: result.user_id,
                status: ExtensionStatus::Applied,
                extra_attempts: Some(submission.extra_attempts),
                extra_time: Some(submission.extra_time),
                manually_unlocked: Some(submission.manually_unlocked),
                reason: None,
            },
            ExtensionOutcome::Rejected(reason) => QuizExtensionDto {
                quiz_id: quiz_id.to_string(),
                user_id: result.user_id,
                status: ExtensionStatus::Rejected,
                extra_attempts: None,
                extra_time: None,
                manually_unlocked: None,
                reason: Some(reason.to_string()),
            },
        }
    }
}

/// Rendered batch outcome. Entry `i` always describes request `i`.
#[derive(Debug, Clone, Serialize)]
pub struct QuizExtensionsResponse {
    pub quiz_extensions: Vec<QuizExtensionDto>,
}

impl QuizExtensionsResponse {
    pub fn from_results(quiz_id: &str, results: Vec<ExtensionResult>) -> Self {
        QuizExtensionsResponse {
            quiz_extensions: results
                .into_iter()
                .map(|result| QuizExtensionDto::from_result(quiz_id, result))
                .collect(),
        }
    }

    pub fn applied_count(&self) -> usize {
        self.quiz_extensions
            .iter()
            .filter(|e| e.status == ExtensionStatus::Applied)
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.quiz_extensions.len() - self.applied_count()
    }
}
