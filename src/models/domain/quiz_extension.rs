use std::fmt;

use crate::models::domain::QuizSubmission;

/// One entry of a batch, already validated at the HTTP boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionRequest {
    pub user_id: String,
    pub extra_attempts: u32,
    pub extra_time: Option<u32>,
    pub manually_unlocked: Option<bool>,
}

impl ExtensionRequest {
    pub fn attempts(user_id: &str, extra_attempts: u32) -> Self {
        ExtensionRequest {
            user_id: user_id.to_string(),
            extra_attempts,
            extra_time: None,
            manually_unlocked: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    Unauthorized,
}

impl RejectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RejectionReason::Unauthorized => "unauthorized",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtensionOutcome {
    /// Carries the submission as stored right after this item was applied.
    Applied(QuizSubmission),
    Rejected(RejectionReason),
}

/// Outcome of a single [`ExtensionRequest`], index-aligned with the batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionResult {
    pub user_id: String,
    pub outcome: ExtensionOutcome,
}

impl ExtensionResult {
    pub fn applied(submission: QuizSubmission) -> Self {
        ExtensionResult {
            user_id: submission.user_id.clone(),
            outcome: ExtensionOutcome::Applied(submission),
        }
    }

    pub fn rejected(user_id: &str, reason: RejectionReason) -> Self {
        ExtensionResult {
            user_id: user_id.to_string(),
            outcome: ExtensionOutcome::Rejected(reason),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.outcome, ExtensionOutcome::Applied(_))
    }

    pub fn extra_attempts(&self) -> Option<u32> {
        match &self.outcome {
            ExtensionOutcome::Applied(submission) => Some(submission.extra_attempts),
            ExtensionOutcome::Rejected(_) => None,
        }
    }
}
