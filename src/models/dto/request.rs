use serde::{de, Deserialize, Deserializer};
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::ExtensionRequest;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuizExtensionsRequest {
    #[validate(nested)]
    pub quiz_extensions: Vec<QuizExtensionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizExtensionInput {
    // Ids arrive as either JSON strings or integers.
    #[serde(deserialize_with = "string_or_integer")]
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,

    #[validate(range(min = 0, message = "extra_attempts must not be negative"))]
    pub extra_attempts: i64,

    #[validate(range(min = 0, message = "extra_time must not be negative"))]
    pub extra_time: Option<i64>,

    pub manually_unlocked: Option<bool>,
}

impl CreateQuizExtensionsRequest {
    /// Validates the payload and converts it into the ordered batch the
    /// extension service consumes.
    pub fn into_batch(self, max_items: usize) -> AppResult<Vec<ExtensionRequest>> {
        self.validate()?;

        if self.quiz_extensions.len() > max_items {
            return Err(AppError::ValidationError(format!(
                "At most {} quiz_extensions may be submitted per request, got {}",
                max_items,
                self.quiz_extensions.len()
            )));
        }

        self.quiz_extensions
            .into_iter()
            .map(ExtensionRequest::try_from)
            .collect()
    }
}

impl TryFrom<QuizExtensionInput> for ExtensionRequest {
    type Error = AppError;

    fn try_from(input: QuizExtensionInput) -> AppResult<Self> {
        let extra_attempts = to_count("extra_attempts", input.extra_attempts)?;
        let extra_time = input
            .extra_time
            .map(|minutes| to_count("extra_time", minutes))
            .transpose()?;

        Ok(ExtensionRequest {
            user_id: input.user_id,
            extra_attempts,
            extra_time,
            manually_unlocked: input.manually_unlocked,
        })
    }
}

fn to_count(field: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| {
        AppError::ValidationError(format!("{} is out of range: {}", field, value))
    })
}

fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a string or integer id, got {}",
            other
        ))),
    }
}
