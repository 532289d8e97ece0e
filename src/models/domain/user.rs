use serde::{Deserialize, Serialize};

/// Platform-wide role carried in the access token. Course-level roles live on
/// [`Enrollment`](super::Enrollment).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}
