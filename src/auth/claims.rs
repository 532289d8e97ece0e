use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::UserRole;

/// Access-token payload. Tokens are minted by the identity service; this
/// crate only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user id)
    #[serde(default)]
    pub role: UserRole,
    pub exp: usize, // Expiration time (as UTC timestamp)
    pub iat: usize, // Issued at (as UTC timestamp)
}

impl Claims {
    pub fn new(user_id: &str, role: UserRole, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn is_platform_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
