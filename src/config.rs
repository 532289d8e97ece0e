use std::env;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    /// Upper bound on `quiz_extensions` entries accepted in one request.
    pub max_extensions_per_request: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quiz-extensions-local".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            max_extensions_per_request: env::var("MAX_EXTENSIONS_PER_REQUEST")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(100),
        }
    }

    /// Rejects configurations that still carry development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-extensions-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            max_extensions_per_request: 10,
        }
    }
}
