pub mod health_handler;
pub mod quiz_extension_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use health_handler::{health_check, health_check_live, health_check_ready};
pub use quiz_extension_handler::create_quiz_extensions;

/// Renders body deserialization failures with the same JSON shape as
/// every other [`AppError`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health_check)
        .service(health_check_ready)
        .service(health_check_live)
        .service(
            web::scope("/api/v1")
                .wrap(AuthMiddleware)
                .service(create_quiz_extensions),
        );
}
