use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{request::CreateQuizExtensionsRequest, response::QuizExtensionsResponse},
};

#[post("/courses/{course_id}/quizzes/{quiz_id}/extensions")]
pub async fn create_quiz_extensions(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<CreateQuizExtensionsRequest>,
    auth: AuthenticatedUser,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let (course_id, quiz_id) = path.into_inner();
    let batch = request
        .into_inner()
        .into_batch(state.config.max_extensions_per_request)?;

    let results = state
        .quiz_extension_service
        .create_extensions(&auth.0, &course_id, &quiz_id, batch)
        .await?;

    let response = QuizExtensionsResponse::from_results(&quiz_id, results);
    log::info!(
        "[{}] quiz '{}' extensions: {} applied, {} rejected",
        get_request_id(&req).unwrap_or_default(),
        quiz_id,
        response.applied_count(),
        response.rejected_count()
    );

    Ok(HttpResponse::Ok().json(response))
}
