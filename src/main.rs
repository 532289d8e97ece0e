use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quiz_extensions_server::{
    app_state::AppState, auth::JwtService, config::Config, db::Database, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if let Err(err) = config.validate_for_production() {
        log::warn!("{}", err);
    }

    let db = Database::connect(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let state = AppState::new(config.clone(), &db)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let jwt_service = web::Data::new(JwtService::new(&config.jwt_secret));

    log::info!(
        "Starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(db.clone()))
            .app_data(jwt_service.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
