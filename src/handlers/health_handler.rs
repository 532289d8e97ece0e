use actix_web::{get, web, HttpResponse};

use crate::db::Database;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(db: Option<web::Data<Database>>) -> HttpResponse {
    let db_health = match db {
        Some(db) => db.health_check().await.is_ok(),
        None => false,
    };

    let response = serde_json::json!({
        "status": if db_health { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health { "ok" } else { "error" }
        }
    });

    if db_health {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
