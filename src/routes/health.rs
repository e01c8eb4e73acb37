use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    model: String,
    ready: bool,
    environment: String,
    version: String,
}

/*
    /api/health
*/
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let health = HealthStatus {
        status: "ok".to_string(),
        model: state.model.clone(),
        ready: state.is_ready(),
        environment: state.environment.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    HttpResponse::Ok().json(health)
}
