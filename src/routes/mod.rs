use crate::config::AppConfig;
use actix_cors::Cors;
use actix_web::{
    http::{header, Method},
    web, HttpResponse,
};

pub mod health;
pub mod plan;
pub mod recommend;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(|| async { "OK" }))
        .service(
            web::scope("/recommend")
                .route("", web::get().to(recommend::form_page))
                .route("", web::post().to(recommend::submit)),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                .route("/generate-plan", web::post().to(plan::generate_plan))
                .route(
                    "/generate-plan",
                    web::method(Method::OPTIONS)
                        .to(|| async { HttpResponse::NoContent().finish() }),
                ),
        );
}

/// CORS for the API. Any origin unless `FRONTEND_ORIGIN` pins one.
pub fn cors(config: &AppConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600);

    match &config.frontend_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}
