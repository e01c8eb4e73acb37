use crate::models::trip::{ErrorResponse, GeneratePlanResponse, TripSubmission};
use crate::services::plan_generation_service::precheck;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use serde_json::Value;

/*
    /api/generate-plan
*/
pub async fn generate_plan(
    state: web::Data<AppState>,
    input: Option<web::Json<TripSubmission>>,
) -> impl Responder {
    let Some(generator) = state.generator.as_ref() else {
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Gemini model not initialized"));
    };

    let submission = input.map(web::Json::into_inner).unwrap_or_default();
    let Some(request) = submission.into_request() else {
        return HttpResponse::BadRequest().json(ErrorResponse::new("Missing required fields"));
    };

    if let Some(sentinel) = precheck(&request) {
        log::info!("Answering {} locally: {}", request.destination, sentinel);
        return HttpResponse::Ok().json(GeneratePlanResponse {
            plan: Value::String(sentinel.to_string()),
        });
    }

    match generator.generate(&request).await {
        Ok(text) => HttpResponse::Ok().json(GeneratePlanResponse {
            plan: Value::String(text),
        }),
        Err(err) => {
            log::error!("Gemini API error: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to generate plan"))
        }
    }
}
