mod common;

use actix_web::{test, web, App};
use serde_json::json;
use std::time::Duration;

use common::{spawn_stub_plan_api, test_state, unused_base_url, StubPlanApi};
use trip_planner::routes;
use trip_planner::services::plan_client::PlanClient;
use trip_planner::services::plan_renderer::{DayCard, RenderedPlan};
use trip_planner::services::submission::{PlanForm, PlanSubmission, SubmissionState};

fn goa_form() -> PlanForm {
    PlanForm {
        destination: "Goa".to_string(),
        departure_date: "2025-01-10".to_string(),
        return_date: "2025-01-12".to_string(),
        travelers: "2".to_string(),
        preferences: String::new(),
    }
}

fn client_for(base_url: &str) -> PlanClient {
    PlanClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[actix_web::test]
async fn test_empty_destination_sends_no_request() {
    let stub = StubPlanApi::new(200, Some(json!({"plan": ["Beach"]})));
    let server = spawn_stub_plan_api(stub.clone());
    let client = client_for(&server.base_url());

    let form = PlanForm {
        destination: String::new(),
        ..goa_form()
    };
    let mut submission = PlanSubmission::new(&client);
    let state = submission.submit(&form).await.clone();

    assert_eq!(
        state.output(),
        Some(RenderedPlan::error("Please fill all required fields."))
    );
    assert_eq!(stub.hits(), 0);
    server.stop().await;
}

#[actix_web::test]
async fn test_sentinel_plan_renders_error_box() {
    let stub = StubPlanApi::new(
        200,
        Some(json!({"plan": "Sorry, I don't have information on that destination."})),
    );
    let server = spawn_stub_plan_api(stub.clone());
    let client = client_for(&server.base_url());

    let mut submission = PlanSubmission::new(&client);
    let output = submission.submit(&goa_form()).await.output().unwrap();

    assert_eq!(
        output.to_html(),
        "<div class=\"msg error\">Sorry, I don&#39;t have information on that destination.</div>"
    );
    assert_eq!(stub.hits(), 1);
    server.stop().await;
}

#[actix_web::test]
async fn test_structured_plan_renders_day_cards() {
    let stub = StubPlanApi::new(
        200,
        Some(json!({"plan": {
            "day1": {"activities": ["Museum", "Lunch"]},
            "day2": ["Beach"]
        }})),
    );
    let server = spawn_stub_plan_api(stub.clone());
    let client = client_for(&server.base_url());

    let mut submission = PlanSubmission::new(&client);
    let state = submission.submit(&goa_form()).await.clone();

    assert_eq!(
        state,
        SubmissionState::Rendered(RenderedPlan::Itinerary {
            title: "Your Itinerary".to_string(),
            days: vec![
                DayCard {
                    key: "day1".to_string(),
                    heading: "Day 1".to_string(),
                    activities: vec!["Museum".to_string(), "Lunch".to_string()],
                },
                DayCard {
                    key: "day2".to_string(),
                    heading: "Day 2".to_string(),
                    activities: vec!["Beach".to_string()],
                },
            ],
        })
    );
    server.stop().await;
}

#[actix_web::test]
async fn test_error_body_message_is_shown() {
    let stub = StubPlanApi::new(400, Some(json!({"error": "Missing required fields"})));
    let server = spawn_stub_plan_api(stub.clone());
    let client = client_for(&server.base_url());

    let mut submission = PlanSubmission::new(&client);
    let state = submission.submit(&goa_form()).await.clone();

    assert_eq!(
        state,
        SubmissionState::Errored("Error: Missing required fields".to_string())
    );
    server.stop().await;
}

#[actix_web::test]
async fn test_error_without_body_uses_generic_message() {
    let stub = StubPlanApi::new(502, None);
    let server = spawn_stub_plan_api(stub.clone());
    let client = client_for(&server.base_url());

    let mut submission = PlanSubmission::new(&client);
    let state = submission.submit(&goa_form()).await.clone();

    assert_eq!(
        state,
        SubmissionState::Errored("Error: Failed to generate plan".to_string())
    );
    server.stop().await;
}

#[actix_web::test]
async fn test_unreachable_api_is_an_error() {
    let client = client_for(&unused_base_url());

    let mut submission = PlanSubmission::new(&client);
    let state = submission.submit(&goa_form()).await.clone();

    match state {
        SubmissionState::Errored(message) => assert!(message.starts_with("Error: ")),
        other => panic!("expected an error, got {:?}", other),
    }
}

#[actix_web::test]
async fn test_recommend_page_renders_plan_from_api() {
    let stub = StubPlanApi::new(
        200,
        Some(json!({"plan": "{\"day10\": \"Fly home\", \"day2\": \"Fort. Market\", \"day1\": [\"Arrive\"]}"})),
    );
    let server = spawn_stub_plan_api(stub.clone());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state(None, &server.base_url())))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_form(vec![
            ("destination", "Goa"),
            ("departureDate", "2025-01-10"),
            ("returnDate", "2025-01-19"),
            ("travelers", "2"),
            ("preferences", ""),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let page = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let day1 = page.find("<div class=\"day-heading\">Day 1</div>").unwrap();
    let day2 = page.find("<div class=\"day-heading\">Day 2</div>").unwrap();
    let day10 = page.find("<div class=\"day-heading\">Day 10</div>").unwrap();
    assert!(day1 < day2 && day2 < day10);
    assert!(page.contains("<li>Fort</li><li>Market</li>"));
    assert_eq!(stub.hits(), 1);
    server.stop().await;
}

#[actix_web::test]
async fn test_recommend_page_validates_before_calling_api() {
    let stub = StubPlanApi::new(200, Some(json!({"plan": ["Beach"]})));
    let server = spawn_stub_plan_api(stub.clone());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_state(None, &server.base_url())))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/recommend")
        .set_form(vec![("destination", ""), ("travelers", "2")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    let page = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(page.contains("<div class=\"msg error\">Please fill all required fields.</div>"));
    assert_eq!(stub.hits(), 0);
    server.stop().await;
}
