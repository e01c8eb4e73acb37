#![allow(dead_code)]

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use trip_planner::config::AppConfig;
use trip_planner::models::trip::TripRequest;
use trip_planner::services::plan_client::PlanClient;
use trip_planner::services::plan_generation_service::{PlanGenerationError, PlanGenerator};
use trip_planner::state::AppState;

/// Generator that answers every trip with a fixed text, or fails.
pub struct StubGenerator {
    pub reply: Option<String>,
    pub calls: AtomicUsize,
}

impl StubGenerator {
    pub fn answering(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PlanGenerator for StubGenerator {
    fn model(&self) -> &str {
        "stub-model"
    }

    async fn generate(&self, _request: &TripRequest) -> Result<String, PlanGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| PlanGenerationError::ResponseError("stub failure".to_string()))
    }
}

pub fn test_config(plan_api_url: &str) -> AppConfig {
    AppConfig {
        plan_api_url: plan_api_url.to_string(),
        plan_api_timeout: Duration::from_secs(5),
        environment: "test".to_string(),
        ..AppConfig::default()
    }
}

pub fn test_state(generator: Option<Arc<dyn PlanGenerator>>, plan_api_url: &str) -> AppState {
    let config = test_config(plan_api_url);
    let plan_client = PlanClient::from_config(&config).expect("valid plan API url");
    AppState::new(generator, plan_client, &config)
}

/// A stand-in plan API: every `POST /api/generate-plan` gets the same status
/// and body, and is counted.
#[derive(Clone)]
pub struct StubPlanApi {
    pub status: u16,
    pub body: Option<Value>,
    pub hits: Arc<AtomicUsize>,
}

impl StubPlanApi {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self {
            status,
            body,
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn stub_generate_plan(stub: web::Data<StubPlanApi>) -> HttpResponse {
    stub.hits.fetch_add(1, Ordering::SeqCst);
    let status = StatusCode::from_u16(stub.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match &stub.body {
        Some(body) => HttpResponse::build(status).json(body),
        None => HttpResponse::build(status).body("upstream exploded"),
    }
}

pub struct RunningServer {
    pub addr: SocketAddr,
    handle: ServerHandle,
}

impl RunningServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

pub fn spawn_stub_plan_api(stub: StubPlanApi) -> RunningServer {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(stub.clone()))
            .route("/api/generate-plan", web::post().to(stub_generate_plan))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind stub plan API");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    RunningServer { addr, handle }
}

/// Port nothing listens on.
pub fn unused_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe socket");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}
