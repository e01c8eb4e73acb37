use crate::config::AppConfig;
use crate::models::trip::{ErrorResponse, GeneratePlanResponse, TripRequest};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const GENERATE_PLAN_PATH: &str = "/api/generate-plan";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to generate plan";

#[derive(Debug)]
pub enum PlanClientError {
    ConfigError(String),
    HttpError(reqwest::Error),
    /// Non-2xx answer; carries the server's `error` text or the generic message.
    ApiError(String),
}

impl fmt::Display for PlanClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanClientError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PlanClientError::HttpError(err) => write!(f, "{}", err),
            PlanClientError::ApiError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PlanClientError {}

impl From<reqwest::Error> for PlanClientError {
    fn from(err: reqwest::Error) -> Self {
        PlanClientError::HttpError(err)
    }
}

impl From<url::ParseError> for PlanClientError {
    fn from(err: url::ParseError) -> Self {
        PlanClientError::ConfigError(format!("invalid plan API URL: {}", err))
    }
}

/// Anything that can answer a trip-plan request with the raw `plan` value.
pub trait PlanApi {
    async fn generate_plan(&self, request: &TripRequest) -> Result<Value, PlanClientError>;
}

#[derive(Clone)]
pub struct PlanClient {
    client: Client,
    endpoint: Url,
}

impl PlanClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PlanClientError> {
        let endpoint = Url::parse(base_url)?.join(GENERATE_PLAN_PATH)?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PlanClientError> {
        Self::new(&config.plan_api_url, config.plan_api_timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl PlanApi for PlanClient {
    async fn generate_plan(&self, request: &TripRequest) -> Result<Value, PlanClientError> {
        log::info!(
            "Requesting plan for {} from {}",
            request.destination,
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) if !body.error.is_empty() => body.error,
                _ => DEFAULT_FAILURE_MESSAGE.to_string(),
            };
            log::warn!("Plan API answered {}: {}", status, message);
            return Err(PlanClientError::ApiError(message));
        }

        let body: GeneratePlanResponse = response.json().await?;
        Ok(body.plan)
    }
}
