//! Plan Generation Service backed by the Gemini API
//!
//! Builds a travel-planner prompt from a [`TripRequest`] and asks Gemini for a
//! day-wise itinerary. The model's text is handed back as the `plan` value
//! without further interpretation; the renderer decides how to show it.
//!
//! ## Setup
//! Set `GEMINI_API_KEY` (or the older `gen_ai`) and optionally `GEMINI_MODEL`.
//! Without a key the service starts but reports itself as not ready.
//!
//! ## Local checks
//! Requests that can be answered without the model (blank destination, no
//! travelers, return before departure) get the matching sentinel plan text.

use crate::config::AppConfig;
use crate::models::trip::TripRequest;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GENERATION_TIMEOUT_SECS: u64 = 90;

pub const MISSING_TRIP_DETAILS: &str = "Please provide all required trip details.";
pub const NO_TRAVELERS: &str = "There must be at least one traveler.";
pub const INVALID_DURATION: &str = "Trip duration must be at least 1 day.";

#[derive(Debug)]
pub enum PlanGenerationError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for PlanGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanGenerationError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            PlanGenerationError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PlanGenerationError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for PlanGenerationError {}

impl From<reqwest::Error> for PlanGenerationError {
    fn from(err: reqwest::Error) -> Self {
        PlanGenerationError::HttpError(err)
    }
}

#[async_trait]
pub trait PlanGenerator: Send + Sync {
    fn model(&self) -> &str;

    /// Raw plan text for the trip.
    async fn generate(&self, request: &TripRequest) -> Result<String, PlanGenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiPlanGenerator {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiPlanGenerator {
    pub fn new(api_key: String, model: String) -> Result<Self, PlanGenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(GENERATION_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, PlanGenerationError> {
        let api_key = config.gemini_api_key.clone().ok_or_else(|| {
            PlanGenerationError::EnvironmentError("GEMINI_API_KEY is not set".to_string())
        })?;
        Self::new(api_key, config.gemini_model.clone())
    }
}

#[async_trait]
impl PlanGenerator for GeminiPlanGenerator {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &TripRequest) -> Result<String, PlanGenerationError> {
        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: build_prompt(request),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(PlanGenerationError::ResponseError(format!(
                "Gemini returned {}: {}",
                status, detail
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(PlanGenerationError::ResponseError(
                "Gemini returned no text".to_string(),
            ));
        }

        Ok(strip_code_fence(&text))
    }
}

/// Sentinel plan text for requests that cannot produce an itinerary.
pub fn precheck(request: &TripRequest) -> Option<&'static str> {
    if request.destination.trim().is_empty() {
        return Some(MISSING_TRIP_DETAILS);
    }
    match request.travelers.as_ref().and_then(|n| n.as_f64()) {
        Some(count) if count >= 1.0 => {}
        _ => return Some(NO_TRAVELERS),
    }

    let departure = NaiveDate::parse_from_str(request.departure_date.trim(), "%Y-%m-%d");
    let return_date = NaiveDate::parse_from_str(request.return_date.trim(), "%Y-%m-%d");
    if let (Ok(departure), Ok(return_date)) = (departure, return_date) {
        if return_date < departure {
            return Some(INVALID_DURATION);
        }
    }
    None
}

/// Models like to wrap JSON answers in a Markdown fence.
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    for fence in ["```json", "```"] {
        if let Some(stripped) = trimmed.strip_prefix(fence) {
            return stripped.trim().trim_end_matches("```").trim().to_string();
        }
    }
    trimmed.to_string()
}

pub fn build_prompt(request: &TripRequest) -> String {
    let starting_city = request.starting_city.as_deref().unwrap_or("Unknown");
    let transport = request.transport.as_deref().unwrap_or("auto");
    let travelers = request
        .travelers
        .as_ref()
        .map_or_else(|| "null".to_string(), |n| n.to_string());
    let preferences = if request.preferences.trim().is_empty() {
        "None"
    } else {
        request.preferences.trim()
    };

    format!(
        r#"
You are a travel planner AI. First, decide transport from a starting city in India to the destination, then generate a day-wise itinerary.

User details:
- Starting City: {starting_city}
- Destination: {destination}
- Departure Date: {departure}
- Return Date: {return_date}
- Number of Travelers: {travelers}
- Preferred Transport (optional): {transport}
- Special Preferences: {preferences}

Transport rules (India):
- If straight-line or driving distance ≤ 200 km: recommend bus/train over plane unless user explicitly prefers plane.
- If distance > 200 km: recommend plane for time efficiency; bus/train can be secondary options.
- Personal vehicle is valid anytime; if chosen, include driving route hints and safe stopovers for long drives.

Pricing guidance (estimates, INR, per person one-way unless noted):
- bus: ₹3–₹5 per km
- train: ₹0.8–₹2 per km (2S/SL approx)
- plane: ₹2500–₹7000 typical domestic (city-pair dependent)
- personal_vehicle: ₹7–₹12 per km fuel estimate (total fuel = rate × distance; optionally divide by occupants if sharing)

Road-trip logic:
- If personal vehicle or a long bus/train leg, include a brief route summary (NH/expressway names where applicable).
- If drive time for a day segment > 8–10 hours, recommend a safe midway stay with a city/town and a budget accommodation hint.
- If notable POIs lie near the corridor, suggest a quick stop (max 1–2) on the way.

Output format: Return only JSON, no extra text. Keep strings concise and route.summary under 120 characters; corridor_pois as short names.
{{
  "trip_meta": {{
    "start": "{starting_city}",
    "destination": "{destination}",
    "distance_km_estimate": 0,
    "recommended_transport": "train",
    "user_transport_choice": "{transport}",
    "pricing": {{
      "mode": "train",
      "avg_price_per_person_one_way_inr": 0,
      "round_trip": true,
      "travelers": {travelers},
      "total_estimated_inr": 0
    }},
    "route": {{
      "summary": "",
      "drive_hours_estimate": 0,
      "midway_stay_recommendation": "",
      "corridor_pois": []
    }}
  }},
  "days": [
    {{
      "day": "1",
      "theme": "Theme for day 1",
      "places": [
        {{
          "place_no": "1",
          "place_name": "Place name",
          "description": "Short description",
          "activity": "Suggested activity",
          "best_time_to_visit": "Time window"
        }}
      ]
    }}
  ]
}}

Rules:
- Calculate trip length from dates (max 14 days). If > 14, respond with: "For trips longer than 14 days, consider exploring nearby cities or regions to make the most of your travel experience. as we are currently only recommend for only  for four days sorry for the inconvenience"
- Reject destinations outside India: "Sorry, I currently only provide travel plans for destinations within India."
- Reject celestial bodies: "Sorry, I don't have information on that destination."
- If start date > end date: "Trip duration must be at least 1 day."
- If Preferred Transport is provided and not "auto", use it as user_transport_choice; still set recommended_transport per rules.
- Keep numbers realistic; distance_km_estimate can be approximate. Use round_trip = true if a return is implied.
- Do not include any text outside the JSON.
"#,
        starting_city = starting_city,
        destination = request.destination,
        departure = request.departure_date,
        return_date = request.return_date,
        travelers = travelers,
        transport = transport,
        preferences = preferences,
    )
}
