//! The trip-plan form submission: validate, request, then render whatever came
//! back as day cards or as an info/error message.

use crate::models::plan::PlanPayload;
use crate::models::trip::{parse_count, TripRequest};
use crate::services::plan_client::PlanApi;
use crate::services::plan_normalizer::{coerce_to_itinerary, parse_embedded_json, sentinel_error};
use crate::services::plan_renderer::{render_itinerary, RenderedPlan};
use serde::Deserialize;
use serde_json::Value;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill all required fields.";

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub departure_date: String,
    #[serde(default)]
    pub return_date: String,
    #[serde(default)]
    pub travelers: String,
    #[serde(default)]
    pub preferences: String,
}

impl PlanForm {
    /// `None` if any required field is blank.
    pub fn to_request(&self) -> Option<TripRequest> {
        let destination = self.destination.trim();
        let travelers = self.travelers.trim();
        if destination.is_empty()
            || self.departure_date.is_empty()
            || self.return_date.is_empty()
            || travelers.is_empty()
        {
            return None;
        }

        Some(TripRequest {
            destination: destination.to_string(),
            departure_date: self.departure_date.clone(),
            return_date: self.return_date.clone(),
            travelers: parse_count(travelers),
            preferences: self.preferences.trim().to_string(),
            starting_city: None,
            transport: None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Loading,
    Rendered(RenderedPlan),
    Errored(String),
}

impl SubmissionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    /// What the plan output container shows in this state, if anything.
    pub fn output(&self) -> Option<RenderedPlan> {
        match self {
            SubmissionState::Idle | SubmissionState::Loading => None,
            SubmissionState::Rendered(plan) => Some(plan.clone()),
            SubmissionState::Errored(message) => Some(RenderedPlan::error(message.clone())),
        }
    }
}

/// One form's submission lifecycle. Every `submit` starts over from `Idle`
/// and overwrites the previous output.
pub struct PlanSubmission<'a, A: PlanApi> {
    api: &'a A,
    state: SubmissionState,
}

impl<'a, A: PlanApi> PlanSubmission<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub async fn submit(&mut self, form: &PlanForm) -> &SubmissionState {
        self.state = SubmissionState::Loading;

        let Some(request) = form.to_request() else {
            log::debug!("Plan form rejected: required fields missing");
            self.state = SubmissionState::Errored(MISSING_FIELDS_MESSAGE.to_string());
            return &self.state;
        };

        self.state = match self.api.generate_plan(&request).await {
            Ok(plan) => present_plan(plan),
            Err(e) => {
                log::error!("Plan request for {} failed: {}", request.destination, e);
                SubmissionState::Errored(format!("Error: {}", e))
            }
        };
        &self.state
    }
}

/// Decides how a successfully returned `plan` value is displayed.
pub fn present_plan(plan: Value) -> SubmissionState {
    let payload = PlanPayload::from(plan);

    if let PlanPayload::Text(text) = &payload {
        if let Some(sentinel) = sentinel_error(text) {
            return SubmissionState::Errored(sentinel.to_string());
        }
    }

    let payload = parse_embedded_json(payload);
    match coerce_to_itinerary(&payload) {
        Some(itinerary) => SubmissionState::Rendered(render_itinerary(&itinerary)),
        None => SubmissionState::Rendered(RenderedPlan::info(raw_display(payload))),
    }
}

fn raw_display(payload: PlanPayload) -> String {
    match payload {
        PlanPayload::Text(text) => text,
        other => {
            let value = Value::from(other);
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
        }
    }
}
