use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Body of `POST /api/generate-plan`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    /// `null` when the count is not a finite number.
    #[serde(default)]
    pub travelers: Option<Number>,
    #[serde(default)]
    pub preferences: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
}

/// Incoming generate-plan body before the required fields are checked.
/// A field sent as `null` is still present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSubmission {
    #[serde(default, deserialize_with = "present")]
    pub destination: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub departure_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub return_date: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub travelers: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub preferences: Option<Value>,
    pub starting_city: Option<String>,
    pub transport: Option<String>,
}

impl TripSubmission {
    /// Returns `None` when any of the required fields is missing.
    pub fn into_request(self) -> Option<TripRequest> {
        let destination = value_text(self.destination?);
        let departure_date = value_text(self.departure_date?);
        let return_date = value_text(self.return_date?);
        let travelers = value_number(&self.travelers?);

        Some(TripRequest {
            destination,
            departure_date,
            return_date,
            travelers,
            preferences: self.preferences.map(value_text).unwrap_or_default(),
            starting_city: self.starting_city,
            transport: self.transport,
        })
    }
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn value_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(text) => parse_count(text),
        _ => None,
    }
}

/// Reads a typed-in count as written: `"2"` stays an integer, `"2.5"` a
/// float. Anything else, including `inf` and `NaN`, is `None`.
pub fn parse_count(text: &str) -> Option<Number> {
    let text = text.trim();
    match text.parse::<i64>() {
        Ok(n) => Some(Number::from(n)),
        Err(_) => text.parse::<f64>().ok().and_then(Number::from_f64),
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratePlanResponse {
    #[serde(default)]
    pub plan: Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
