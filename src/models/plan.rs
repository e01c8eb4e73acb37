use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Fields that carry a single day's list of stops, in lookup priority order.
pub const SINGLE_DAY_FIELDS: [&str; 6] = [
    "activities",
    "places",
    "stops",
    "steps",
    "plan",
    "highlights",
];

pub const DEFAULT_DAY_KEY: &str = "day1";

fn day_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^day[0-9]+$").expect("valid day key pattern"))
}

/// True for keys such as `day1`, `Day12` or `DAY3`.
pub fn is_day_key(key: &str) -> bool {
    day_key_pattern().is_match(key)
}

/// The `plan` value returned by the plan API, decoded by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanPayload {
    Absent,
    Text(String),
    List(Vec<Value>),
    Record(Map<String, Value>),
    Scalar(Value),
}

impl From<Value> for PlanPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => PlanPayload::Absent,
            Value::String(text) => PlanPayload::Text(text),
            Value::Array(items) => PlanPayload::List(items),
            Value::Object(fields) => PlanPayload::Record(fields),
            scalar => PlanPayload::Scalar(scalar),
        }
    }
}

impl From<Option<Value>> for PlanPayload {
    fn from(value: Option<Value>) -> Self {
        value.map(PlanPayload::from).unwrap_or(PlanPayload::Absent)
    }
}

impl From<PlanPayload> for Value {
    fn from(payload: PlanPayload) -> Self {
        match payload {
            PlanPayload::Absent => Value::Null,
            PlanPayload::Text(text) => Value::String(text),
            PlanPayload::List(items) => Value::Array(items),
            PlanPayload::Record(fields) => Value::Object(fields),
            PlanPayload::Scalar(scalar) => scalar,
        }
    }
}

/// One day's raw value inside an itinerary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityValue<'a> {
    Absent,
    Text(&'a str),
    List(&'a [Value]),
    Record(&'a Map<String, Value>),
    Scalar(&'a Value),
}

impl<'a> From<&'a Value> for ActivityValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => ActivityValue::Absent,
            Value::String(text) => ActivityValue::Text(text),
            Value::Array(items) => ActivityValue::List(items),
            Value::Object(fields) => ActivityValue::Record(fields),
            scalar => ActivityValue::Scalar(scalar),
        }
    }
}

/// Day key to raw day value, in the order the server sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Itinerary {
    days: Map<String, Value>,
}

impl Itinerary {
    pub fn from_days(days: Map<String, Value>) -> Self {
        Self { days }
    }

    /// Wraps a single day's value under `day1`.
    pub fn single_day(value: Value) -> Self {
        let mut days = Map::new();
        days.insert(DEFAULT_DAY_KEY.to_string(), value);
        Self { days }
    }

    pub fn days(&self) -> &Map<String, Value> {
        &self.days
    }

    pub fn day(&self, key: &str) -> Option<&Value> {
        self.days.get(key)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_day_key_pattern() {
        assert!(is_day_key("day1"));
        assert!(is_day_key("Day12"));
        assert!(is_day_key("DAY3"));
        assert!(!is_day_key("day"));
        assert!(!is_day_key("day1a"));
        assert!(!is_day_key("overview"));
        assert!(!is_day_key("firstday1"));
    }

    #[test]
    fn test_day_key_digits_are_ascii_only() {
        assert!(!is_day_key("day\u{0661}"));
        assert!(!is_day_key("day\u{0967}2"));
    }

    #[test]
    fn test_payload_decodes_by_shape() {
        assert_eq!(PlanPayload::from(Value::Null), PlanPayload::Absent);
        assert_eq!(PlanPayload::from(None::<Value>), PlanPayload::Absent);
        assert_eq!(
            PlanPayload::from(json!("Beach")),
            PlanPayload::Text("Beach".to_string())
        );
        assert!(matches!(PlanPayload::from(json!([1, 2])), PlanPayload::List(items) if items.len() == 2));
        assert!(matches!(PlanPayload::from(json!({"a": 1})), PlanPayload::Record(_)));
        assert_eq!(PlanPayload::from(json!(true)), PlanPayload::Scalar(json!(true)));
    }

    #[test]
    fn test_single_day_itinerary() {
        let itinerary = Itinerary::single_day(json!(["Museum"]));
        assert_eq!(itinerary.len(), 1);
        assert_eq!(itinerary.day("day1"), Some(&json!(["Museum"])));
        assert_eq!(itinerary.into_value(), json!({"day1": ["Museum"]}));
    }
}
