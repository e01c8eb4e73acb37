//! Turns the loosely shaped `plan` value returned by the plan API into a
//! day-indexed [`Itinerary`], and expands each day into activity strings.

use crate::models::plan::{
    is_day_key, ActivityValue, Itinerary, PlanPayload, SINGLE_DAY_FIELDS,
};
use serde_json::Value;

/// Plan texts the generator uses to say no plan could be produced.
pub const SENTINEL_ERRORS: [&str; 4] = [
    "Sorry, I don't have information on that destination.",
    "Trip duration must be at least 1 day.",
    "There must be at least one traveler.",
    "Please provide all required trip details.",
];

/// Matches after trimming, so `" Trip duration must be at least 1 day.\n"` counts.
pub fn sentinel_error(text: &str) -> Option<&'static str> {
    let trimmed = text.trim();
    SENTINEL_ERRORS.iter().copied().find(|s| *s == trimmed)
}

/// `{...}` or `[...]` once surrounding whitespace is removed.
pub fn looks_like_json(text: &str) -> bool {
    let t = text.trim();
    (t.starts_with('{') && t.ends_with('}')) || (t.starts_with('[') && t.ends_with(']'))
}

/// Parses JSON-looking text, leaving anything else (or anything that fails to
/// parse) as text.
pub fn parse_embedded_json(payload: PlanPayload) -> PlanPayload {
    match payload {
        PlanPayload::Text(text) if looks_like_json(&text) => {
            match serde_json::from_str::<Value>(text.trim()) {
                Ok(parsed) => PlanPayload::from(parsed),
                Err(e) => {
                    log::debug!("plan text looked like JSON but did not parse: {}", e);
                    PlanPayload::Text(text)
                }
            }
        }
        other => other,
    }
}

pub fn coerce_to_itinerary(payload: &PlanPayload) -> Option<Itinerary> {
    match payload {
        PlanPayload::Absent | PlanPayload::Scalar(_) => None,
        PlanPayload::Text(text) => {
            if !looks_like_json(text) {
                return None;
            }
            let parsed: Value = serde_json::from_str(text.trim()).ok()?;
            coerce_to_itinerary(&PlanPayload::from(parsed))
        }
        PlanPayload::List(items) => Some(Itinerary::single_day(Value::Array(items.clone()))),
        PlanPayload::Record(fields) => {
            if fields.keys().any(|k| is_day_key(k)) {
                return Some(Itinerary::from_days(fields.clone()));
            }
            if SINGLE_DAY_FIELDS.iter().any(|k| fields.contains_key(*k)) {
                return Some(Itinerary::single_day(Value::Object(fields.clone())));
            }
            None
        }
    }
}

pub fn normalize_day_value(value: ActivityValue<'_>) -> Vec<String> {
    match value {
        ActivityValue::Absent => Vec::new(),
        ActivityValue::Text(text) => split_activities(text),
        ActivityValue::List(items) => items.iter().map(activity_text).collect(),
        ActivityValue::Record(fields) => {
            for key in SINGLE_DAY_FIELDS {
                match fields.get(key) {
                    Some(Value::Array(items)) => {
                        return items.iter().map(activity_text).collect();
                    }
                    Some(Value::String(text)) => return split_activities(text),
                    _ => {}
                }
            }
            vec![Value::Object(fields.clone()).to_string()]
        }
        ActivityValue::Scalar(scalar) => vec![scalar.to_string()],
    }
}

fn activity_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Splits on newlines, semicolons, and periods that end a sentence (followed by
/// whitespace or the end of the text).
fn split_activities(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let boundary = match c {
            '\n' | ';' => true,
            '.' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
            _ => false,
        };
        if boundary {
            segments.push(&text[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    segments.push(&text[start..]);

    let activities: Vec<String> = segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let trimmed = text.trim();
    if activities.is_empty() && !trimmed.is_empty() {
        return vec![trimmed.to_string()];
    }
    activities
}
