use crate::models::plan::{ActivityValue, Itinerary};
use crate::services::plan_normalizer::normalize_day_value;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::OnceLock;

pub const ITINERARY_TITLE: &str = "Your Itinerary";

/// Card styles for the `#planOutput` container.
pub const PLAN_OUTPUT_STYLES: &str = "\
#planOutput .itinerary-title { margin: 0 0 12px 0; font-size: 20px; font-weight: 600; color: #0f172a; }
#planOutput .day-card { border: 1px solid #e5e7eb; border-radius: 10px; padding: 14px 16px; margin-bottom: 12px; background: #fff; box-shadow: 0 1px 2px rgba(0,0,0,0.03); }
#planOutput .day-heading { font-weight: 700; margin: 0 0 8px 0; color: #111827; }
#planOutput .activity-list { margin: 0; padding-left: 18px; }
#planOutput .activity-list li { margin: 4px 0; }
#planOutput .msg { padding: 12px 14px; border-radius: 8px; white-space: pre-wrap; }
#planOutput .msg.info { background: #f5f7fb; border: 1px solid #e3e7ef; color: #1e293b; }
#planOutput .msg.error { background: #ffe6e6; color: #a40000; border: 1px solid #ffb3b3; }
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Error,
}

impl MessageKind {
    fn class_name(&self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCard {
    pub key: String,
    pub heading: String,
    pub activities: Vec<String>,
}

/// What ends up in the plan output container. Each variant replaces whatever
/// was shown before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RenderedPlan {
    Itinerary { title: String, days: Vec<DayCard> },
    Message { kind: MessageKind, text: String },
}

impl RenderedPlan {
    pub fn info(text: impl Into<String>) -> Self {
        RenderedPlan::Message {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        RenderedPlan::Message {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            RenderedPlan::Message {
                kind: MessageKind::Error,
                ..
            }
        )
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match self {
            RenderedPlan::Itinerary { title, days } => {
                html.push_str(&format!(
                    "<div class=\"itinerary-title\">{}</div>",
                    escape_html(title)
                ));
                for day in days {
                    html.push_str("<div class=\"day-card\">");
                    html.push_str(&format!(
                        "<div class=\"day-heading\">{}</div>",
                        escape_html(&day.heading)
                    ));
                    html.push_str("<ol class=\"activity-list\">");
                    for activity in &day.activities {
                        html.push_str(&format!("<li>{}</li>", escape_html(activity)));
                    }
                    html.push_str("</ol></div>");
                }
            }
            RenderedPlan::Message { kind, text } => {
                html.push_str(&format!(
                    "<div class=\"msg {}\">{}</div>",
                    kind.class_name(),
                    escape_html(text)
                ));
            }
        }
        html
    }
}

pub fn render_itinerary(itinerary: &Itinerary) -> RenderedPlan {
    let days = ordered_day_keys(itinerary)
        .into_iter()
        .map(|key| {
            let activities = itinerary
                .day(key)
                .map(|value| normalize_day_value(ActivityValue::from(value)))
                .unwrap_or_default();
            DayCard {
                key: key.to_string(),
                heading: day_heading(key),
                activities,
            }
        })
        .collect();

    RenderedPlan::Itinerary {
        title: ITINERARY_TITLE.to_string(),
        days,
    }
}

/// Day keys in display order. Uses a stable insertion sort so that key sets
/// where [`compare_day_keys`] is not transitive still come out in a fixed order.
pub fn ordered_day_keys(itinerary: &Itinerary) -> Vec<&str> {
    let mut keys: Vec<&str> = itinerary.days().keys().map(String::as_str).collect();
    for i in 1..keys.len() {
        let mut j = i;
        while j > 0 && compare_day_keys(keys[j - 1], keys[j]) == Ordering::Greater {
            keys.swap(j - 1, j);
            j -= 1;
        }
    }
    keys
}

/// Numeric when both keys contain digits, plain string order otherwise.
pub fn compare_day_keys(a: &str, b: &str) -> Ordering {
    match (day_number(a), day_number(b)) {
        (Some(na), Some(nb)) => compare_digit_runs(&na, &nb),
        _ => a.cmp(b),
    }
}

/// All digits of the key joined together, without leading zeros.
fn day_number(key: &str) -> Option<String> {
    let digits: String = key.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let significant = digits.trim_start_matches('0');
    Some(if significant.is_empty() {
        "0".to_string()
    } else {
        significant.to_string()
    })
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn day_heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)day([0-9]+)").expect("valid day heading pattern"))
}

/// `day3` becomes `Day 3`; keys without a day number are shown as-is.
pub fn day_heading(key: &str) -> String {
    day_heading_pattern().replacen(key, 1, "Day $1").into_owned()
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
