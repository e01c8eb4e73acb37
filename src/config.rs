use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8080;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PLAN_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_PLAN_API_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// `None` lets any origin call the API.
    pub frontend_origin: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub plan_api_url: String,
    pub plan_api_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            environment: "development".to_string(),
            frontend_origin: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            plan_api_url: DEFAULT_PLAN_API_URL.to_string(),
            plan_api_timeout: Duration::from_secs(DEFAULT_PLAN_API_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port),
            environment: env::var("RUST_ENV").unwrap_or(defaults.environment),
            frontend_origin: non_empty_var("FRONTEND_ORIGIN"),
            // `gen_ai` is the older name for the key.
            gemini_api_key: non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("gen_ai")),
            gemini_model: non_empty_var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            plan_api_url: non_empty_var("PLAN_API_URL").unwrap_or(defaults.plan_api_url),
            plan_api_timeout: Duration::from_secs(parse_or(
                "PLAN_API_TIMEOUT_SECS",
                DEFAULT_PLAN_API_TIMEOUT_SECS,
            )),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match non_empty_var(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} value {:?}, using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}
