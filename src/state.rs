use crate::config::AppConfig;
use crate::services::plan_client::{PlanClient, PlanClientError};
use crate::services::plan_generation_service::{GeminiPlanGenerator, PlanGenerator};
use std::sync::Arc;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub generator: Option<Arc<dyn PlanGenerator>>,
    pub plan_client: PlanClient,
    pub environment: String,
    pub model: String,
}

impl AppState {
    pub fn new(
        generator: Option<Arc<dyn PlanGenerator>>,
        plan_client: PlanClient,
        config: &AppConfig,
    ) -> Self {
        let model = generator
            .as_ref()
            .map(|g| g.model().to_string())
            .unwrap_or_else(|| config.gemini_model.clone());

        Self {
            generator,
            plan_client,
            environment: config.environment.clone(),
            model,
        }
    }

    /// Builds the Gemini generator when a key is configured. A missing key is
    /// logged, not fatal: the plan endpoint then answers with a 500.
    pub fn from_config(config: &AppConfig) -> Result<Self, PlanClientError> {
        let generator: Option<Arc<dyn PlanGenerator>> =
            match GeminiPlanGenerator::from_config(config) {
                Ok(generator) => {
                    log::info!("Gemini plan generator ready ({})", generator.model());
                    Some(Arc::new(generator))
                }
                Err(e) => {
                    log::warn!("Gemini init failed: {}", e);
                    None
                }
            };

        let plan_client = PlanClient::from_config(config)?;
        Ok(Self::new(generator, plan_client, config))
    }

    pub fn is_ready(&self) -> bool {
        self.generator.is_some()
    }
}
