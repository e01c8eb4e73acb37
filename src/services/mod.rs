pub mod plan_client;
pub mod plan_generation_service;
pub mod plan_normalizer;
pub mod plan_renderer;
pub mod submission;
