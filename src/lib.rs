pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    assessment_service::AssessmentService,
    generation_client::{GeminiClient, GenerationClient},
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub assessment_service: AssessmentService,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        let gemini = GeminiClient::new(config, http_client)?;
        Ok(Self::with_client(Arc::new(gemini), config))
    }

    /// Builds the state around any generation client; tests pass a stub here.
    pub fn with_client(client: Arc<dyn GenerationClient>, config: &Config) -> Self {
        let assessment_service =
            AssessmentService::new(client, config.level_vocabulary, config.card_delay);
        Self { assessment_service }
    }
}
