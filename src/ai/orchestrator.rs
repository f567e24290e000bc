//! Sequential provider failover.
//!
//! Providers are attempted in priority order; every per-provider failure is
//! recorded and skipped, and only exhaustion of the whole list surfaces to the
//! caller. First parsed result wins and stops the iteration.

use super::{GeminiVisionClient, OpenAiCompatVisionClient, VisionService};
use crate::config::Config;
use crate::error::ProviderFailure;
use crate::{Error, Result};
use tokio_retry::{strategy::FixedInterval, Retry};
use tracing::{info, warn};

const RETRY_INTERVAL_MS: u64 = 2000;

pub struct Orchestrator {
    providers: Vec<Box<dyn VisionService>>,
    retry_attempts: usize,
}

impl Orchestrator {
    pub fn new(providers: Vec<Box<dyn VisionService>>) -> Self {
        Self {
            providers,
            retry_attempts: 0,
        }
    }

    /// Opt-in bounded retry per provider before failing over. The default of
    /// zero preserves the one-shot-then-failover contract.
    pub fn with_retry_attempts(mut self, retry_attempts: usize) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    /// Build the provider chain from configuration, in priority order
    /// Gemini, OpenRouter, Groq. A provider without an API key is skipped;
    /// an empty chain is a configuration error.
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Result<Self> {
        let mut providers: Vec<Box<dyn VisionService>> = Vec::new();

        if let Some(key) = &config.google_api_key {
            info!("Provider enabled: gemini (model: {})", config.gemini_model);
            providers.push(Box::new(GeminiVisionClient::new_with_client(
                key.clone(),
                config.gemini_model.clone(),
                config.provider_timeout,
                http_client.clone(),
            )));
        }
        if let Some(key) = &config.openrouter_api_key {
            info!(
                "Provider enabled: openrouter (model: {})",
                config.openrouter_model
            );
            providers.push(Box::new(OpenAiCompatVisionClient::openrouter(
                key.clone(),
                config.openrouter_model.clone(),
                config.provider_timeout,
                http_client.clone(),
            )));
        }
        if let Some(key) = &config.groq_api_key {
            info!("Provider enabled: groq (model: {})", config.groq_model);
            providers.push(Box::new(OpenAiCompatVisionClient::groq(
                key.clone(),
                config.groq_model.clone(),
                config.provider_timeout,
                http_client,
            )));
        }

        if providers.is_empty() {
            return Err(Error::Config(
                "No vision provider configured; set at least one API key".to_string(),
            ));
        }

        Ok(Self::new(providers).with_retry_attempts(config.provider_retry_attempts))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Run the images through the provider chain and return the first
    /// successfully parsed analysis.
    pub async fn analyze(&self, images: &[String]) -> Result<serde_json::Value> {
        if images.is_empty() {
            return Err(Error::InvalidRequest(
                "Provide array of base64 images in 'images'".to_string(),
            ));
        }

        let mut failures = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            info!("Trying provider: {}", provider.name());
            match self.attempt(provider.as_ref(), images).await {
                Ok(result) => {
                    info!("Success from provider: {}", provider.name());
                    return Ok(result);
                }
                Err(e) => {
                    warn!("Provider {} failed: {}", provider.name(), e);
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Err(Error::AllProvidersFailed(failures))
    }

    async fn attempt(
        &self,
        provider: &dyn VisionService,
        images: &[String],
    ) -> Result<serde_json::Value> {
        if self.retry_attempts == 0 {
            return provider.analyze(images).await;
        }

        let strategy = FixedInterval::from_millis(RETRY_INTERVAL_MS).take(self.retry_attempts);
        Retry::spawn(strategy, move || async move {
            match provider.analyze(images).await {
                Ok(result) => Ok(result),
                Err(e) => {
                    warn!(
                        "Provider {} attempt failed: {}. Will retry...",
                        provider.name(),
                        e
                    );
                    Err(e)
                }
            }
        })
        .await
    }
}
