//! Environment-backed configuration.
//!
//! All settings are read once at startup and passed by reference into the
//! orchestrator and adapters; nothing reads the environment after init.

use crate::{Error, Result};
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_OPENROUTER_MODEL: &str = "qwen/qwen3-vl-30b-a3b-thinking";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.2-11b-vision-preview";

const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Missing key disables the provider; it is not an error on its own.
    pub google_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub groq_api_key: Option<String>,

    pub gemini_model: String,
    pub openrouter_model: String,
    pub groq_model: String,

    pub provider_timeout: Duration,
    /// Extra attempts per provider before failing over. 0 keeps the baseline
    /// single-shot behavior.
    pub provider_retry_attempts: usize,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let google_api_key = env_opt("GOOGLE_API_KEY");
        let openrouter_api_key = env_opt("OPENROUTER_API_KEY");
        let groq_api_key = env_opt("GROQ_API_KEY");

        if google_api_key.is_none() && openrouter_api_key.is_none() && groq_api_key.is_none() {
            return Err(Error::Config(
                "No provider API key set. Provide at least one of GOOGLE_API_KEY, \
                 OPENROUTER_API_KEY, GROQ_API_KEY"
                    .to_string(),
            ));
        }

        let provider_timeout_secs = env_parsed("PROVIDER_TIMEOUT_SECS", DEFAULT_PROVIDER_TIMEOUT_SECS)?;
        let provider_retry_attempts = env_parsed("PROVIDER_RETRY_ATTEMPTS", 0)?;
        let port = env_parsed("PORT", DEFAULT_PORT)?;

        Ok(Self {
            google_api_key,
            openrouter_api_key,
            groq_api_key,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            openrouter_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_MODEL.to_string()),
            groq_model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string()),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            provider_retry_attempts,
            port,
        })
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a valid number, got '{}'", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            google_api_key: Some("g".to_string()),
            openrouter_api_key: None,
            groq_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            provider_timeout: Duration::from_secs(60),
            provider_retry_attempts: 0,
            port: 8000,
        }
    }

    #[test]
    fn test_config_is_cloneable_for_injection() {
        let config = test_config();
        let copy = config.clone();
        assert_eq!(copy.gemini_model, config.gemini_model);
        assert_eq!(copy.provider_timeout, Duration::from_secs(60));
    }
}
