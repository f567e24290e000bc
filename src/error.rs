//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

/// One provider's terminal failure, kept for diagnostics when every provider
/// has been exhausted.
#[derive(Debug, Clone)]
pub struct ProviderFailure {
    pub provider: String,
    pub error: String,
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    if failures.is_empty() {
        return "no providers were attempted".to_string();
    }
    failures
        .iter()
        .map(|f| format!("{}: {}", f.provider, f.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid image encoding: {0}")]
    InvalidImageEncoding(String),

    #[error("Provider transport error: {0}")]
    ProviderTransport(String),

    #[error("Provider response error: {0}")]
    ProviderResponse(String),

    #[error("All providers failed: {}", format_failures(.0))]
    AllProvidersFailed(Vec<ProviderFailure>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_providers_failed_lists_each_provider() {
        let err = Error::AllProvidersFailed(vec![
            ProviderFailure {
                provider: "gemini".to_string(),
                error: "timeout".to_string(),
            },
            ProviderFailure {
                provider: "openrouter".to_string(),
                error: "status 401".to_string(),
            },
        ]);

        let message = err.to_string();
        assert!(message.contains("gemini: timeout"));
        assert!(message.contains("openrouter: status 401"));
    }

    #[test]
    fn test_all_providers_failed_with_no_attempts_is_self_explanatory() {
        let err = Error::AllProvidersFailed(Vec::new());
        assert_eq!(
            err.to_string(),
            "All providers failed: no providers were attempted"
        );
    }
}
