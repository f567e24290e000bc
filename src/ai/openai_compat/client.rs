use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// REST client for OpenAI-compatible chat-completions endpoints.
///
/// OpenRouter and Groq speak the same wire shape; only the base URL, bearer
/// token, and optional attribution headers differ, so they share this client.
pub struct OpenAiCompatHttpClient {
    client: Client,
    provider: String,
    api_key: String,
    base_url: String,
    extra_headers: Vec<(&'static str, String)>,
    timeout: Duration,
}

impl OpenAiCompatHttpClient {
    pub fn new(
        provider: String,
        api_key: String,
        base_url: String,
        extra_headers: Vec<(&'static str, String)>,
        timeout: Duration,
        client: Client,
    ) -> Self {
        Self {
            client,
            provider,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            extra_headers,
            timeout,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub async fn chat_completion<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut builder = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        for (name, value) in &self.extra_headers {
            builder = builder.header(*name, value);
        }

        let response = builder.json(request).send().await.map_err(|e| {
            tracing::error!("Failed to send request to {}: {}", self.provider, e);
            Error::ProviderTransport(format!("{} request failed: {}", self.provider, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!(
                "{} API error (status {}): {}",
                self.provider,
                status,
                error_text
            );
            return Err(Error::ProviderTransport(format!(
                "{} API error (status {}): {}",
                self.provider, status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                "Failed to parse {} response: {}\nBody: {}",
                self.provider,
                e,
                body
            );
            Error::ProviderResponse(format!(
                "Failed to parse {} response: {}",
                self.provider, e
            ))
        })
    }
}
