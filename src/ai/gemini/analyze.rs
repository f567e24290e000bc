use super::client::GeminiHttpClient;
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::ai::{data_uri, VisionService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiVisionClient {
    http: GeminiHttpClient,
}

impl GeminiVisionClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            http: GeminiHttpClient::new(api_key, model, timeout),
        }
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl VisionService for GeminiVisionClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze(&self, images: &[String]) -> Result<serde_json::Value> {
        tracing::debug!("Analyzing {} image(s) via Gemini", images.len());

        // One inlineData part per image, prompt as the trailing text part.
        let mut parts = Vec::with_capacity(images.len() + 1);
        for image in images {
            let parsed = data_uri::parse(image)?;
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: parsed.mime_type.to_string(),
                    data: parsed.payload.to_string(),
                },
            });
        }
        parts.push(Part::Text {
            text: crate::prompts::SKIN_ANALYSIS.to_string(),
        });

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
            }),
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let text = response
            .candidates
            .first()
            .and_then(|c| {
                c.content.parts.iter().find_map(|p| match p {
                    Part::Text { text } => Some(text.clone()),
                    _ => None,
                })
            })
            .ok_or_else(|| {
                Error::ProviderResponse("No text candidate in Gemini response".to_string())
            })?;

        serde_json::from_str(text.trim()).map_err(|e| {
            Error::ProviderResponse(format!("Gemini returned non-JSON analysis: {}", e))
        })
    }
}
