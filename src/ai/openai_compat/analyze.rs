use super::client::OpenAiCompatHttpClient;
use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatMessageContent, ImageUrl,
    MessagePart,
};
use crate::ai::{data_uri, VisionService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct OpenAiCompatVisionClient {
    http: OpenAiCompatHttpClient,
    model: String,
}

impl OpenAiCompatVisionClient {
    pub fn new(
        provider: String,
        api_key: String,
        base_url: String,
        extra_headers: Vec<(&'static str, String)>,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: OpenAiCompatHttpClient::new(
                provider,
                api_key,
                base_url,
                extra_headers,
                timeout,
                client,
            ),
            model,
        }
    }

    pub fn openrouter(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        // Attribution headers OpenRouter uses for app rankings.
        let extra_headers = vec![
            ("HTTP-Referer", "http://localhost".to_string()),
            ("X-Title", "Dermatology Skin Analyzer".to_string()),
        ];
        Self::new(
            "openrouter".to_string(),
            api_key,
            OPENROUTER_BASE_URL.to_string(),
            extra_headers,
            model,
            timeout,
            client,
        )
    }

    pub fn groq(
        api_key: String,
        model: String,
        timeout: Duration,
        client: reqwest::Client,
    ) -> Self {
        Self::new(
            "groq".to_string(),
            api_key,
            GROQ_BASE_URL.to_string(),
            Vec::new(),
            model,
            timeout,
            client,
        )
    }
}

#[async_trait]
impl VisionService for OpenAiCompatVisionClient {
    fn name(&self) -> &str {
        self.http.provider()
    }

    async fn analyze(&self, images: &[String]) -> Result<serde_json::Value> {
        tracing::debug!(
            "Analyzing {} image(s) via {}",
            images.len(),
            self.http.provider()
        );

        // Text part first, then one image part per input. The image part
        // carries the full data URI; validate it before sending.
        let mut parts = Vec::with_capacity(images.len() + 1);
        parts.push(MessagePart {
            part_type: "text".to_string(),
            text: Some(crate::prompts::SKIN_ANALYSIS.to_string()),
            image_url: None,
        });
        for image in images {
            data_uri::parse(image)?;
            parts.push(MessagePart {
                part_type: "image_url".to_string(),
                text: None,
                image_url: Some(ImageUrl { url: image.clone() }),
            });
        }

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(ChatMessageContent::Parts(parts)),
            }],
        };

        let response: ChatCompletionResponse = self.http.chat_completion(&request).await?;

        let text = response
            .choices
            .first()
            .and_then(|choice| match &choice.message.content {
                Some(ChatMessageContent::Text(text)) => Some(text.clone()),
                _ => None,
            })
            .ok_or_else(|| {
                Error::ProviderResponse(format!(
                    "No message content in {} response",
                    self.http.provider()
                ))
            })?;

        serde_json::from_str(text.trim()).map_err(|e| {
            Error::ProviderResponse(format!(
                "{} returned non-JSON analysis: {}",
                self.http.provider(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const JPEG_URI: &str = "data:image/jpeg;base64,aGVsbG8=";

    fn make_client(server: &MockServer) -> OpenAiCompatVisionClient {
        OpenAiCompatVisionClient::new(
            "openrouter".to_string(),
            "test-key".to_string(),
            server.uri(),
            vec![("X-Title", "Dermatology Skin Analyzer".to_string())],
            "qwen/qwen3-vl-30b-a3b-thinking".to_string(),
            Duration::from_secs(5),
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn test_analyze_parses_json_from_message_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("X-Title", "Dermatology Skin Analyzer"))
            .and(body_string_contains("\"type\":\"image_url\""))
            .and(body_string_contains(JPEG_URI))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "{\"groups\":[{\"category\":\"Pigmentation Issues\"}]}"
                    },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);
        let result = client.analyze(&[JPEG_URI.to_string()]).await.unwrap();
        assert_eq!(result["groups"][0]["category"], "Pigmentation Issues");
    }

    #[tokio::test]
    async fn test_prompt_precedes_image_parts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_string_contains("expert dermatologist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "{\"groups\":[]}" },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let result = client.analyze(&[JPEG_URI.to_string()]).await.unwrap();
        assert_eq!(result, serde_json::json!({"groups": []}));
    }

    #[tokio::test]
    async fn test_api_error_is_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.analyze(&[JPEG_URI.to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::ProviderTransport(_)));
    }

    #[tokio::test]
    async fn test_empty_choices_is_response_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.analyze(&[JPEG_URI.to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::ProviderResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_content_is_response_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{
                    "message": { "role": "assistant", "content": "Sorry, I can't help." },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.analyze(&[JPEG_URI.to_string()]).await.unwrap_err();
        assert!(matches!(err, Error::ProviderResponse(_)));
    }

    #[tokio::test]
    async fn test_malformed_data_uri_fails_before_any_request() {
        let server = MockServer::start().await;

        let client = make_client(&server);
        let err = client
            .analyze(&["not-a-data-uri".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidImageEncoding(_)));
    }
}
