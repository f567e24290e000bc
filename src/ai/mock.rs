use super::VisionService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Scripted vision provider for orchestrator and server tests.
///
/// Queued responses are served in order and cycle when exhausted; with no
/// queued responses every call succeeds with an empty-groups analysis.
#[derive(Clone)]
pub struct MockVisionClient {
    name: String,
    responses: Arc<Mutex<Vec<std::result::Result<serde_json::Value, String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockVisionClient {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.responses.lock().unwrap().push(Err(message.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl VisionService for MockVisionClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn analyze(&self, _images: &[String]) -> Result<serde_json::Value> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(serde_json::json!({ "groups": [] }));
        }

        let index = (*count - 1) % responses.len();
        match &responses[index] {
            Ok(value) => Ok(value.clone()),
            Err(message) => Err(Error::ProviderTransport(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_response_is_empty_groups() {
        let client = MockVisionClient::new("mock");
        let result = client.analyze(&[]).await.unwrap();
        assert_eq!(result, serde_json::json!({ "groups": [] }));
        assert_eq!(client.get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_serves_queued_responses_in_order() {
        let client = MockVisionClient::new("mock")
            .with_failure("connection refused")
            .with_response(serde_json::json!({ "groups": [1] }));

        assert!(client.analyze(&[]).await.is_err());
        let second = client.analyze(&[]).await.unwrap();
        assert_eq!(second, serde_json::json!({ "groups": [1] }));

        // Cycles back to the first scripted response.
        assert!(client.analyze(&[]).await.is_err());
        assert_eq!(client.get_call_count(), 3);
    }
}
