//! Request/response bodies for the inbound HTTP surface.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze-skin`.
///
/// A missing `images` field defaults to empty and is rejected by the
/// orchestrator the same way an explicit empty list is.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub images: Vec<String>,
}

/// Error payload returned to callers; matches the `detail` shape the
/// original service exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_deserializes_images() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"images":["data:image/jpeg;base64,abcd"]}"#).unwrap();
        assert_eq!(request.images.len(), 1);
    }

    #[test]
    fn test_missing_images_field_defaults_to_empty() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.images.is_empty());
    }

    #[test]
    fn test_error_response_uses_detail_key() {
        let payload = serde_json::to_string(&ErrorResponse {
            detail: "All providers failed".to_string(),
        })
        .unwrap();
        assert_eq!(payload, r#"{"detail":"All providers failed"}"#);
    }
}
