//! Inbound HTTP surface.
//!
//! One analysis route plus a liveness probe. The handler owns the mapping
//! from crate errors to client-facing status codes: a caller always receives
//! either the model's parsed JSON or a single `{"detail": ...}` error payload,
//! never a provider-specific error shape.

use crate::ai::Orchestrator;
use crate::models::{AnalyzeRequest, ErrorResponse};
use crate::Error;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use uuid::Uuid;

pub struct AppState {
    pub orchestrator: Orchestrator,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/analyze-skin", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorResponse>)> {
    // A body that doesn't deserialize (e.g. `images` not a list) is the
    // caller's fault and gets the same coherent payload as an empty list.
    let Json(request) = body.map_err(|rejection| {
        error_response(Error::InvalidRequest(format!(
            "Provide array of base64 images in 'images': {}",
            rejection.body_text()
        )))
    })?;

    let request_id = Uuid::new_v4();
    info!(
        "[{}] Analyze request with {} image(s)",
        request_id,
        request.images.len()
    );

    match state.orchestrator.analyze(&request.images).await {
        Ok(result) => {
            info!("[{}] Analysis complete", request_id);
            Ok(Json(result))
        }
        Err(e) => {
            error!("[{}] Analysis failed: {}", request_id, e);
            Err(error_response(e))
        }
    }
}

fn error_response(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            detail: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderFailure;

    #[test]
    fn test_invalid_request_maps_to_400() {
        let (status, body) = error_response(Error::InvalidRequest("empty".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.detail.contains("empty"));
    }

    #[test]
    fn test_all_providers_failed_maps_to_500() {
        let (status, body) = error_response(Error::AllProvidersFailed(vec![ProviderFailure {
            provider: "gemini".to_string(),
            error: "timeout".to_string(),
        }]));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.detail.contains("gemini: timeout"));
    }

    #[test]
    fn test_unexpected_error_maps_to_500() {
        let (status, _) = error_response(Error::Config("boom".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
