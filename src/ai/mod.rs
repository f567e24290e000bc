//! Vision provider integration and failover orchestration.
//!
//! Each provider implements [`VisionService`]: encode the images and the shared
//! prompt into its native request shape, call it, and parse the returned text
//! as JSON. The orchestrator tries providers in priority order and returns the
//! first parsed result.

pub mod data_uri;
pub mod gemini;
pub mod mock;
pub mod openai_compat;
pub mod orchestrator;

pub use gemini::GeminiVisionClient;
pub use mock::MockVisionClient;
pub use openai_compat::OpenAiCompatVisionClient;
pub use orchestrator::Orchestrator;

use crate::Result;
use async_trait::async_trait;

/// A vision-capable LLM provider.
///
/// `images` are caller-supplied data-URI strings; each adapter parses them
/// itself so a malformed image fails that provider's attempt without being
/// globally fatal. The returned value is the model's JSON output, unvalidated
/// beyond being parseable: the schema is produced by the model under prompt
/// instruction, and `{"groups":[]}` is a success.
#[async_trait]
pub trait VisionService: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self, images: &[String]) -> Result<serde_json::Value>;
}
