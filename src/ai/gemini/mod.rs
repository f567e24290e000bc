pub mod analyze;
pub mod client;
pub mod types;

pub use analyze::GeminiVisionClient;
