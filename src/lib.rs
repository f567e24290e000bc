//! Backend for the skin analyzer - forwards facial images to hosted
//! vision-capable LLM providers and returns the first structured analysis.
//!
//! Providers (Gemini, OpenRouter, Groq) are tried in a fixed priority order
//! with a shared dermatology prompt; each adapter normalizes its provider's
//! wire shape and the orchestrator fails over until one returns valid JSON.

pub mod ai;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};
