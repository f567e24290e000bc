//! The shared analysis prompt.
//!
//! A single constant injected into every adapter's encode step. The providers
//! only return comparable output structure if they all receive byte-identical
//! prompt text, so no adapter owns its own copy.

pub const SKIN_ANALYSIS: &str = include_str!("../data/prompts/skin_analysis.txt");
