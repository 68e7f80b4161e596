//! Completion capability trait.
//!
//! A single prompt-in, text-out LLM call. Used for query generation, claim
//! extraction, cross-reference analysis, temporal analysis and synthesis.
//!
//! Call sites that require the response to parse as structured data own
//! their fallback behavior; the trait itself makes no shape guarantees.

use async_trait::async_trait;

use crate::error::Result;

/// LLM completion capability.
#[async_trait]
pub trait Completion: Send + Sync {
    /// Complete one prompt, returning the model's text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
