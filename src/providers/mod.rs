//! Provider implementations of the capability traits.
//!
//! - [`PerplexitySearcher`] - LLM-backed web search with per-call token and
//!   cost reporting (Perplexity chat completions API)
//! - [`TavilySearcher`] - plain web search, cited by result URL (Tavily API)
//! - [`OpenAiCompletion`] - completions against any OpenAI-compatible
//!   chat endpoint

pub mod openai;
pub mod perplexity;
pub mod tavily;

pub use openai::OpenAiCompletion;
pub use perplexity::PerplexitySearcher;
pub use tavily::TavilySearcher;
