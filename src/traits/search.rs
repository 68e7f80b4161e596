//! Search capability trait.
//!
//! Abstracts over LLM-backed search providers (Perplexity, Tavily, etc.).
//! Each call answers one natural-language query with synthesized text,
//! usage metadata and the list of cited URLs.

use async_trait::async_trait;

use crate::error::Result;

/// Result of a single search call, validated at the capability boundary.
///
/// Internal code never inspects raw provider responses; providers parse
/// their wire format into this shape and fail with a distinguishable
/// [`crate::ResearchError::Search`] on transport or quota errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// Synthesized answer text for the query.
    pub content: String,

    /// Tokens consumed by this call (0 when the provider doesn't report).
    pub tokens: u64,

    /// Monetary cost of this call (0.0 when the provider doesn't report).
    pub cost: f64,

    /// URLs cited by the answer, in the provider's order.
    pub citations: Vec<String>,
}

impl SearchOutcome {
    /// Create an outcome with just answer text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Set the token count.
    pub fn with_tokens(mut self, tokens: u64) -> Self {
        self.tokens = tokens;
        self
    }

    /// Set the cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Add a cited URL.
    pub fn with_citation(mut self, url: impl Into<String>) -> Self {
        self.citations.push(url.into());
        self
    }

    /// Add multiple cited URLs.
    pub fn with_citations(mut self, urls: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.citations.extend(urls.into_iter().map(|u| u.into()));
        self
    }
}

/// Search capability for answering research queries.
///
/// Implementations wrap a specific provider and handle the specifics of
/// request building and response parsing. See [`crate::providers`] for the
/// bundled implementations and [`crate::testing::MockSearcher`] for tests.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Answer one query.
    async fn search(&self, query: &str) -> Result<SearchOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let outcome = SearchOutcome::new("answer")
            .with_tokens(120)
            .with_cost(0.004)
            .with_citation("https://example.com/a")
            .with_citations(["https://example.com/b"]);

        assert_eq!(outcome.content, "answer");
        assert_eq!(outcome.tokens, 120);
        assert_eq!(outcome.citations.len(), 2);
    }
}
