//! Typed errors for the research pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! The fallback/propagate split is deliberate and narrow:
//! - [`ResearchError::Config`] fails fast, before any network call.
//! - [`ResearchError::Search`] aborts a query batch (fail-fast), but is
//!   absorbed per-query inside claim validation.
//! - [`ResearchError::Parse`] only surfaces from initial query generation;
//!   every other structured-response parse falls back to a documented
//!   neutral value instead of erroring.

use thiserror::Error;

/// Errors that can occur during research operations.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Required input missing or empty (company name, synthesis prompt).
    #[error("config error: {reason}")]
    Config { reason: String },

    /// Search capability failed for a specific query.
    #[error("search failed for query '{query}': {source}")]
    Search {
        query: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion capability unavailable or failed.
    #[error("completion error: {0}")]
    Completion(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Structured completion response did not match the expected shape.
    #[error("unparseable completion response: {reason}")]
    Parse { reason: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResearchError {
    /// Create a configuration error.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a search error naming the offending query.
    pub fn search(
        query: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Search {
            query: query.into(),
            source: source.into(),
        }
    }

    /// Create a completion error.
    pub fn completion(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Completion(source.into())
    }

    /// Create a parse error.
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;
