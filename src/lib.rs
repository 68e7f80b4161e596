//! Iterative Research Orchestration Library
//!
//! Given a company and a country, this library runs batches of web-search
//! queries against an LLM-backed search API, detects gaps in the collected
//! data and fills them with targeted follow-up queries, validates extracted
//! factual claims against fresh cross-checking searches, and synthesizes
//! the result into a single assessed narrative.
//!
//! # Design Philosophy
//!
//! **"Trust, but cross-check"**
//!
//! - Research output is only as good as its weakest claim, so claims get
//!   validated against independent searches, not the text that produced them
//! - Confidence is scored from multiple weighted signals (cross-reference
//!   agreement and temporal consistency), never from a single judgment
//! - Partial failure degrades the report; it doesn't abort the run
//! - Providers are capabilities behind traits; the caller assembles the
//!   pipeline and owns the credentials
//!
//! # Usage
//!
//! ```rust,ignore
//! use research::{Collector, ResearchRequest};
//! use research::providers::{OpenAiCompletion, PerplexitySearcher};
//!
//! let collector = Collector::new(
//!     PerplexitySearcher::new(pplx_key, "sonar-pro"),
//!     OpenAiCompletion::new(openai_key, "gpt-4o-mini"),
//! );
//!
//! let request = ResearchRequest::new("Acme Corp", "Brazil", "Assess credit risk exposure");
//! let report = collector.collect(&request).await?;
//!
//! println!("quality: {}", report.data_quality_score);
//! for claim in &report.requires_manual_review {
//!     println!("review: {claim}");
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability abstractions (Searcher, Completion)
//! - [`types`] - Subjects, batch results, verdicts, reports, configuration
//! - [`pipeline`] - Batched execution, query/gap generation, claim
//!   extraction, validation and the collector
//! - [`providers`] - Perplexity, Tavily and OpenAI-compatible backends
//! - [`security`] - API key handling
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod providers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ResearchError, Result};
pub use traits::{
    completion::Completion,
    search::{SearchOutcome, Searcher},
};
pub use types::{
    batch::BatchResult,
    config::{BatchConfig, CollectorConfig},
    report::{ClaimVerdict, FinalReport, PhaseRecord, ResearchAnswer},
    subject::Subject,
    validation::{
        CrossReference, TemporalConsistency, TrendDirection, ValidationResult,
        CROSS_REFERENCE_WEIGHT, HIGH_CONFIDENCE_THRESHOLD, TEMPORAL_WEIGHT, VALIDITY_THRESHOLD,
    },
};

// Re-export the collector from the pipeline
pub use pipeline::{Collector, ResearchRequest};

// Re-export pipeline components
pub use pipeline::{
    execute_batches, extract_claims, generate_gap_queries, generate_initial_queries,
    ClaimValidation, ClaimValidator, FALLBACK_CONFIDENCE,
};

// Re-export providers
pub use providers::{OpenAiCompletion, PerplexitySearcher, TavilySearcher};

// Re-export testing utilities
pub use testing::{MockCompletion, MockSearcher};
