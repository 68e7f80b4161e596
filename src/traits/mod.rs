//! Capability traits the pipeline depends on.
//!
//! The pipeline never talks to a concrete provider. It is assembled from
//! two narrow capabilities, both injected by the caller:
//!
//! - [`Searcher`] — an LLM-backed web-search API (answer text plus usage
//!   metadata and citations per query)
//! - [`Completion`] — a plain LLM completion call (prompt in, text out)

pub mod completion;
pub mod search;

pub use completion::Completion;
pub use search::{SearchOutcome, Searcher};
