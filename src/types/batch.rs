//! Aggregated output of one batched search run.

use serde::{Deserialize, Serialize};

use crate::traits::search::SearchOutcome;

/// Accumulated result of executing a set of queries in batches.
///
/// Content is newline-joined and citations extended in completion order
/// (execution within a batch is concurrent, so completion order is not
/// submission order). Tokens and cost are summed. Duplicate citations are
/// preserved, not collapsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    /// Concatenated answer text from all queries.
    pub content: String,

    /// Total tokens across all queries.
    pub total_tokens: u64,

    /// Total cost across all queries.
    pub total_cost: f64,

    /// All cited URLs, in completion order, duplicates preserved.
    pub citations: Vec<String>,
}

impl BatchResult {
    /// Fold one query's outcome into the running aggregate.
    pub fn absorb(&mut self, outcome: SearchOutcome) {
        self.content.push_str(&outcome.content);
        self.content.push('\n');
        self.total_tokens += outcome.tokens;
        self.total_cost += outcome.cost;
        self.citations.extend(outcome.citations);
    }

    /// Fold another aggregate into this one.
    pub fn merge(&mut self, other: BatchResult) {
        self.content.push_str(&other.content);
        self.total_tokens += other.total_tokens;
        self.total_cost += other.total_cost;
        self.citations.extend(other.citations);
    }

    /// True when nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() && self.citations.is_empty() && self.total_tokens == 0
    }
}
