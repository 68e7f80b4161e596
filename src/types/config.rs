//! Pipeline configuration.

use std::time::Duration;

/// Configuration for the batched query executor.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Queries dispatched concurrently per batch. Must be greater than zero.
    pub batch_size: usize,

    /// Fixed pause between consecutive batches. Courtesy pacing for the
    /// upstream API, not adaptive backoff.
    pub inter_batch_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 2,
            inter_batch_delay: Duration::from_secs(2),
        }
    }
}

impl BatchConfig {
    /// Create a config with the given batch size and delay.
    pub fn new(batch_size: usize, inter_batch_delay: Duration) -> Self {
        Self {
            batch_size,
            inter_batch_delay,
        }
    }
}

/// Configuration for the research collector.
///
/// The claim and validation bounds are deliberately configurable; there is
/// no single correct value and deployments tune them against cost.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Batch executor settings shared by every research phase.
    pub batch: BatchConfig,

    /// Queries requested from initial generation when none are supplied.
    pub initial_query_count: usize,

    /// Upper bound on gap-filling queries per run.
    pub max_gap_queries: usize,

    /// Upper bound on extracted claims.
    pub max_claims: usize,

    /// How many extracted claims get validated (top-K; the remainder are
    /// silently excluded from the validation summary).
    pub validation_limit: usize,

    /// Character budget for the collected-data excerpt in the gap prompt.
    pub gap_excerpt_budget: usize,

    /// Character budget for the content excerpt in the claim prompt.
    pub claim_excerpt_budget: usize,

    /// Character budget for each research excerpt in the synthesis prompt.
    pub synthesis_excerpt_budget: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            batch: BatchConfig::default(),
            initial_query_count: 10,
            max_gap_queries: 6,
            max_claims: 10,
            validation_limit: 10,
            gap_excerpt_budget: 2000,
            claim_excerpt_budget: 6000,
            synthesis_excerpt_budget: 3000,
        }
    }
}

impl CollectorConfig {
    /// Set the batch executor settings.
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Set the claim extraction bound.
    pub fn with_max_claims(mut self, max_claims: usize) -> Self {
        self.max_claims = max_claims;
        self
    }

    /// Set the validation top-K bound.
    pub fn with_validation_limit(mut self, limit: usize) -> Self {
        self.validation_limit = limit;
        self
    }
}
