//! Report types produced by the collector.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Record of one research phase (initial or targeted).
///
/// A failed phase keeps its queries and error text but contributes empty
/// content; downstream phases still run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhaseRecord {
    /// Aggregated answer text from this phase.
    pub content: String,

    /// Queries this phase executed (or would have executed).
    pub queries: Vec<String>,

    /// Error marker when the whole phase failed.
    pub error: Option<String>,
}

impl PhaseRecord {
    /// A phase that completed with content.
    pub fn completed(queries: Vec<String>, content: String) -> Self {
        Self {
            content,
            queries,
            error: None,
        }
    }

    /// A phase that was skipped or had nothing to do.
    pub fn empty(queries: Vec<String>) -> Self {
        Self {
            content: String::new(),
            queries,
            error: None,
        }
    }

    /// A phase that failed; content treated as empty, error recorded.
    pub fn failed(queries: Vec<String>, error: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            queries,
            error: Some(error.into()),
        }
    }
}

/// Condensed per-claim verdict carried in the validation summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimVerdict {
    /// Whether the claim passed validation.
    pub valid: bool,

    /// Final confidence in [0, 1].
    pub confidence: f64,

    /// Leading issues (bounded to two for readability).
    pub issues: Vec<String>,
}

/// Terminal artifact of one research run. Not persisted by this crate;
/// persistence, if any, is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalReport {
    /// Narrative synthesis of the validated research.
    pub synthesis: String,

    /// Mean validated-claim confidence, rounded to 2 decimals. 0.0 when no
    /// claims were validated.
    pub data_quality_score: f64,

    /// Claims with confidence strictly above 0.7.
    pub high_confidence_claims: Vec<String>,

    /// Claims with confidence strictly below 0.6. A claim in [0.6, 0.7]
    /// lands in neither list.
    pub requires_manual_review: Vec<String>,

    /// Per-claim verdicts, in claim order.
    pub validation_summary: IndexMap<String, ClaimVerdict>,

    /// Initial research phase record.
    pub initial: PhaseRecord,

    /// Targeted (gap) research phase record.
    pub targeted: PhaseRecord,

    /// Tokens consumed across every search in the run, including those
    /// issued inside claim validation.
    pub total_tokens: u64,

    /// Cost accumulated across every search in the run.
    pub total_cost: f64,

    /// Every citation seen across the run, in accumulation order.
    pub citations: Vec<String>,

    /// When the run finished.
    pub completed_at: DateTime<Utc>,
}

impl FinalReport {
    /// Queries used for the initial research phase.
    pub fn queries_used(&self) -> &[String] {
        &self.initial.queries
    }

    /// Gap queries used for the targeted research phase.
    pub fn gap_queries(&self) -> &[String] {
        &self.targeted.queries
    }
}

/// A final answer produced on top of a full research run: the report plus
/// one completion of the caller's focus prompt over the collected context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchAnswer {
    /// The model's answer to the focus prompt, grounded in the research.
    pub web_response: String,

    /// The underlying research report.
    pub report: FinalReport,
}
