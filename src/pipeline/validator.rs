//! Per-claim validation: cross-reference analysis plus a temporal
//! consistency check, combined into one confidence score.
//!
//! Each claim moves through a fixed sequence with no retries:
//! cross-check query generation, tolerant parallel search, cross-reference
//! analysis, temporal consistency check, scoring. A completion failure at
//! any step terminates the sequence with a low-confidence result carrying
//! the error text; a structured response that fails to parse is replaced by
//! a neutral fallback and the sequence continues.
//!
//! Search failures here are tolerated per query (a failed cross-check query
//! is dropped from the evidence set). This is the opposite of the batch
//! executor's fail-fast policy, and intentionally so: losing one piece of
//! corroborating evidence shouldn't void a claim, while a broken research
//! batch would silently skew the whole collection.

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::error::Result;
use crate::pipeline::prompts::{
    format_check_queries_prompt, format_cross_reference_prompt, format_temporal_prompt,
};
use crate::pipeline::{json_payload, non_empty_lines};
use crate::traits::{completion::Completion, search::Searcher};
use crate::types::{
    batch::BatchResult,
    subject::Subject,
    validation::{
        CrossReference, TemporalConsistency, ValidationResult, CROSS_REFERENCE_WEIGHT,
        TEMPORAL_WEIGHT,
    },
};

/// Confidence assigned when a validation step fails outright and the
/// sequence short-circuits (low end of the 0.3-0.5 fallback band).
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Most cross-checking queries kept from one generation call.
const MAX_CHECK_QUERIES: usize = 5;

/// Outcome of validating one claim: the verdict plus the search usage the
/// validation itself consumed (merged into the session totals by the
/// collector, after join).
#[derive(Debug)]
pub struct ClaimValidation {
    /// The validated claim.
    pub claim: String,

    /// The verdict.
    pub result: ValidationResult,

    /// Usage accumulated by the validation's own searches. `content` holds
    /// the combined evidence text.
    pub usage: BatchResult,
}

/// Validates claims against fresh cross-checking searches.
pub struct ClaimValidator<'a, S: Searcher + ?Sized, C: Completion + ?Sized> {
    searcher: &'a S,
    completion: &'a C,
    subject: &'a Subject,
}

impl<'a, S, C> ClaimValidator<'a, S, C>
where
    S: Searcher + ?Sized,
    C: Completion + ?Sized,
{
    /// Create a validator for one subject.
    pub fn new(searcher: &'a S, completion: &'a C, subject: &'a Subject) -> Self {
        Self {
            searcher,
            completion,
            subject,
        }
    }

    /// Validate one claim.
    ///
    /// Always reaches a terminal verdict; step failures degrade to the
    /// fallback confidence instead of erroring. The `Result` is for the
    /// caller's per-claim boundary: an `Err` (none produced today) must be
    /// converted into a zero-confidence verdict without touching sibling
    /// claims.
    pub async fn validate(&self, claim: &str) -> Result<ClaimValidation> {
        let mut usage = BatchResult::default();

        // 1. Cross-checking query generation
        let check_queries = match self.generate_check_queries(claim).await {
            Ok(queries) => queries,
            Err(err) => {
                warn!(claim, error = %err, "check-query generation failed; short-circuiting");
                return Ok(self.short_circuit(claim, usage, err.to_string()));
            }
        };

        // 2. Tolerant parallel search
        let evidence = self.search_tolerant(&check_queries, &mut usage).await;

        // 3. Cross-reference analysis
        let cross = match self.cross_reference(claim, &evidence).await {
            Ok(cross) => cross,
            Err(err) => {
                warn!(claim, error = %err, "cross-reference analysis failed; short-circuiting");
                return Ok(self.short_circuit(claim, usage, err.to_string()));
            }
        };

        // 4. Temporal consistency check
        let temporal = match self.temporal_consistency(claim, &mut usage).await {
            Ok(temporal) => temporal,
            Err(err) => {
                warn!(claim, error = %err, "temporal analysis failed; short-circuiting");
                return Ok(self.short_circuit(claim, usage, err.to_string()));
            }
        };

        // 5. Scoring: fixed 70/30 weighting, validity derived from threshold
        let confidence = CROSS_REFERENCE_WEIGHT * cross.confidence
            + TEMPORAL_WEIGHT * temporal.consistency_score;

        let mut issues = cross.contradictory_evidence.clone();
        issues.extend(temporal.consistency_issues);

        debug!(
            claim,
            confidence,
            trend = ?temporal.trend,
            "claim scored"
        );

        Ok(ClaimValidation {
            claim: claim.to_string(),
            result: ValidationResult::scored(
                confidence,
                issues,
                cross.supporting_evidence,
                cross.contradictory_evidence,
            ),
            usage,
        })
    }

    fn short_circuit(&self, claim: &str, usage: BatchResult, error: String) -> ClaimValidation {
        ClaimValidation {
            claim: claim.to_string(),
            result: ValidationResult::short_circuited(FALLBACK_CONFIDENCE, error),
            usage,
        }
    }

    /// One completion call producing 3-5 cross-checking queries. If the
    /// response parses to zero lines, fall back to three fixed templates.
    async fn generate_check_queries(&self, claim: &str) -> Result<Vec<String>> {
        let prompt = format_check_queries_prompt(self.subject, claim);
        let raw = self.completion.complete(&prompt).await?;

        let mut queries = non_empty_lines(&raw);
        queries.truncate(MAX_CHECK_QUERIES);

        if queries.is_empty() {
            queries = self.fallback_check_queries(claim);
        }
        Ok(queries)
    }

    fn fallback_check_queries(&self, claim: &str) -> Vec<String> {
        let Subject { company, country } = self.subject;
        vec![
            format!("Verify this claim: {claim} for {company} in {country}"),
            format!("Find contradictory evidence for: {claim} {company} {country}"),
            format!("Recent updates on: {claim} {company} {country}"),
        ]
    }

    /// Dispatch all queries concurrently, dropping failed ones from the
    /// evidence set. Usage from successful queries accumulates in
    /// completion order.
    async fn search_tolerant(&self, queries: &[String], usage: &mut BatchResult) -> String {
        let mut in_flight: FuturesUnordered<_> = queries
            .iter()
            .map(|query| async move {
                let scoped = self.subject.scope_query(query);
                (query, self.searcher.search(&scoped).await)
            })
            .collect();

        let mut evidence = String::new();
        while let Some((query, outcome)) = in_flight.next().await {
            match outcome {
                Ok(found) => {
                    evidence.push_str(&found.content);
                    evidence.push('\n');
                    usage.absorb(found);
                }
                Err(err) => {
                    warn!(query, error = %err, "cross-check search failed; dropped from evidence");
                }
            }
        }
        evidence
    }

    /// One completion call judging the claim against the combined evidence.
    /// A parse failure substitutes the neutral fallback; it never raises.
    async fn cross_reference(&self, claim: &str, evidence: &str) -> Result<CrossReference> {
        let prompt = format_cross_reference_prompt(claim, evidence);
        let raw = self.completion.complete(&prompt).await?;

        Ok(match serde_json::from_str::<CrossReference>(json_payload(&raw)) {
            Ok(cross) => cross.clamped(),
            Err(err) => {
                warn!(claim, error = %err, "cross-reference response unparseable; using neutral fallback");
                CrossReference::neutral()
            }
        })
    }

    /// Search exactly three period-scoped variants of the claim and ask for
    /// a consistency judgment. Same tolerant-search and parse-fallback
    /// discipline as the cross-reference step.
    async fn temporal_consistency(
        &self,
        claim: &str,
        usage: &mut BatchResult,
    ) -> Result<TemporalConsistency> {
        let windows = self.temporal_windows(claim);
        let evidence = self.search_tolerant(&windows, usage).await;

        let prompt = format_temporal_prompt(claim, &evidence);
        let raw = self.completion.complete(&prompt).await?;

        Ok(
            match serde_json::from_str::<TemporalConsistency>(json_payload(&raw)) {
                Ok(temporal) => temporal.clamped(),
                Err(err) => {
                    warn!(claim, error = %err, "temporal response unparseable; using neutral fallback");
                    TemporalConsistency::neutral()
                }
            },
        )
    }

    fn temporal_windows(&self, claim: &str) -> Vec<String> {
        let Subject { company, country } = self.subject;
        vec![
            format!("{claim} {company} {country} developments in the last 12 months"),
            format!("{claim} {company} {country} status in the previous calendar year"),
            format!("{claim} {company} {country} trend over the past five years"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockCompletion, MockSearcher};
    use crate::traits::search::SearchOutcome;

    fn subject() -> Subject {
        Subject::new("Acme Corp", "Brazil")
    }

    fn cross_reference_json(confidence: f64) -> String {
        format!(
            r#"{{"supporting_evidence": ["filing confirms figure"], "contradictory_evidence": ["blog disputes figure"], "confidence": {confidence}, "reliability": "high", "consistency": "good", "recency": "recent", "authority": "official"}}"#
        )
    }

    fn temporal_json(score: f64) -> String {
        format!(
            r#"{{"consistency_score": {score}, "trend": "stable", "recent_changes": [], "consistency_issues": ["older filings differ"]}}"#
        )
    }

    /// Completion scripted for a full validation pass.
    fn scripted_completion(cross_confidence: f64, temporal_score: f64) -> MockCompletion {
        MockCompletion::new()
            .with_rule("cross-checking search queries", "check query 1\ncheck query 2\ncheck query 3")
            .with_rule("supports or contradicts", cross_reference_json(cross_confidence))
            .with_rule("temporal consistency", temporal_json(temporal_score))
    }

    #[tokio::test]
    async fn test_weighted_scoring() {
        let searcher = MockSearcher::new();
        let completion = scripted_completion(0.8, 0.4);
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        let validated = validator
            .validate("Acme derives 25% of revenue from Brazil")
            .await
            .unwrap();

        // 0.7 * 0.8 + 0.3 * 0.4 = 0.68
        assert!((validated.result.confidence_score - 0.68).abs() < 1e-9);
        assert!(validated.result.is_valid);
        assert_eq!(
            validated.result.supporting_sources,
            vec!["filing confirms figure"]
        );
        // issues = contradictory evidence + temporal consistency issues
        assert_eq!(
            validated.result.issues,
            vec!["blog disputes figure", "older filings differ"]
        );
    }

    #[tokio::test]
    async fn test_cross_reference_parse_failure_is_neutral() {
        let searcher = MockSearcher::new();
        let completion = MockCompletion::new()
            .with_rule("cross-checking search queries", "check query 1")
            .with_rule("supports or contradicts", "the evidence is mixed, honestly")
            .with_rule("temporal consistency", temporal_json(0.5));
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        let validated = validator.validate("some claim").await.unwrap();

        // 0.7 * 0.5 + 0.3 * 0.5 = 0.5, with empty evidence lists
        assert!((validated.result.confidence_score - 0.5).abs() < 1e-9);
        assert!(!validated.result.is_valid);
        assert!(validated.result.supporting_sources.is_empty());
        assert!(validated.result.contradictory_sources.is_empty());
    }

    #[tokio::test]
    async fn test_failed_search_dropped_from_evidence_not_fatal() {
        let searcher = MockSearcher::new()
            .with_failure("check query 2")
            .with_default(
                SearchOutcome::new("evidence")
                    .with_tokens(10)
                    .with_citation("https://source.example"),
            );
        let completion = scripted_completion(0.9, 0.9);
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        let validated = validator.validate("some claim").await.unwrap();

        assert!(validated.result.is_valid);
        // 3 check queries (1 failed) + 3 temporal windows = 5 successes
        assert_eq!(validated.usage.total_tokens, 50);
        assert_eq!(validated.usage.citations.len(), 5);
    }

    #[tokio::test]
    async fn test_completion_failure_short_circuits_with_fallback() {
        let searcher = MockSearcher::new();
        let completion = MockCompletion::new().with_failure("cross-checking search queries");
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        let validated = validator.validate("some claim").await.unwrap();

        assert_eq!(validated.result.confidence_score, FALLBACK_CONFIDENCE);
        assert!(!validated.result.is_valid);
        assert_eq!(validated.result.issues.len(), 1);
        // terminal: no search was attempted after the failed step
        assert_eq!(searcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_check_query_response_uses_fixed_templates() {
        let searcher = MockSearcher::new();
        let completion = MockCompletion::new()
            .with_rule("cross-checking search queries", "\n\n")
            .with_rule("supports or contradicts", cross_reference_json(0.7))
            .with_rule("temporal consistency", temporal_json(0.7));
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        validator.validate("some claim").await.unwrap();

        // 3 fallback check queries + 3 temporal windows
        assert_eq!(searcher.call_count(), 6);
        assert!(searcher
            .calls()
            .iter()
            .any(|call| call.contains("Verify this claim")));
    }

    #[tokio::test]
    async fn test_check_queries_bounded_to_five() {
        let searcher = MockSearcher::new();
        let completion = MockCompletion::new()
            .with_rule(
                "cross-checking search queries",
                "q1\nq2\nq3\nq4\nq5\nq6\nq7",
            )
            .with_rule("supports or contradicts", cross_reference_json(0.7))
            .with_rule("temporal consistency", temporal_json(0.7));
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        validator.validate("some claim").await.unwrap();

        // 5 check queries + 3 temporal windows
        assert_eq!(searcher.call_count(), 8);
    }

    #[tokio::test]
    async fn test_model_confidence_out_of_range_is_clamped() {
        let searcher = MockSearcher::new();
        let completion = scripted_completion(1.8, 1.8);
        let subject = subject();
        let validator = ClaimValidator::new(&searcher, &completion, &subject);

        let validated = validator.validate("some claim").await.unwrap();
        assert_eq!(validated.result.confidence_score, 1.0);
    }
}
