//! The research collector - entry point of the library.
//!
//! Sequences the four research phases (initial research, gap-filling,
//! claim validation, synthesis) over caller-supplied search and completion
//! capabilities, accumulating token/cost/citation totals across every
//! search the run makes.
//!
//! Phase tolerance follows one rule: failures that would discard useful
//! partial results are downgraded to recorded fallbacks (a failed research
//! phase yields empty content and the run continues), while failures that
//! would corrupt correctness (missing company, missing focus prompt, a
//! malformed initial query set) propagate to the caller.

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{error, info, warn};

use crate::error::{ResearchError, Result};
use crate::pipeline::batch::execute_batches;
use crate::pipeline::claims::extract_claims;
use crate::pipeline::prompts::{excerpt, format_synthesis_prompt};
use crate::pipeline::queries::{generate_gap_queries, generate_initial_queries};
use crate::pipeline::validator::ClaimValidator;
use crate::traits::{completion::Completion, search::Searcher};
use crate::types::{
    batch::BatchResult,
    config::CollectorConfig,
    report::{ClaimVerdict, FinalReport, PhaseRecord, ResearchAnswer},
    subject::Subject,
    validation::{ValidationResult, HIGH_CONFIDENCE_THRESHOLD, VALIDITY_THRESHOLD},
};

/// Issues a verdict carries in the condensed validation summary.
const SUMMARY_ISSUE_LIMIT: usize = 2;

/// One research request: the subject, a free-form focus prompt, and an
/// optional pre-built query set.
#[derive(Debug, Clone)]
pub struct ResearchRequest {
    /// What to research.
    pub subject: Subject,

    /// The caller's requirement. Drives initial query generation when no
    /// queries are supplied, and the final completion in
    /// [`Collector::answer`].
    pub focus: String,

    /// Pre-built search queries. When absent, a query set is generated
    /// from the focus prompt.
    pub queries: Option<Vec<String>>,
}

impl ResearchRequest {
    /// Create a request that generates its own query set.
    pub fn new(
        company: impl Into<String>,
        country: impl Into<String>,
        focus: impl Into<String>,
    ) -> Self {
        Self {
            subject: Subject::new(company, country),
            focus: focus.into(),
            queries: None,
        }
    }

    /// Supply a pre-built query set, skipping initial generation.
    pub fn with_queries(mut self, queries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.queries = Some(queries.into_iter().map(|q| q.into()).collect());
        self
    }
}

/// Running totals for one collector invocation.
///
/// Owned exclusively by one `collect` call; workers never mutate it. Usage
/// is merged from joined phase results, so concurrent invocations of the
/// collector can't share (or race on) an accumulator.
#[derive(Debug, Default)]
struct SessionTotals {
    tokens: u64,
    cost: f64,
    citations: Vec<String>,
}

impl SessionTotals {
    fn absorb(&mut self, result: &BatchResult) {
        self.tokens += result.total_tokens;
        self.cost += result.total_cost;
        self.citations.extend(result.citations.iter().cloned());
    }
}

/// The research orchestrator.
///
/// Owns its capabilities (explicit dependency injection; the caller
/// assembles the pipeline and controls provider lifetimes).
///
/// # Example
///
/// ```rust,ignore
/// let collector = Collector::new(
///     PerplexitySearcher::new(pplx_key, "sonar-pro"),
///     OpenAiCompletion::new(openai_key, "gpt-4o-mini"),
/// );
///
/// let request = ResearchRequest::new("Acme Corp", "Brazil", "Assess credit risk exposure");
/// let report = collector.collect(&request).await?;
/// println!("quality: {}", report.data_quality_score);
/// ```
pub struct Collector<S: Searcher, C: Completion> {
    searcher: S,
    completion: C,
    config: CollectorConfig,
}

impl<S: Searcher, C: Completion> Collector<S, C> {
    /// Create a collector with default configuration.
    pub fn new(searcher: S, completion: C) -> Self {
        Self {
            searcher,
            completion,
            config: CollectorConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(searcher: S, completion: C, config: CollectorConfig) -> Self {
        Self {
            searcher,
            completion,
            config,
        }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Consume the collector, handing back its capabilities.
    pub fn into_parts(self) -> (S, C) {
        (self.searcher, self.completion)
    }

    /// Run the full research pipeline for one request.
    ///
    /// Phases run strictly sequentially; each consumes the prior phase's
    /// output. A report is always produced once synthesis is reached,
    /// possibly with empty research segments and a zero quality score.
    pub async fn collect(&self, request: &ResearchRequest) -> Result<FinalReport> {
        if request.subject.company.trim().is_empty() {
            return Err(ResearchError::config(
                "company name not found; provide a valid company name",
            ));
        }
        if request.focus.trim().is_empty() {
            return Err(ResearchError::config("required parameter focus is missing"));
        }

        let subject = &request.subject;
        let mut totals = SessionTotals::default();

        // Phase 1: query set (generated unless supplied)
        let queries = match &request.queries {
            Some(queries) if !queries.is_empty() => queries.clone(),
            _ => {
                generate_initial_queries(
                    &self.completion,
                    &subject.company,
                    &request.focus,
                    self.config.initial_query_count,
                )
                .await?
            }
        };
        info!(company = %subject.company, country = %subject.country, queries = queries.len(), "starting research");

        // Phase 2: initial research
        let initial = self.research_phase("initial", subject, queries, &mut totals).await;

        // Phase 3: gap identification
        let gaps = match generate_gap_queries(
            &self.completion,
            subject,
            &initial.content,
            &initial.queries,
            self.config.max_gap_queries,
            self.config.gap_excerpt_budget,
        )
        .await
        {
            Ok(gaps) => gaps,
            Err(err) => {
                warn!(error = %err, "gap identification failed; skipping targeted research");
                Vec::new()
            }
        };

        // Phase 4: targeted research (skipped when no gaps were found)
        let targeted = if gaps.is_empty() {
            PhaseRecord::empty(gaps)
        } else {
            self.research_phase("targeted", subject, gaps, &mut totals).await
        };

        // Phase 5: claim extraction and top-K validation
        let combined = format!("{}\n{}", initial.content, targeted.content);
        let claims = extract_claims(
            &self.completion,
            subject,
            &combined,
            self.config.max_claims,
            self.config.claim_excerpt_budget,
        )
        .await?;

        let validations = self.validate_claims(subject, &claims, &mut totals).await;
        info!(validated = validations.len(), extracted = claims.len(), "claim validation finished");

        // Phase 6: synthesis
        let summary = condense_validations(&validations);
        let synthesis_prompt = format_synthesis_prompt(
            subject,
            &serde_json::to_string_pretty(&summary)?,
            excerpt(&initial.content, self.config.synthesis_excerpt_budget),
            excerpt(&targeted.content, self.config.synthesis_excerpt_budget),
        );
        let synthesis = self.completion.complete(&synthesis_prompt).await?;

        // Phase 7: quality score and confidence partitioning
        let data_quality_score = data_quality_score(&validations);
        let high_confidence_claims = validations
            .iter()
            .filter(|(_, v)| v.confidence_score > HIGH_CONFIDENCE_THRESHOLD)
            .map(|(claim, _)| claim.clone())
            .collect();
        let requires_manual_review = validations
            .iter()
            .filter(|(_, v)| v.confidence_score < VALIDITY_THRESHOLD)
            .map(|(claim, _)| claim.clone())
            .collect();

        Ok(FinalReport {
            synthesis,
            data_quality_score,
            high_confidence_claims,
            requires_manual_review,
            validation_summary: summary,
            initial,
            targeted,
            total_tokens: totals.tokens,
            total_cost: totals.cost,
            citations: totals.citations,
            completed_at: Utc::now(),
        })
    }

    /// Run the full pipeline, then answer the focus prompt over the
    /// collected context with one final completion.
    pub async fn answer(&self, request: &ResearchRequest) -> Result<ResearchAnswer> {
        let report = self.collect(request).await?;

        let context = format!(
            "{}\n{}\nSynthesized context data: {}\nContext data validation summary: {}",
            report.initial.content,
            report.targeted.content,
            report.synthesis,
            serde_json::to_string_pretty(&report.validation_summary)?,
        );
        let prompt = format!("{}\n\nContext:\n{}", request.focus, context);
        let web_response = self.completion.complete(&prompt).await?;

        Ok(ResearchAnswer {
            web_response,
            report,
        })
    }

    /// One batched research phase. A failure is recorded on the phase
    /// record and treated as empty content; the run continues.
    async fn research_phase(
        &self,
        phase: &'static str,
        subject: &Subject,
        queries: Vec<String>,
        totals: &mut SessionTotals,
    ) -> PhaseRecord {
        match execute_batches(&self.searcher, subject, &queries, &self.config.batch).await {
            Ok(result) => {
                totals.absorb(&result);
                info!(phase, tokens = result.total_tokens, "research phase completed");
                PhaseRecord::completed(queries, result.content)
            }
            Err(err) => {
                error!(phase, error = %err, "research phase failed; continuing with empty content");
                PhaseRecord::failed(queries, err.to_string())
            }
        }
    }

    /// Validate the top-K extracted claims, one at a time. A claim whose
    /// validation errors gets a zero-confidence verdict; siblings proceed.
    async fn validate_claims(
        &self,
        subject: &Subject,
        claims: &[String],
        totals: &mut SessionTotals,
    ) -> Vec<(String, ValidationResult)> {
        let validator = ClaimValidator::new(&self.searcher, &self.completion, subject);
        let mut validations = Vec::new();

        for claim in claims.iter().take(self.config.validation_limit) {
            let result = match validator.validate(claim).await {
                Ok(validated) => {
                    totals.absorb(&validated.usage);
                    validated.result
                }
                Err(err) => {
                    error!(claim, error = %err, "claim validation failed");
                    ValidationResult::failed(err.to_string())
                }
            };
            validations.push((claim.clone(), result));
        }
        validations
    }
}

/// Condense full verdicts into the summary mapping, preserving claim order.
fn condense_validations(
    validations: &[(String, ValidationResult)],
) -> IndexMap<String, ClaimVerdict> {
    validations
        .iter()
        .map(|(claim, result)| {
            (
                claim.clone(),
                ClaimVerdict {
                    valid: result.is_valid,
                    confidence: result.confidence_score,
                    issues: result.issues.iter().take(SUMMARY_ISSUE_LIMIT).cloned().collect(),
                },
            )
        })
        .collect()
}

/// Mean validated-claim confidence, rounded to 2 decimals; 0.0 when no
/// claims were validated.
fn data_quality_score(validations: &[(String, ValidationResult)]) -> f64 {
    if validations.is_empty() {
        return 0.0;
    }
    let mean = validations
        .iter()
        .map(|(_, v)| v.confidence_score)
        .sum::<f64>()
        / validations.len() as f64;
    (mean * 100.0).round() / 100.0
}
