//! Query generation: the initial search set and gap-filling queries.

use serde::Deserialize;
use tracing::debug;

use crate::error::{ResearchError, Result};
use crate::pipeline::prompts::{excerpt, format_gap_queries_prompt, format_initial_queries_prompt};
use crate::pipeline::{json_payload, non_empty_lines};
use crate::traits::completion::Completion;
use crate::types::subject::Subject;

/// Shape of the initial query generation response.
#[derive(Debug, Deserialize)]
struct QuestionSet {
    questions: Vec<String>,
}

/// Generate the initial search query set from a company and a free-form
/// focus prompt.
///
/// The model is instructed to return `{"questions": [...]}` and nothing
/// else. A malformed or empty response surfaces as
/// [`ResearchError::Parse`], never as a silent empty list.
pub async fn generate_initial_queries<C>(
    completion: &C,
    company: &str,
    focus: &str,
    count: usize,
) -> Result<Vec<String>>
where
    C: Completion + ?Sized,
{
    let prompt = format_initial_queries_prompt(company, focus, count);
    let raw = completion.complete(&prompt).await?;

    let parsed: QuestionSet = serde_json::from_str(json_payload(&raw)).map_err(|err| {
        ResearchError::parse(format!("initial query generation returned malformed JSON: {err}"))
    })?;

    let mut questions: Vec<String> = parsed
        .questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if questions.is_empty() {
        return Err(ResearchError::parse(
            "initial query generation returned no questions",
        ));
    }

    questions.truncate(count);
    debug!(count = questions.len(), "generated initial queries");
    Ok(questions)
}

/// Generate gap-filling queries from already-collected content.
///
/// The prompt carries a truncated excerpt of `collected` (character budget,
/// not a summary) plus the prior queries. The response is split into lines,
/// blanks dropped, and bounded by `limit`. Zero usable lines is not an
/// error; the caller skips the gap-research phase.
pub async fn generate_gap_queries<C>(
    completion: &C,
    subject: &Subject,
    collected: &str,
    prior_queries: &[String],
    limit: usize,
    excerpt_budget: usize,
) -> Result<Vec<String>>
where
    C: Completion + ?Sized,
{
    let prompt = format_gap_queries_prompt(
        subject,
        excerpt(collected, excerpt_budget),
        prior_queries,
        limit,
    );
    let raw = completion.complete(&prompt).await?;

    let mut gaps = non_empty_lines(&raw);
    gaps.truncate(limit);
    debug!(count = gaps.len(), "identified gap queries");
    Ok(gaps)
}
