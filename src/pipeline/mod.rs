//! The research pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Batched query execution with bounded per-batch fan-out
//! - Initial and gap-filling query generation
//! - Claim extraction from collected content
//! - Per-claim validation (cross-reference + temporal consistency)
//! - Final synthesis and report assembly

pub mod batch;
pub mod claims;
pub mod collector;
pub mod prompts;
pub mod queries;
pub mod validator;

pub use batch::execute_batches;
pub use claims::extract_claims;
pub use collector::{Collector, ResearchRequest};
pub use prompts::{
    excerpt, format_check_queries_prompt, format_cross_reference_prompt,
    format_extract_claims_prompt, format_gap_queries_prompt, format_initial_queries_prompt,
    format_synthesis_prompt, format_temporal_prompt,
};
pub use queries::{generate_gap_queries, generate_initial_queries};
pub use validator::{ClaimValidation, ClaimValidator, FALLBACK_CONFIDENCE};

/// Extract the JSON payload from a model response, tolerating markdown code
/// fences around the object.
pub(crate) fn json_payload(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(fenced) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let fenced = fenced.strip_prefix("json").unwrap_or(fenced);
    fenced.strip_suffix("```").unwrap_or(fenced).trim()
}

/// Split a plain-text model response into trimmed, non-empty lines.
pub(crate) fn non_empty_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_payload_plain() {
        assert_eq!(json_payload(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_json_payload_fenced() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(json_payload(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_json_payload_fenced_without_language() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(json_payload(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_non_empty_lines() {
        let lines = non_empty_lines("first\n\n  second  \n");
        assert_eq!(lines, vec!["first", "second"]);
    }
}
