//! LLM prompts for the research pipeline.
//!
//! Prompts that expect structured output state the exact JSON shape and ask
//! for nothing else; the paired parse sites in `queries` and `validator`
//! own the fallback behavior when the model ignores that.

use crate::types::subject::Subject;

/// Prompt for generating the initial search query set.
pub const INITIAL_QUERIES_PROMPT: &str = r#"Based on the following company name and user requirements, generate {count} specific, targeted search questions that would help gather comprehensive information to answer the user's requirements.

Company Name: {company}

User Requirements/Focus Area:
{focus}

Make the questions:
1. Specific to the company name provided
2. Relevant to the user's requirements
3. Suitable for web search engines
4. Cover different angles and perspectives
5. Include both general and specific queries
6. Mix of company-specific and industry/regulatory queries

Return the data in this exact JSON format and DO NOT include any other text:
{
    "questions": [
        "Question 1",
        "Question 2",
        ...
    ]
}"#;

/// Prompt for identifying gaps in collected research data.
pub const GAP_QUERIES_PROMPT: &str = r#"Analyze the research data below and identify specific gaps that need additional investigation for {company} in {country}.

CURRENT DATA:
{collected}

QUERIES USED:
{prior_queries}

Identify up to {limit} specific additional search queries needed to fill critical gaps.

Focus on:
1. Missing quantitative data (percentages, ratings, scores)
2. Recent developments or changes
3. Comparative analysis with competitors
4. Regulatory or policy specifics
5. Whether the collected data is accurate

Return only the search queries, one per line."#;

/// Prompt for extracting checkable factual claims.
pub const EXTRACT_CLAIMS_PROMPT: &str = r#"Extract up to {limit} specific, factual claims about {company} in {country} that need to be validated.

CONTENT TO ANALYZE:
{content}

Return specific claims like:
- "Company {company} derives 25% of revenue from {country}"
- "{country} has a credit rating of BBB+ from S&P"

Focus on:
1. Numerical/quantitative claims
2. Credit ratings and scores
3. Revenue/financial exposure percentages
4. Regulatory status claims
5. Risk assessment conclusions

Return only the claims, one per line."#;

/// Prompt for generating cross-checking queries for one claim.
pub const CHECK_QUERIES_PROMPT: &str = r#"Generate 3 to 5 cross-checking search queries to verify this claim about {company} in {country}:

CLAIM: {claim}

The queries must cover:
1. Evidence supporting the claim
2. Evidence contradicting the claim
3. Recent developments relevant to the claim
4. Authoritative-source verification (regulators, ratings agencies, official filings)

Return only the search queries, one per line."#;

/// Prompt for the cross-reference analysis of one claim.
pub const CROSS_REFERENCE_PROMPT: &str = r#"Analyze whether the evidence below supports or contradicts this claim: "{claim}"

EVIDENCE:
{evidence}

Return the data in this exact JSON format and DO NOT include any other text:
{
    "supporting_evidence": ["evidence excerpts that support the claim"],
    "contradictory_evidence": ["evidence excerpts that contradict the claim"],
    "confidence": 0.0,
    "reliability": "assessment of source reliability",
    "consistency": "assessment of consistency across sources",
    "recency": "assessment of how recent the evidence is",
    "authority": "assessment of source authority"
}

"confidence" is a number between 0.0 and 1.0 measuring how well the evidence supports the claim."#;

/// Prompt for the temporal consistency analysis of one claim.
pub const TEMPORAL_PROMPT: &str = r#"Assess the temporal consistency of this claim given evidence gathered across different time windows: "{claim}"

EVIDENCE:
{evidence}

Return the data in this exact JSON format and DO NOT include any other text:
{
    "consistency_score": 0.0,
    "trend": "improving|declining|stable|volatile|unknown",
    "recent_changes": ["notable recent changes"],
    "consistency_issues": ["inconsistencies across time windows"]
}

"consistency_score" is a number between 0.0 and 1.0 measuring agreement of the evidence across time windows."#;

/// Prompt for the final synthesis.
pub const SYNTHESIS_PROMPT: &str = r#"Synthesize the validated research data into a comprehensive assessment for {company} in {country}.

VALIDATION RESULTS:
{validation_summary}

ORIGINAL RESEARCH:
{initial}

TARGETED RESEARCH:
{targeted}

Create a comprehensive synthesis that:
1. Prioritizes high-confidence findings (confidence > 0.6)
2. Flags low-confidence areas for manual review
3. Provides an overall assessment
4. Includes a data quality assessment

Structure your response clearly with sections for validated findings, concerns, and recommendations."#;

/// Format the initial query generation prompt.
pub fn format_initial_queries_prompt(company: &str, focus: &str, count: usize) -> String {
    INITIAL_QUERIES_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{company}", company)
        .replace("{focus}", focus)
}

/// Format the gap identification prompt.
pub fn format_gap_queries_prompt(
    subject: &Subject,
    collected: &str,
    prior_queries: &[String],
    limit: usize,
) -> String {
    GAP_QUERIES_PROMPT
        .replace("{company}", &subject.company)
        .replace("{country}", &subject.country)
        .replace("{collected}", collected)
        .replace("{prior_queries}", &prior_queries.join("\n"))
        .replace("{limit}", &limit.to_string())
}

/// Format the claim extraction prompt.
pub fn format_extract_claims_prompt(subject: &Subject, content: &str, limit: usize) -> String {
    EXTRACT_CLAIMS_PROMPT
        .replace("{limit}", &limit.to_string())
        .replace("{company}", &subject.company)
        .replace("{country}", &subject.country)
        .replace("{content}", content)
}

/// Format the cross-check query generation prompt.
pub fn format_check_queries_prompt(subject: &Subject, claim: &str) -> String {
    CHECK_QUERIES_PROMPT
        .replace("{company}", &subject.company)
        .replace("{country}", &subject.country)
        .replace("{claim}", claim)
}

/// Format the cross-reference analysis prompt.
pub fn format_cross_reference_prompt(claim: &str, evidence: &str) -> String {
    CROSS_REFERENCE_PROMPT
        .replace("{claim}", claim)
        .replace("{evidence}", evidence)
}

/// Format the temporal consistency prompt.
pub fn format_temporal_prompt(claim: &str, evidence: &str) -> String {
    TEMPORAL_PROMPT
        .replace("{claim}", claim)
        .replace("{evidence}", evidence)
}

/// Format the synthesis prompt.
pub fn format_synthesis_prompt(
    subject: &Subject,
    validation_summary: &str,
    initial: &str,
    targeted: &str,
) -> String {
    SYNTHESIS_PROMPT
        .replace("{company}", &subject.company)
        .replace("{country}", &subject.country)
        .replace("{validation_summary}", validation_summary)
        .replace("{initial}", initial)
        .replace("{targeted}", targeted)
}

/// Take at most `budget` characters of `text` (truncated, not summarized).
///
/// Character-based so multibyte content can't split a code point.
pub fn excerpt(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_within_budget() {
        assert_eq!(excerpt("short", 100), "short");
    }

    #[test]
    fn test_excerpt_truncates() {
        assert_eq!(excerpt("0123456789", 4), "0123");
    }

    #[test]
    fn test_excerpt_multibyte_safe() {
        let text = "ééééé";
        assert_eq!(excerpt(text, 3), "ééé");
    }

    #[test]
    fn test_format_fills_placeholders() {
        let subject = Subject::new("Acme Corp", "Brazil");
        let prompt = format_gap_queries_prompt(&subject, "data", &["q1".to_string()], 6);
        assert!(prompt.contains("Acme Corp"));
        assert!(prompt.contains("Brazil"));
        assert!(prompt.contains("q1"));
        assert!(!prompt.contains("{company}"));
    }
}
