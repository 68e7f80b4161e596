//! Claim extraction: checkable factual statements from collected content.

use tracing::debug;

use crate::error::Result;
use crate::pipeline::non_empty_lines;
use crate::pipeline::prompts::{excerpt, format_extract_claims_prompt};
use crate::traits::completion::Completion;
use crate::types::subject::Subject;

/// Extract up to `limit` checkable factual claims from `content`.
///
/// Output is parsed by splitting on line breaks and discarding blanks. No
/// semantic validation of claim well-formedness happens here; malformed
/// lines pass through as claims and are handled downstream. Duplicates are
/// tolerated, not collapsed.
pub async fn extract_claims<C>(
    completion: &C,
    subject: &Subject,
    content: &str,
    limit: usize,
    excerpt_budget: usize,
) -> Result<Vec<String>>
where
    C: Completion + ?Sized,
{
    let prompt = format_extract_claims_prompt(subject, excerpt(content, excerpt_budget), limit);
    let raw = completion.complete(&prompt).await?;

    let mut claims = non_empty_lines(&raw);
    claims.truncate(limit);
    debug!(count = claims.len(), "extracted claims");
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCompletion;

    fn subject() -> Subject {
        Subject::new("Acme Corp", "Brazil")
    }

    #[tokio::test]
    async fn test_extracts_bounded_claim_list() {
        let lines: Vec<String> = (0..12).map(|i| format!("claim {i}")).collect();
        let completion = MockCompletion::new().with_default(lines.join("\n"));

        let claims = extract_claims(&completion, &subject(), "content", 10, 6000)
            .await
            .unwrap();

        assert_eq!(claims.len(), 10);
        assert_eq!(claims[0], "claim 0");
    }

    #[tokio::test]
    async fn test_blank_lines_dropped_duplicates_kept() {
        let completion =
            MockCompletion::new().with_default("Acme holds 25% market share\n\nAcme holds 25% market share\n");

        let claims = extract_claims(&completion, &subject(), "content", 10, 6000)
            .await
            .unwrap();

        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0], claims[1]);
    }

    #[test]
    fn test_idempotent_on_identical_input() {
        let completion = MockCompletion::new().with_default("claim a\nclaim b\n");

        let first = tokio_test::block_on(extract_claims(
            &completion,
            &subject(),
            "content",
            10,
            6000,
        ))
        .unwrap();
        let second = tokio_test::block_on(extract_claims(
            &completion,
            &subject(),
            "content",
            10,
            6000,
        ))
        .unwrap();

        assert_eq!(first, second);
    }
}
