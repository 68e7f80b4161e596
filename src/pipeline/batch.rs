//! Batched query executor.
//!
//! Runs a set of queries against the search capability in consecutive
//! batches: every query within a batch is dispatched concurrently, the
//! batch is joined before the next one starts, and a fixed delay separates
//! batches. Accumulation follows completion order within a batch and batch
//! order across batches.
//!
//! Failure policy is fail-fast: any single query's failure aborts the whole
//! invocation and no partial result is returned. The per-query-tolerant
//! policy lives in the claim validator, not here.

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::debug;

use crate::error::{ResearchError, Result};
use crate::traits::search::{SearchOutcome, Searcher};
use crate::types::{batch::BatchResult, config::BatchConfig, subject::Subject};

/// Execute `queries` for `subject` in batches of `config.batch_size`.
///
/// Preconditions checked before any network call: a non-empty company name
/// and a non-zero batch size.
pub async fn execute_batches<S>(
    searcher: &S,
    subject: &Subject,
    queries: &[String],
    config: &BatchConfig,
) -> Result<BatchResult>
where
    S: Searcher + ?Sized,
{
    if subject.company.trim().is_empty() {
        return Err(ResearchError::config(
            "company name not found; provide a valid company name",
        ));
    }
    if config.batch_size == 0 {
        return Err(ResearchError::config("batch_size must be greater than zero"));
    }

    let mut combined = BatchResult::default();
    let total_batches = queries.len().div_ceil(config.batch_size);

    for (batch_index, batch) in queries.chunks(config.batch_size).enumerate() {
        debug!(
            batch = batch_index + 1,
            total_batches,
            size = batch.len(),
            "dispatching query batch"
        );

        let mut in_flight: FuturesUnordered<_> = batch
            .iter()
            .map(|query| scoped_search(searcher, subject, query))
            .collect();

        // Join the whole batch; the first failure aborts the invocation and
        // drops the rest of the batch mid-flight.
        while let Some(outcome) = in_flight.next().await {
            combined.absorb(outcome?);
        }

        if batch_index + 1 < total_batches {
            tokio::time::sleep(config.inter_batch_delay).await;
        }
    }

    Ok(combined)
}

/// Run one subject-scoped query, guaranteeing the error names the query.
async fn scoped_search<S>(searcher: &S, subject: &Subject, query: &str) -> Result<SearchOutcome>
where
    S: Searcher + ?Sized,
{
    let scoped = subject.scope_query(query);
    searcher.search(&scoped).await.map_err(|err| match err {
        err @ ResearchError::Search { .. } => err,
        other => ResearchError::search(query, other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSearcher;
    use std::time::Duration;

    fn subject() -> Subject {
        Subject::new("Acme Corp", "Brazil")
    }

    fn queries(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("question {i}")).collect()
    }

    #[tokio::test]
    async fn test_sums_usage_across_all_queries() {
        let searcher = MockSearcher::new().with_default(
            SearchOutcome::new("answer")
                .with_tokens(10)
                .with_cost(0.5)
                .with_citation("https://example.com"),
        );

        let config = BatchConfig::new(2, Duration::ZERO);
        let result = execute_batches(&searcher, &subject(), &queries(5), &config)
            .await
            .unwrap();

        assert_eq!(result.total_tokens, 50);
        assert!((result.total_cost - 2.5).abs() < 1e-9);
        assert_eq!(result.citations.len(), 5);
        assert_eq!(result.content.lines().count(), 5);
        assert_eq!(searcher.call_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_queries_batch_of_two_waits_twice() {
        let searcher = MockSearcher::new();
        let config = BatchConfig::new(2, Duration::from_secs(2));

        let started = tokio::time::Instant::now();
        execute_batches(&searcher, &subject(), &queries(5), &config)
            .await
            .unwrap();

        // 3 batches (2, 2, 1) -> exactly 2 inter-batch delays
        assert_eq!(started.elapsed(), Duration::from_secs(4));
        assert_eq!(searcher.call_count(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_batch_has_no_delay() {
        let searcher = MockSearcher::new();
        let config = BatchConfig::new(2, Duration::from_secs(2));

        let started = tokio::time::Instant::now();
        execute_batches(
            &searcher,
            &subject(),
            &["What is Acme's market share?".to_string()],
            &config,
        )
        .await
        .unwrap();

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(searcher.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_accumulation_follows_completion_order() {
        let searcher = MockSearcher::new()
            .with_response("slow question", SearchOutcome::new("slow answer"))
            .with_latency("slow question", Duration::from_millis(30))
            .with_response("fast question", SearchOutcome::new("fast answer"))
            .with_latency("fast question", Duration::from_millis(10));

        let config = BatchConfig::new(2, Duration::ZERO);
        let result = execute_batches(
            &searcher,
            &subject(),
            &["slow question".to_string(), "fast question".to_string()],
            &config,
        )
        .await
        .unwrap();

        // Submitted slow-first, accumulated fast-first.
        assert_eq!(result.content, "fast answer\nslow answer\n");
    }

    #[tokio::test]
    async fn test_failure_aborts_whole_invocation() {
        let searcher = MockSearcher::new().with_failure("question 1");
        let config = BatchConfig::new(2, Duration::ZERO);

        let err = execute_batches(&searcher, &subject(), &queries(4), &config)
            .await
            .unwrap_err();

        // error names the offending query; no partial result is returned
        assert!(err.to_string().contains("question 1"));
    }

    #[tokio::test]
    async fn test_empty_company_fails_before_any_call() {
        let searcher = MockSearcher::new();
        let config = BatchConfig::default();

        let err = execute_batches(&searcher, &Subject::new("", "Brazil"), &queries(2), &config)
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::Config { .. }));
        assert_eq!(searcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_batch_size_rejected() {
        let searcher = MockSearcher::new();
        let config = BatchConfig::new(0, Duration::ZERO);

        let err = execute_batches(&searcher, &subject(), &queries(2), &config)
            .await
            .unwrap_err();

        assert!(matches!(err, ResearchError::Config { .. }));
        assert_eq!(searcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_queries_are_subject_scoped() {
        let searcher = MockSearcher::new();
        let config = BatchConfig::default();

        execute_batches(&searcher, &subject(), &queries(1), &config)
            .await
            .unwrap();

        let calls = searcher.calls();
        assert!(calls[0].starts_with("For Acme Corp company located in Brazil"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // All-success runs always produce exact sums regardless of how
            // the queries partition into batches.
            #[test]
            fn usage_sums_hold_for_any_partitioning(
                query_count in 1usize..24,
                batch_size in 1usize..8,
                tokens in 1u64..500,
            ) {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                    .unwrap();

                runtime.block_on(async {
                    let searcher = MockSearcher::new()
                        .with_default(SearchOutcome::new("answer").with_tokens(tokens));
                    let config = BatchConfig::new(batch_size, Duration::ZERO);

                    let result =
                        execute_batches(&searcher, &subject(), &queries(query_count), &config)
                            .await
                            .unwrap();

                    prop_assert_eq!(result.total_tokens, tokens * query_count as u64);
                    prop_assert_eq!(result.content.lines().count(), query_count);
                    prop_assert_eq!(searcher.call_count(), query_count);
                    Ok(())
                })?;
            }
        }
    }
}
