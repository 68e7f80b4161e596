//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that drive the pipeline
//! without making real search or LLM calls. Both mocks match rules by
//! substring against the full prompt/query, so tests can key off phase
//! markers (e.g. "CONTENT TO ANALYZE") without reproducing whole prompts.

use std::io;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ResearchError, Result};
use crate::traits::{
    completion::Completion,
    search::{SearchOutcome, Searcher},
};

fn mock_io_error(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, message.to_string())
}

/// A mock search capability with scripted responses.
///
/// Rules are checked in insertion order; the first substring match wins.
/// Unmatched queries get a deterministic canned answer, so most tests only
/// script the queries they care about.
#[derive(Default)]
pub struct MockSearcher {
    rules: RwLock<Vec<(String, SearchOutcome)>>,
    failures: RwLock<Vec<String>>,
    latencies: RwLock<Vec<(String, Duration)>>,
    default_outcome: RwLock<Option<SearchOutcome>>,
    calls: RwLock<Vec<String>>,
}

impl MockSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `outcome` for queries containing `needle`.
    pub fn with_response(self, needle: impl Into<String>, outcome: SearchOutcome) -> Self {
        self.rules.write().unwrap().push((needle.into(), outcome));
        self
    }

    /// Fail queries containing `needle` with a transport-style error.
    pub fn with_failure(self, needle: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(needle.into());
        self
    }

    /// Delay queries containing `needle`, for completion-order tests.
    pub fn with_latency(self, needle: impl Into<String>, latency: Duration) -> Self {
        self.latencies.write().unwrap().push((needle.into(), latency));
        self
    }

    /// Set the outcome returned for unmatched queries.
    pub fn with_default(self, outcome: SearchOutcome) -> Self {
        *self.default_outcome.write().unwrap() = Some(outcome);
        self
    }

    /// Get all queries this mock received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of queries received.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    async fn search(&self, query: &str) -> Result<SearchOutcome> {
        self.calls.write().unwrap().push(query.to_string());

        let latency = self
            .latencies
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| query.contains(needle))
            .map(|(_, latency)| *latency);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let failed = self
            .failures
            .read()
            .unwrap()
            .iter()
            .any(|needle| query.contains(needle));
        if failed {
            return Err(ResearchError::search(
                query,
                mock_io_error("mock search failure"),
            ));
        }

        if let Some((_, outcome)) = self
            .rules
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| query.contains(needle))
        {
            return Ok(outcome.clone());
        }

        if let Some(outcome) = self.default_outcome.read().unwrap().clone() {
            return Ok(outcome);
        }

        Ok(SearchOutcome::new(format!("search result for: {query}")))
    }
}

/// A mock completion capability with prompt-keyed scripted responses.
#[derive(Default)]
pub struct MockCompletion {
    rules: RwLock<Vec<(String, String)>>,
    failures: RwLock<Vec<String>>,
    default_response: RwLock<Option<String>>,
    calls: RwLock<Vec<String>>,
}

impl MockCompletion {
    /// Create a new mock completion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `response` for prompts containing `needle`.
    pub fn with_rule(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.rules
            .write()
            .unwrap()
            .push((needle.into(), response.into()));
        self
    }

    /// Fail prompts containing `needle`.
    pub fn with_failure(self, needle: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(needle.into());
        self
    }

    /// Set the response for unmatched prompts.
    pub fn with_default(self, response: impl Into<String>) -> Self {
        *self.default_response.write().unwrap() = Some(response.into());
        self
    }

    /// Get all prompts this mock received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of prompts received.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Completion for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.write().unwrap().push(prompt.to_string());

        let failed = self
            .failures
            .read()
            .unwrap()
            .iter()
            .any(|needle| prompt.contains(needle));
        if failed {
            return Err(ResearchError::completion(mock_io_error(
                "mock completion failure",
            )));
        }

        if let Some((_, response)) = self
            .rules
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| prompt.contains(needle))
        {
            return Ok(response.clone());
        }

        Ok(self
            .default_response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_default())
    }
}
