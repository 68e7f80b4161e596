//! Tavily-backed search capability.
//!
//! Tavily returns per-result snippets rather than one synthesized answer,
//! so the outcome joins result contents and cites result URLs. Tavily bills
//! per call, not per token, so token and cost usage report as zero.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ResearchError, Result};
use crate::security::ApiKey;
use crate::traits::search::{SearchOutcome, Searcher};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

#[derive(Debug, Serialize)]
struct Request<'a> {
    query: &'a str,
    search_depth: &'a str,
    max_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_range: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    include_domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Response {
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    url: String,
    #[serde(default)]
    content: Option<String>,
}

/// Search capability backed by the Tavily API.
pub struct TavilySearcher {
    client: reqwest::Client,
    api_key: ApiKey,
    search_depth: String,
    max_results: usize,
    time_range: Option<String>,
    include_domains: Vec<String>,
}

impl TavilySearcher {
    /// Create a new Tavily searcher.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: ApiKey::new(api_key),
            search_depth: "advanced".to_string(),
            max_results: 2,
            time_range: None,
            include_domains: Vec::new(),
        }
    }

    /// Set search depth ("basic" or "advanced").
    pub fn with_search_depth(mut self, depth: impl Into<String>) -> Self {
        self.search_depth = depth.into();
        self
    }

    /// Set the per-query result limit.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Restrict results to a time range (e.g. "year").
    pub fn with_time_range(mut self, range: impl Into<String>) -> Self {
        self.time_range = Some(range.into());
        self
    }

    /// Restrict results to an allow-list of authoritative domains.
    pub fn with_include_domains(
        mut self,
        domains: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.include_domains = domains.into_iter().map(|d| d.into()).collect();
        self
    }
}

#[async_trait]
impl Searcher for TavilySearcher {
    async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let request = Request {
            query,
            search_depth: &self.search_depth,
            max_results: self.max_results,
            time_range: self.time_range.as_deref(),
            include_domains: self.include_domains.clone(),
        };

        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(|e| ResearchError::search(query, e))?;

        if !response.status().is_success() {
            return Err(ResearchError::search(
                query,
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Tavily API error: {}", response.status()),
                ),
            ));
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| ResearchError::search(query, e))?;

        let content = parsed
            .results
            .iter()
            .filter_map(|r| r.content.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        let citations = parsed.results.into_iter().map(|r| r.url).collect();

        Ok(SearchOutcome {
            content,
            tokens: 0,
            cost: 0.0,
            citations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_joins_content_and_cites_urls() {
        let raw = r#"{
            "results": [
                {"url": "https://a.com", "content": "first"},
                {"url": "https://b.com"},
                {"url": "https://c.com", "content": "third"}
            ]
        }"#;

        let parsed: Response = serde_json::from_str(raw).unwrap();
        let content = parsed
            .results
            .iter()
            .filter_map(|r| r.content.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(content, "first\nthird");
        assert_eq!(parsed.results.len(), 3);
    }

    #[test]
    fn test_request_skips_empty_optionals() {
        let request = Request {
            query: "q",
            search_depth: "basic",
            max_results: 2,
            time_range: None,
            include_domains: Vec::new(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("time_range"));
        assert!(!json.contains("include_domains"));
    }
}
