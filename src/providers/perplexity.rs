//! Perplexity-backed search capability.
//!
//! Each query is one chat completion with web search enabled. The response
//! carries the synthesized answer, token usage, dollar cost and citations,
//! which map directly onto [`SearchOutcome`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ResearchError, Result};
use crate::security::ApiKey;
use crate::traits::search::{SearchOutcome, Searcher};

const PERPLEXITY_ENDPOINT: &str = "https://api.perplexity.ai/chat/completions";

#[derive(Debug, Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    web_search_options: WebSearchOptions<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WebSearchOptions<'a> {
    search_context_size: &'a str,
}

#[derive(Debug, Deserialize)]
struct Response {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u64,
    #[serde(default)]
    cost: Option<Cost>,
}

#[derive(Debug, Deserialize)]
struct Cost {
    #[serde(default)]
    total_cost: f64,
}

/// Search capability backed by the Perplexity API.
pub struct PerplexitySearcher {
    client: reqwest::Client,
    api_key: ApiKey,
    model: String,
    /// Web search context size ("low", "medium" or "high").
    search_context_size: String,
}

impl PerplexitySearcher {
    /// Create a new Perplexity searcher.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: ApiKey::new(api_key),
            model: model.into(),
            search_context_size: "medium".to_string(),
        }
    }

    /// Set the web search context size.
    pub fn with_search_context_size(mut self, size: impl Into<String>) -> Self {
        self.search_context_size = size.into();
        self
    }
}

#[async_trait]
impl Searcher for PerplexitySearcher {
    async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let request = Request {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: query,
            }],
            web_search_options: WebSearchOptions {
                search_context_size: &self.search_context_size,
            },
        };

        let response = self
            .client
            .post(PERPLEXITY_ENDPOINT)
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
                    format!("Perplexity API error: {}", response.status()),
                ),
            ));
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| ResearchError::search(query, e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ResearchError::search(
                    query,
                    std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "Perplexity response contained no choices",
                    ),
                )
            })?;

        let (tokens, cost) = match parsed.usage {
            Some(usage) => (
                usage.total_tokens,
                usage.cost.map(|c| c.total_cost).unwrap_or(0.0),
            ),
            None => (0, 0.0),
        };

        Ok(SearchOutcome {
            content,
            tokens,
            cost,
            citations: parsed.citations,
        })
    }
}
