//! Completion capability over an OpenAI-compatible chat endpoint.
//!
//! The base URL is overridable, which covers Azure OpenAI and compatible
//! proxies without a separate implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ResearchError, Result};
use crate::security::ApiKey;
use crate::traits::completion::Completion;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Completion capability backed by an OpenAI-compatible API.
pub struct OpenAiCompletion {
    client: reqwest::Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiCompletion {
    /// Create a new completion client.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: ApiKey::new(api_key),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Completion for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = Request {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await
            .map_err(ResearchError::completion)?;

        if !response.status().is_success() {
            return Err(ResearchError::completion(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("completion API error: {}", response.status()),
            )));
        }

        let parsed: Response = response.json().await.map_err(ResearchError::completion)?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ResearchError::completion(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "completion response contained no choices",
                ))
            })
    }
}
