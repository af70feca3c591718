use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::prompt::Prompt;

// Gemini generateContent request format
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

/// Outcome of a generation call that reached the provider.
///
/// `Empty` means the provider answered but the candidate chain held no
/// usable text. That is a degraded result the relay turns into a fallback
/// reply, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Text(String),
    Empty,
}

impl GenerationResult {
    pub fn into_text_or(self, fallback: &str) -> String {
        match self {
            GenerationResult::Text(text) => text,
            GenerationResult::Empty => fallback.to_string(),
        }
    }
}

// Transport failure, or a body that was not JSON at all. Detail is for
// server-side logs; clients only ever see an opaque 500.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation request failed: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for GenerateError {
    fn from(err: reqwest::Error) -> Self {
        GenerateError::Unavailable(err.to_string())
    }
}

/// Seam between the relay and the provider, so handler tests can substitute
/// a stub for the real HTTP client.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<GenerationResult, GenerateError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        base_url: String,
        model: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            model,
            api_key,
        })
    }
}

#[async_trait]
impl Generator for GeminiClient {
    // Exactly one outbound call, no retries. The provider's HTTP status is
    // not checked: an error body still parses as JSON and yields Empty
    // through extraction.
    async fn generate(&self, prompt: &Prompt) -> Result<GenerationResult, GenerateError> {
        let request = GenerateContentRequest {
            contents: prompt
                .parts
                .iter()
                .map(|text| Content {
                    role: "user",
                    parts: vec![Part { text: text.clone() }],
                })
                .collect(),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let res = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let body: Value = res.json().await?;
        Ok(extract_text(&body))
    }
}

// Total extraction of the first candidate's first part. The provider is
// free to omit candidates, content, parts or text, or to type them
// unexpectedly; every such shape resolves to Empty rather than an error.
pub fn extract_text(body: &Value) -> GenerationResult {
    let text = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str);

    match text {
        Some(text) if !text.is_empty() => GenerationResult::Text(text.to_string()),
        _ => GenerationResult::Empty,
    }
}
