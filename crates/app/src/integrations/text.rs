//! Generative text endpoint used for product recommendations.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Connection details for a `generateContent`-style endpoint.
#[derive(Debug, Clone)]
pub struct TextGeneratorConfig {
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub endpoint: String,

    pub model: String,

    pub api_key: String,
}

#[derive(Debug, Error)]
pub enum TextGeneratorError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from text generator: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send a prompt and return the first candidate's text.
    async fn generate(&self, prompt: String) -> Result<String, TextGeneratorError>;
}

#[derive(Debug, Clone)]
pub struct GenerativeTextClient {
    config: TextGeneratorConfig,
    http: Client,
}

impl GenerativeTextClient {
    #[must_use]
    pub fn new(config: TextGeneratorConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for GenerativeTextClient {
    #[tracing::instrument(name = "text.generate", skip_all, fields(model = %self.config.model), err)]
    async fn generate(&self, prompt: String) -> Result<String, TextGeneratorError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(TextGeneratorError::UnexpectedResponse(format!(
                "generate request failed with status {status}: {text}"
            )));
        }

        let parsed: GenerateResponse = response.json().await?;

        parsed.into_text().ok_or_else(|| {
            TextGeneratorError::UnexpectedResponse("response had no text candidate".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}
