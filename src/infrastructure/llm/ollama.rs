//! Locally hosted model server (Ollama `/api/generate`)

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use crate::domain::{AdviceProvider, DomainError, ANSWER_MARKER};

const PROVIDER: &str = "ollama";

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

/// Ollama configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

impl OllamaConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Local Ollama advice provider
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    config: OllamaConfig,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C, config: OllamaConfig) -> Self {
        Self { client, config }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base_url)
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, DomainError> {
        let response: GenerateResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        Ok(extract_answer(&response.response))
    }
}

/// Keep only what follows the last answer marker, if the model echoed one
pub fn extract_answer(output: &str) -> String {
    match output.rsplit_once(ANSWER_MARKER) {
        Some((_, answer)) => answer.trim().to_string(),
        None => output.trim().to_string(),
    }
}

#[async_trait]
impl<C: HttpClientTrait> AdviceProvider for OllamaProvider<C> {
    async fn advise(&self, prompt: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .post_json(
                &self.generate_url(),
                vec![("Content-Type", "application/json")],
                &self.build_request(prompt),
            )
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
