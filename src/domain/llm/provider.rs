use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::DomainError;

/// Trait for advice providers (watsonx, OpenAI-compatible chat, Ollama)
///
/// Implementations turn a fully built prompt into trimmed advice text. Any
/// failure (credentials, transport, status, payload shape) is reported as an
/// error; callers decide whether to fall back.
#[async_trait]
pub trait AdviceProvider: Send + Sync + Debug {
    /// Produce triage text for the prompt
    async fn advise(&self, prompt: &str) -> Result<String, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Model identifier sent upstream
    fn model(&self) -> &str;
}
