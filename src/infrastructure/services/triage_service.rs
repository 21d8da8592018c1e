//! Triage orchestration: validate, prompt, ask the provider, fall back

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{
    validate_question, AdviceProvider, Department, DomainError, KeywordClassifier, PromptBuilder,
    TriageAdvice,
};

/// Bound on a single provider call when none is configured
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Stateless per-request orchestrator.
///
/// Provider failures never surface to the caller: they are logged and
/// answered by the keyword classifier instead.
#[derive(Debug, Clone)]
pub struct TriageService {
    provider: Option<Arc<dyn AdviceProvider>>,
    prompt: PromptBuilder,
    classifier: KeywordClassifier,
    timeout: Duration,
}

impl TriageService {
    pub fn new(provider: Option<Arc<dyn AdviceProvider>>, prompt: PromptBuilder) -> Self {
        Self {
            provider,
            prompt,
            classifier: KeywordClassifier::new(),
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Run without a provider; every answer comes from the keyword table
    pub fn fallback_only(prompt: PromptBuilder) -> Self {
        Self::new(None, prompt)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Name of the configured provider, if any
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.provider_name())
    }

    pub fn model(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.model())
    }

    /// Triage one question.
    ///
    /// Only a blank question is an error; everything else yields an answer.
    pub async fn triage(&self, question: Option<&str>) -> Result<TriageAdvice, DomainError> {
        let question = validate_question(question)?;

        let Some(provider) = self.provider.as_ref() else {
            debug!("No advice provider configured, using keyword fallback");
            return Ok(self.fall_back(question));
        };

        let prompt = self.prompt.build(question)?;
        debug!(
            provider = provider.provider_name(),
            prompt_chars = prompt.len(),
            "Built triage prompt"
        );

        match self.ask(provider.as_ref(), &prompt).await {
            Ok(answer) => {
                let departments = Department::named_in(&answer);
                if departments.is_empty() {
                    debug!("Provider answer has no department line");
                }
                info!(
                    provider = provider.provider_name(),
                    outcome = "provider",
                    departments = ?departments,
                    "Triage answered"
                );
                Ok(TriageAdvice::from_provider(answer))
            }
            Err(e) if e.is_provider_unavailable() => {
                warn!(
                    provider = provider.provider_name(),
                    error = %e,
                    "Advice provider failed, using keyword fallback"
                );
                Ok(self.fall_back(question))
            }
            Err(e) => Err(e),
        }
    }

    async fn ask(&self, provider: &dyn AdviceProvider, prompt: &str) -> Result<String, DomainError> {
        let answer = tokio::time::timeout(self.timeout, provider.advise(prompt))
            .await
            .map_err(|_| DomainError::timeout(provider.provider_name(), self.timeout.as_secs()))??;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(DomainError::provider(
                provider.provider_name(),
                "Provider returned empty advice",
            ));
        }

        Ok(answer.to_string())
    }

    fn fall_back(&self, question: &str) -> TriageAdvice {
        let rule = self.classifier.rule_for(question);
        info!(rule = rule.name, outcome = "fallback", "Triage answered");
        TriageAdvice::from_fallback(rule.response())
    }
}
