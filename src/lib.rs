//! MedAssist symptom triage API
//!
//! Turns a free-text symptom description into a short recommendation that
//! names a medical department:
//! - Pluggable advice backends (watsonx, OpenAI-compatible chat, Ollama)
//! - Keyword fallback whenever the backend is missing or failing
//! - Prompt templates with `${var:name}` placeholders

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use domain::{DomainError, PromptBuilder};
use infrastructure::llm::AdviceProviderFactory;
use infrastructure::services::TriageService;
use tracing::{info, warn};

/// Create the application state with default configuration
pub fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default())
}

/// Create the application state from a loaded configuration
pub fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let service = create_triage_service(config)?;
    Ok(AppState::new(service).with_echo_question(config.triage.echo_question))
}

/// Build the orchestrator.
///
/// A provider that cannot be created leaves the service in fallback-only
/// mode; an invalid custom template is a startup error.
pub fn create_triage_service(config: &AppConfig) -> Result<TriageService, DomainError> {
    let prompt = create_prompt_builder(config)?;

    let service = match AdviceProviderFactory::create(&config.provider) {
        Ok(provider) => {
            info!(
                provider = provider.provider_name(),
                model = provider.model(),
                "Advice provider configured"
            );
            TriageService::new(Some(provider), prompt)
        }
        Err(e) => {
            warn!(error = %e, "No advice provider available, answering with keyword fallback only");
            TriageService::fallback_only(prompt)
        }
    };

    Ok(service.with_timeout(config.provider.timeout()))
}

fn create_prompt_builder(config: &AppConfig) -> Result<PromptBuilder, DomainError> {
    match config.triage.custom_template.as_deref() {
        Some(content) if !content.trim().is_empty() => {
            info!("Using custom prompt template");
            PromptBuilder::custom(content)
        }
        _ => Ok(PromptBuilder::new(config.template_kind())),
    }
}
