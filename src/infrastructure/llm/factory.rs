use std::sync::Arc;

use super::http_client::HttpClient;
use super::ollama::{OllamaConfig, OllamaProvider};
use super::openai::{OpenAiConfig, OpenAiProvider};
use super::watsonx::{WatsonxConfig, WatsonxParameters, WatsonxProvider};
use crate::config::{ProviderKind, ProviderSettings};
use crate::domain::{AdviceProvider, DomainError};

/// Factory for creating advice providers
#[derive(Debug)]
pub struct AdviceProviderFactory;

impl AdviceProviderFactory {
    /// Create the configured provider.
    ///
    /// Missing credentials are reported here, before any network call, so the
    /// caller can run in fallback-only mode.
    pub fn create(settings: &ProviderSettings) -> Result<Arc<dyn AdviceProvider>, DomainError> {
        match settings.kind {
            ProviderKind::Watsonx => {
                let config = Self::watsonx_config(settings)?;
                let client = HttpClient::with_timeout(settings.timeout())?;
                Ok(Arc::new(WatsonxProvider::new(client, config)))
            }

            ProviderKind::OpenAi => {
                let config = Self::openai_config(settings)?;
                let client = HttpClient::with_timeout(settings.timeout())?;
                Ok(Arc::new(OpenAiProvider::new(client, config)))
            }

            ProviderKind::Ollama => {
                let client = HttpClient::with_timeout(settings.timeout())?;
                Ok(Arc::new(OllamaProvider::new(client, Self::ollama_config(settings))))
            }

            ProviderKind::None => Err(DomainError::configuration(
                "No advice provider configured (provider.kind = none)",
            )),
        }
    }

    pub fn watsonx_config(settings: &ProviderSettings) -> Result<WatsonxConfig, DomainError> {
        let base_url = Self::required(&settings.base_url, "base_url (IBM_LLM_URL)")?;
        let api_key = Self::required(&settings.api_key, "api_key (IBM_API_KEY)")?;
        let project_id = Self::required(&settings.project_id, "project_id (IBM_PROJECT_ID)")?;

        let defaults = WatsonxParameters::default();
        let parameters = WatsonxParameters {
            temperature: settings.temperature.unwrap_or(defaults.temperature),
            max_new_tokens: settings.max_tokens.unwrap_or(defaults.max_new_tokens),
            stop_sequences: settings
                .stop_sequences
                .clone()
                .unwrap_or(defaults.stop_sequences.clone()),
            ..defaults
        };

        let mut config = WatsonxConfig::new(base_url, api_key, project_id).with_parameters(parameters);

        if let Some(ref model) = settings.model {
            config = config.with_model(model);
        }

        if let Some(ref version) = settings.api_version {
            config = config.with_api_version(version);
        }

        if let Some(ref iam_url) = settings.iam_url {
            config = config.with_iam_url(iam_url);
        }

        Ok(config)
    }

    pub fn openai_config(settings: &ProviderSettings) -> Result<OpenAiConfig, DomainError> {
        let api_key = Self::required(&settings.api_key, "api_key (OPENAI_API_KEY)")?;
        let mut config = OpenAiConfig::new(api_key);

        if let Some(ref base_url) = settings.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(ref model) = settings.model {
            config = config.with_model(model);
        }

        if let Some(temperature) = settings.temperature {
            config = config.with_temperature(temperature);
        }

        if let Some(max_tokens) = settings.max_tokens {
            config = config.with_max_tokens(max_tokens);
        }

        Ok(config)
    }

    pub fn ollama_config(settings: &ProviderSettings) -> OllamaConfig {
        let mut config = OllamaConfig::default();

        if let Some(ref base_url) = settings.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(ref model) = settings.model {
            config = config.with_model(model);
        }

        config
    }

    fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, DomainError> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DomainError::credential(format!("Missing provider setting: {}", name)))
    }
}
