use std::time::Duration;

use serde::Deserialize;

use crate::domain::TemplateKind;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub provider: ProviderSettings,
    pub triage: TriageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which advice backend this deployment talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Watsonx,
    OpenAi,
    Ollama,
    /// Keyword fallback only
    None,
}

impl ProviderKind {
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Ollama => Duration::from_secs(120),
            _ => Duration::from_secs(30),
        }
    }

    pub fn default_template(&self) -> TemplateKind {
        match self {
            Self::Ollama => TemplateKind::MappingTable,
            _ => TemplateKind::Detailed,
        }
    }
}

/// Raw provider settings. The factory turns these into a typed,
/// provider-specific configuration and reports missing credentials.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub stop_sequences: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
    pub iam_url: Option<String>,
    pub api_version: Option<String>,
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| self.kind.default_timeout())
    }

    /// Fill unset fields from the well-known variables each backend documents
    pub fn with_env_fallbacks(self) -> Self {
        self.with_fallbacks(|name| std::env::var(name).ok())
    }

    fn with_fallbacks(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        match self.kind {
            ProviderKind::Watsonx => {
                self.base_url = self.base_url.or_else(|| lookup("IBM_LLM_URL"));
                self.api_key = self.api_key.or_else(|| lookup("IBM_API_KEY"));
                self.project_id = self.project_id.or_else(|| lookup("IBM_PROJECT_ID"));
            }
            ProviderKind::OpenAi => {
                self.base_url = self.base_url.or_else(|| lookup("OPENAI_BASE_URL"));
                self.api_key = self.api_key.or_else(|| lookup("OPENAI_API_KEY"));
            }
            ProviderKind::Ollama => {
                self.base_url = self.base_url.or_else(|| lookup("OLLAMA_HOST"));
            }
            ProviderKind::None => {}
        }

        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TriageSettings {
    /// Built-in prompt style; defaults to the provider's preferred one
    pub template: Option<TemplateKind>,
    /// Inline template text using `${var:question}` and `${var:departments}`
    pub custom_template: Option<String>,
    /// Echo the question back in the response body
    pub echo_question: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: Self = config.try_deserialize()?;
        loaded.provider = loaded.provider.with_env_fallbacks();

        Ok(loaded)
    }

    pub fn template_kind(&self) -> TemplateKind {
        self.triage
            .template
            .unwrap_or_else(|| self.provider.kind.default_template())
    }
}
