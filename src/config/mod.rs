//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, LogFormat, LoggingConfig, ProviderKind, ProviderSettings, ServerConfig,
    TriageSettings,
};
