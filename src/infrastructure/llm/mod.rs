//! Advice provider implementations

mod factory;
mod http_client;
mod ollama;
mod openai;
mod watsonx;

pub use factory::AdviceProviderFactory;
pub use http_client::{HttpClient, HttpClientTrait};
pub use ollama::{extract_answer, OllamaConfig, OllamaProvider};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use watsonx::{WatsonxConfig, WatsonxParameters, WatsonxProvider};
