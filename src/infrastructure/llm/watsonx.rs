//! IBM watsonx.ai text generation with IAM API-key token exchange

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http_client::HttpClientTrait;
use crate::domain::{AdviceProvider, DomainError};

const PROVIDER: &str = "watsonx";

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";
pub const DEFAULT_WATSONX_MODEL: &str = "meta-llama/llama-3-3-70b-instruct";
pub const DEFAULT_WATSONX_API_VERSION: &str = "2024-05-01";

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Decoding parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatsonxParameters {
    pub decoding_method: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub stop_sequences: Vec<String>,
}

impl Default for WatsonxParameters {
    fn default() -> Self {
        Self {
            decoding_method: "greedy".to_string(),
            max_new_tokens: 80,
            temperature: 0.7,
            top_k: 10,
            top_p: 0.9,
            stop_sequences: vec!["Symptom description:".to_string(), "Your answer:".to_string()],
        }
    }
}

/// watsonx.ai configuration
#[derive(Debug, Clone)]
pub struct WatsonxConfig {
    pub base_url: String,
    pub api_key: String,
    pub project_id: String,
    pub model_id: String,
    pub api_version: String,
    pub iam_url: String,
    pub parameters: WatsonxParameters,
}

impl WatsonxConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            project_id: project_id.into(),
            model_id: DEFAULT_WATSONX_MODEL.to_string(),
            api_version: DEFAULT_WATSONX_API_VERSION.to_string(),
            iam_url: DEFAULT_IAM_URL.to_string(),
            parameters: WatsonxParameters::default(),
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_iam_url(mut self, iam_url: impl Into<String>) -> Self {
        self.iam_url = iam_url.into();
        self
    }

    pub fn with_parameters(mut self, parameters: WatsonxParameters) -> Self {
        self.parameters = parameters;
        self
    }
}

/// watsonx.ai advice provider
#[derive(Debug)]
pub struct WatsonxProvider<C: HttpClientTrait> {
    client: C,
    config: WatsonxConfig,
}

impl<C: HttpClientTrait> WatsonxProvider<C> {
    pub fn new(client: C, config: WatsonxConfig) -> Self {
        Self { client, config }
    }

    fn generation_url(&self) -> String {
        format!(
            "{}/ml/v1/text/generation?version={}",
            self.config.base_url, self.config.api_version
        )
    }

    /// Exchange the long-lived API key for a short-lived bearer token
    async fn fetch_token(&self) -> Result<String, DomainError> {
        let json = self
            .client
            .post_form(
                &self.config.iam_url,
                vec![("Accept", "application/json")],
                &[("grant_type", IAM_GRANT_TYPE), ("apikey", self.config.api_key.as_str())],
            )
            .await
            .map_err(|e| DomainError::credential(format!("IAM token exchange failed: {}", e)))?;

        let token: IamTokenResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::credential(format!("IAM token response missing access_token: {}", e))
        })?;

        Ok(token.access_token)
    }

    fn build_request(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model_id": self.config.model_id,
            "project_id": self.config.project_id,
            "input": prompt,
            "parameters": self.config.parameters,
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<String, DomainError> {
        let response: GenerationResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER, format!("Failed to parse response: {}", e))
        })?;

        let text = response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.generated_text)
            .ok_or_else(|| DomainError::provider(PROVIDER, "No generated text in response"))?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl<C: HttpClientTrait> AdviceProvider for WatsonxProvider<C> {
    async fn advise(&self, prompt: &str) -> Result<String, DomainError> {
        let token = self.fetch_token().await?;
        let auth_header = format!("Bearer {}", token);

        debug!(model = %self.config.model_id, "Requesting watsonx text generation");

        let response = self
            .client
            .post_json(
                &self.generation_url(),
                vec![
                    ("Authorization", auth_header.as_str()),
                    ("Content-Type", "application/json"),
                ],
                &self.build_request(prompt),
            )
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.config.model_id
    }
}

// watsonx API types

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    generated_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const BASE_URL: &str = "https://us-south.ml.cloud.ibm.com";
    const GENERATION_URL: &str =
        "https://us-south.ml.cloud.ibm.com/ml/v1/text/generation?version=2024-05-01";

    fn config() -> WatsonxConfig {
        WatsonxConfig::new(format!("{}/", BASE_URL), "api-key", "project-1")
    }

    fn token_response() -> serde_json::Value {
        serde_json::json!({ "access_token": "short-lived", "expires_in": 3600 })
    }

    #[tokio::test]
    async fn test_watsonx_advise() {
        let client = MockHttpClient::new()
            .with_response(DEFAULT_IAM_URL, token_response())
            .with_response(
                GENERATION_URL,
                serde_json::json!({
                    "model_id": DEFAULT_WATSONX_MODEL,
                    "results": [{ "generated_text": "  See a cardiologist.\nDepartment: Cardiology ❤️ \n" }]
                }),
            );

        let provider = WatsonxProvider::new(client, config());
        let advice = provider.advise("prompt text").await.unwrap();

        assert_eq!(advice, "See a cardiologist.\nDepartment: Cardiology ❤️");

        let requests = provider.client.requests();
        assert_eq!(requests.len(), 2);

        let token_request = &requests[0];
        assert_eq!(token_request.url, DEFAULT_IAM_URL);
        assert_eq!(token_request.body["grant_type"], IAM_GRANT_TYPE);
        assert_eq!(token_request.body["apikey"], "api-key");

        let generation = &requests[1];
        assert_eq!(generation.header("authorization"), Some("Bearer short-lived"));
        assert_eq!(generation.body["model_id"], DEFAULT_WATSONX_MODEL);
        assert_eq!(generation.body["project_id"], "project-1");
        assert_eq!(generation.body["input"], "prompt text");
        assert_eq!(generation.body["parameters"]["decoding_method"], "greedy");
        assert_eq!(generation.body["parameters"]["max_new_tokens"], 80);
        assert_eq!(generation.body["parameters"]["top_k"], 10);
        assert_eq!(
            generation.body["parameters"]["stop_sequences"],
            serde_json::json!(["Symptom description:", "Your answer:"])
        );
    }

    #[tokio::test]
    async fn test_token_exchange_failure_is_credential_error() {
        let client = MockHttpClient::new().with_error(DEFAULT_IAM_URL, "HTTP 400: bad apikey");

        let provider = WatsonxProvider::new(client, config());
        let err = provider.advise("prompt").await.unwrap_err();

        assert!(matches!(err, DomainError::Credential { .. }));
        assert!(err.is_provider_unavailable());
        // no generation call after a failed exchange
        assert_eq!(provider.client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_token_response_without_access_token() {
        let client = MockHttpClient::new()
            .with_response(DEFAULT_IAM_URL, serde_json::json!({ "errorCode": "BXNIM0415E" }));

        let provider = WatsonxProvider::new(client, config());
        let err = provider.advise("prompt").await.unwrap_err();

        assert!(matches!(err, DomainError::Credential { .. }));
    }

    #[tokio::test]
    async fn test_empty_results_is_provider_error() {
        let client = MockHttpClient::new()
            .with_response(DEFAULT_IAM_URL, token_response())
            .with_response(GENERATION_URL, serde_json::json!({ "results": [] }));

        let provider = WatsonxProvider::new(client, config());
        let err = provider.advise("prompt").await.unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_custom_iam_url_and_model() {
        let iam = "http://localhost:9000/token";
        let client = MockHttpClient::new()
            .with_response(iam, token_response())
            .with_response(
                "http://localhost:9001/ml/v1/text/generation?version=2023-05-29",
                serde_json::json!({ "results": [{ "generated_text": "ok" }] }),
            );

        let config = WatsonxConfig::new("http://localhost:9001", "k", "p")
            .with_iam_url(iam)
            .with_api_version("2023-05-29")
            .with_model("ibm/granite-13b-chat-v2");
        let provider = WatsonxProvider::new(client, config);

        assert_eq!(provider.advise("prompt").await.unwrap(), "ok");
        assert_eq!(provider.model(), "ibm/granite-13b-chat-v2");
    }
}
