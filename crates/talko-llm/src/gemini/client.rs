// Gemini client (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::GenerateError;
use crate::gemini::types::{
    default_safety_settings, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, Part,
};
use crate::traits::TextGenerator;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Prompts beyond this length are rejected before any network call.
pub const MAX_PROMPT_CHARS: usize = 8000;

pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    generation_config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: GEMINI_API_BASE.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the endpoint base (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.generation_config.clone(),
            safety_settings: default_safety_settings(),
        }
    }

    async fn send_request(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!(
            "{base}/{model}:generateContent?key={key}",
            base = self.base_url,
            model = self.model,
            key = self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .json(&self.build_request(prompt))
            .send()
            .await
            .map_err(|err| GenerateError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "generateContent failed");
            return Err(match status {
                StatusCode::UNAUTHORIZED => GenerateError::Unauthorized,
                StatusCode::TOO_MANY_REQUESTS => GenerateError::RateLimited,
                StatusCode::FORBIDDEN => GenerateError::Forbidden,
                _ => GenerateError::Upstream(status.as_u16()),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerateError::MalformedResponse(err.to_string()))?;

        parsed.into_text().ok_or(GenerateError::EmptyCompletion)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }
        if prompt.chars().count() > MAX_PROMPT_CHARS {
            return Err(GenerateError::PromptTooLong);
        }

        tracing::debug!(model = %self.model, chars = prompt.len(), "sending generateContent");
        self.send_request(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_prompt_is_rejected_locally() {
        let client = GeminiClient::new("test-key");
        let err = client.generate("   ").await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyPrompt));
    }

    #[tokio::test]
    async fn oversized_prompt_is_rejected_locally() {
        let client = GeminiClient::new("test-key");
        let prompt = "x".repeat(MAX_PROMPT_CHARS + 1);
        let err = client.generate(&prompt).await.unwrap_err();
        assert!(matches!(err, GenerateError::PromptTooLong));
    }

    #[test]
    fn custom_generation_config_flows_into_the_request() {
        let client = GeminiClient::new("test-key").with_generation_config(GenerationConfig {
            temperature: 0.2,
            top_k: 10,
            top_p: 0.5,
            max_output_tokens: 64,
        });
        let json = serde_json::to_value(client.build_request("hi")).unwrap();
        assert_eq!(json["generationConfig"]["topK"], 10);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 64);
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_network_error() {
        // Port 9 (discard) is not listening; reqwest fails to connect.
        let client = GeminiClient::new("test-key").with_base_url("http://127.0.0.1:9/models");
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenerateError::Network(_)));
    }
}
