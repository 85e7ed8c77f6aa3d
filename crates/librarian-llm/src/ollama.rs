//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API, for running the
//! classifier against a local model instead of a hosted one.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Configurable endpoint, model and timeout
//! - Retry logic with exponential backoff
//! - JSON mode / schema-constrained output for structured generation
//!
//! # Examples
//!
//! ```no_run
//! use librarian_llm::OllamaProvider;
//!
//! // Create an Ollama provider
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.1").unwrap();
//!
//! // Note: The generate method is async, so you need to use it in an async context
//! // or use the LlmProvider trait's sync wrapper from a blocking thread
//! ```

use crate::{block_on, LlmError};
use librarian_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (120 seconds; local models are slow on long excerpts)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local LLM inference
///
/// This provider communicates with a local Ollama instance to generate text.
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new Ollama provider with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a new Ollama provider with default settings
    ///
    /// Uses `http://localhost:11434` as endpoint and requires a model name.
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text using Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response format is invalid
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.send(prompt, None).await
    }

    /// Generate output constrained to a JSON schema
    ///
    /// Passes the schema as Ollama's `format` field; if the schema is not
    /// valid JSON, falls back to plain JSON mode.
    pub async fn generate_json(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        let format = serde_json::from_str::<serde_json::Value>(schema)
            .unwrap_or_else(|_| serde_json::Value::String("json".to_string()));
        self.send(prompt, Some(format)).await
    }

    async fn send(&self, prompt: &str, format: Option<serde_json::Value>) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format,
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(ollama_response) => {
                                debug!("Ollama returned {} chars", ollama_response.response.len());
                                Ok(ollama_response.response)
                            }
                            Err(e) => Err(LlmError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("Ollama request failed (attempt {}), retrying in {:?}", attempts, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl LlmProviderTrait for OllamaProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(self.generate(prompt))?
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        block_on(self.generate_json(prompt, schema))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3.1").unwrap();
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model(), "llama3.1");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, "mistral");
    }

    #[test]
    fn test_ollama_provider_with_max_retries() {
        let provider = OllamaProvider::new("http://localhost:11434", "llama3.1")
            .unwrap()
            .with_max_retries(5);
        assert_eq!(provider.max_retries, 5);

        let provider = provider.with_max_retries(0);
        assert_eq!(provider.max_retries, 1);
    }

    #[test]
    fn test_request_serialization_omits_empty_format() {
        let body = OllamaGenerateRequest {
            model: "m".to_string(),
            prompt: "p".to_string(),
            stream: false,
            format: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("format").is_none());
        assert_eq!(json["stream"], false);
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_generate_integration() {
        let provider = OllamaProvider::default_endpoint("llama3.1").unwrap();
        let result = provider.generate("Say 'hello' and nothing else").await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Port 1 is never an Ollama instance
        let provider = OllamaProvider::new("http://127.0.0.1:1", "llama3.1")
            .unwrap()
            .with_max_retries(1);

        let result = provider.generate("test").await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }
}
