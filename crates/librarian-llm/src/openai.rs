//! OpenAI-compatible Provider Implementation
//!
//! Talks to any endpoint implementing the `/v1/chat/completions` API
//! (OpenAI itself, or a compatible gateway). Structured generation uses
//! `response_format` with a strict JSON schema so the model cannot return
//! free-form text.

use crate::{block_on, LlmError};
use librarian_domain::traits::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Default number of retry attempts for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const SYSTEM_PROMPT: &str =
    "You are an expert librarian. Respond only with a single JSON object matching the requested schema.";

/// Provider for OpenAI-compatible chat completion APIs
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAiProvider {
    /// Create a provider against the default OpenAI endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            api_key,
            model,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a provider against a specific base URL (e.g. a compatible gateway)
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Authentication("API key is empty".to_string()));
        }
        let model = model.into();
        if model.trim().is_empty() {
            return Err(LlmError::ModelNotAvailable("model name is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Plain chat completion
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(prompt, None).await
    }

    /// Chat completion constrained to `schema` (a JSON schema document)
    pub async fn generate_json(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        let schema: Value = serde_json::from_str(schema)
            .map_err(|e| LlmError::Other(format!("Invalid JSON schema: {}", e)))?;
        self.complete(prompt, Some(response_format(schema))).await
    }

    async fn complete(&self, prompt: &str, response_format: Option<Value>) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: prompt },
            ],
            response_format,
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response.json::<ChatResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return extract_content(parsed);
                    }

                    if status == reqwest::StatusCode::UNAUTHORIZED
                        || status == reqwest::StatusCode::FORBIDDEN
                    {
                        return Err(LlmError::Authentication(format!("HTTP {}", status)));
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(LlmError::RateLimitExceeded);
                    } else if status.is_client_error() {
                        let text = response.text().await.unwrap_or_default();
                        return Err(LlmError::InvalidResponse(format!("HTTP {}: {}", status, text)));
                    } else {
                        let text = response.text().await.unwrap_or_default();
                        last_error = Some(LlmError::Communication(format!("HTTP {}: {}", status, text)));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("Chat completion failed (attempt {}), retrying in {:?}", attempts, delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

fn response_format(schema: Value) -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "document_classification",
            "strict": true,
            "schema": schema,
        }
    })
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| LlmError::InvalidResponse("Response has no choices".to_string()))?;

    if let Some(refusal) = message.refusal {
        return Err(LlmError::InvalidResponse(format!("Model refused: {}", refusal)));
    }

    let content = message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| LlmError::InvalidResponse("Response content is empty".to_string()))?;

    debug!("Chat completion returned {} chars", content.len());
    Ok(content)
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        block_on(self.generate(prompt))?
    }

    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        block_on(self.generate_json(prompt, schema))?
    }
}
