//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_llm_response;
use crate::prompt::{PromptBuilder, RESPONSE_SCHEMA};
use librarian_domain::traits::LlmProvider;
use librarian_domain::ClassificationResult;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};

/// The Classifier turns a document excerpt into a validated classification
pub struct Classifier<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ClassifierConfig,
    model_name: String,
}

impl<L> Classifier<L>
where
    L: LlmProvider + Send + Sync + 'static,
    L::Error: std::fmt::Display,
{
    /// Create a new Classifier
    pub fn new(llm_provider: L, config: ClassifierConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
            model_name: "llm".to_string(),
        }
    }

    /// Create a new Classifier with a specific model name (used in logs)
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Name of the model behind this classifier
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a document excerpt
    ///
    /// Text longer than `max_text_length` characters is truncated before
    /// it is sent. Fails on transport errors, on timeout, and on any
    /// response that does not parse into a valid classification.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        self.config.validate().map_err(ClassifierError::Config)?;

        let start = Instant::now();
        let excerpt = truncate_chars(text, self.config.max_text_length);
        if excerpt.len() < text.len() {
            debug!(
                "Truncated excerpt from {} to {} bytes",
                text.len(),
                excerpt.len()
            );
        }

        let prompt = PromptBuilder::new(excerpt).build();

        debug!("Prompt length: {} chars", prompt.len());

        let llm_response = timeout(self.config.classification_timeout(), self.call_llm(prompt))
            .await
            .map_err(|_| ClassifierError::Timeout(self.config.classification_timeout_secs))??;

        debug!("LLM response length: {} chars", llm_response.len());

        let result = parse_llm_response(&llm_response)?;

        info!(
            model = %self.model_name,
            category = %result.category,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Classified as {}",
            result.destination_path()
        );

        Ok(result)
    }

    /// Call LLM provider
    async fn call_llm(&self, prompt: String) -> Result<String, ClassifierError> {
        let llm = Arc::clone(&self.llm_provider);
        let structured = self.config.structured_output;

        // Call in a blocking context since LlmProvider is not async
        tokio::task::spawn_blocking(move || {
            let response = if structured {
                llm.generate_structured(&prompt, RESPONSE_SCHEMA)
            } else {
                llm.generate(&prompt)
            };
            response.map_err(|e| ClassifierError::Llm(e.to_string()))
        })
        .await
        .map_err(|e| ClassifierError::Llm(format!("Task join error: {}", e)))?
    }
}

/// Longest prefix of `text` with at most `max_chars` characters
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
