//! Librarian Classifier
//!
//! Turns the leading text of a document into a category, a short
//! description, and a normalized file name, using an LLM.
//!
//! # Architecture
//!
//! ```text
//! Text → PromptBuilder → LLM (blocking worker, timeout) → strict parse → ClassificationResult
//! ```
//!
//! # Key Features
//!
//! - **Decision policy in the prompt**: one of five categories, author/year
//!   rules for the description, naming rules for the file
//! - **Strict parsing**: a response that does not match the expected shape
//!   is an error, never coerced into something plausible
//! - **Bounded latency**: every call runs under a configurable timeout
//!
//! # Example Usage
//!
//! ```no_run
//! use librarian_classifier::{Classifier, ClassifierConfig};
//! use librarian_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{
//!     "docType": "paper",
//!     "description": "A paper by John Doe (2021).",
//!     "newFileName": "2021_doe_example.pdf",
//!     "pathToFile": "./paper/"
//! }"#);
//! let classifier = Classifier::new(llm, ClassifierConfig::default());
//!
//! let result = classifier.classify("Abstract: we study ...").await?;
//! println!("{} -> {}", result.category, result.destination_path());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::Classifier;
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use parser::parse_llm_response;
pub use prompt::{PromptBuilder, RESPONSE_SCHEMA};
