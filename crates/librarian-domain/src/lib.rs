//! Librarian Domain Layer
//!
//! This crate contains the core domain model for Librarian. It has ZERO
//! external dependencies and defines the value objects and trait interfaces
//! that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **ContentHash**: SHA-256 digest of a document's bytes, the deduplication key
//! - **DocumentCategory**: The closed set of categories a document can be filed under
//! - **ClassificationResult**: What the classifier says about a document
//! - **FileRecord**: The persisted outcome of processing one document
//! - **Extraction**: Text pulled from a document, or the reason there is none
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure domain logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod classification;
pub mod extraction;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use category::DocumentCategory;
pub use classification::ClassificationResult;
pub use extraction::Extraction;
pub use record::{ContentHash, FileRecord};
