//! Trait definitions for the external collaborators
//!
//! These traits define the boundaries between the claim pipeline and the
//! AI infrastructure. Implementations live in other crates
//! (claimwell-llm); tests substitute deterministic fakes.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// A large-language-model endpoint.
///
/// Implemented by the infrastructure layer (claimwell-llm). Every call is
/// a suspension point; implementations hold no mutable state across calls.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Error type for model operations
    type Error: std::fmt::Display + Send + Sync;

    /// Free-text completion for a prompt under a system instruction
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, Self::Error>;

    /// JSON-constrained completion; the returned value conforms to the
    /// shape demanded by the system instruction, or the call fails
    async fn complete_structured(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<Value, Self::Error>;
}

/// A source of plain text for uploaded claim documents.
///
/// Implemented by the infrastructure layer (claimwell-llm, which delegates
/// PDF understanding to the model). Fails if the path does not exist or is
/// not a PDF; an unreadable-but-valid PDF yields a placeholder string
/// rather than an error.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Error type for text extraction
    type Error: std::fmt::Display + Send + Sync;

    /// Extract all text content from the document at `path`
    async fn extract_text(&self, path: &Path) -> Result<String, Self::Error>;
}
