//! Error types for the extraction layer

use thiserror::Error;

/// Errors that can occur during field extraction
///
/// These never escape the pipeline: the extractor absorbs them into
/// sentinel records. They exist so the absorption site can log what went
/// wrong.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Language model call failed
    #[error("LLM error: {0}")]
    Llm(String),

    /// Model response did not match the expected document shape
    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::InvalidFormat(e.to_string())
    }
}
