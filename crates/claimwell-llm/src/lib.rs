//! Claimwell LLM Provider Layer
//!
//! Implementations of the `LanguageModel` and `DocumentSource` traits from
//! `claimwell-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini REST API integration
//!
//! # Examples
//!
//! ```
//! use claimwell_llm::MockProvider;
//! use claimwell_domain::traits::LanguageModel;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.complete("system", "test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use claimwell_domain::traits::{DocumentSource, LanguageModel};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Placeholder substituted when a document yields no text
pub const NO_TEXT_PLACEHOLDER: &str = "[PDF content could not be extracted]";

/// Errors that can occur during language model operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Required API credential is not configured
    #[error("API key not set: {0}")]
    MissingApiKey(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Errors that can occur while sourcing document text
#[derive(Error, Debug)]
pub enum SourceError {
    /// Document path does not exist
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Document is not a PDF
    #[error("Not a PDF file: {0}")]
    NotAPdf(String),

    /// Failed to read document bytes
    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    /// Underlying model call failed
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Mock provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls, and
/// counts how often each operation was invoked so tests can assert that a
/// fast path never reached the model.
///
/// # Examples
///
/// ```
/// use claimwell_llm::MockProvider;
/// use claimwell_domain::traits::LanguageModel;
///
/// # tokio_test::block_on(async {
/// let mut provider = MockProvider::new("default");
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.complete("sys", "prompt1").await.unwrap(), "response1");
/// assert_eq!(provider.complete("sys", "unknown").await.unwrap(), "default");
/// assert_eq!(provider.call_count(), 2);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    partial_responses: Arc<Mutex<Vec<(String, String)>>>,
    texts: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            partial_responses: Arc::new(Mutex::new(Vec::new())),
            texts: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), response.into());
    }

    /// Add a response for any prompt containing `needle`.
    ///
    /// Checked after exact matches, in insertion order. Useful when the
    /// prompt under test embeds document text the test doesn't want to
    /// reproduce verbatim.
    pub fn add_response_containing(
        &mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) {
        self.partial_responses
            .lock()
            .unwrap()
            .push((needle.into(), response.into()));
    }

    /// Add extracted text for a given file name (matched against the last
    /// path component passed to `extract_text`)
    pub fn add_text(&mut self, filename: impl Into<String>, text: impl Into<String>) {
        self.texts.lock().unwrap().insert(filename.into(), text.into());
    }

    /// Configure an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), "ERROR".to_string());
    }

    /// Number of model calls made so far (completions, structured or not)
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    fn lookup(&self, prompt: &str) -> Result<String, LlmError> {
        *self.call_count.lock().unwrap() += 1;

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(prompt) {
            if response == "ERROR" {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }
        drop(responses);

        let partial_responses = self.partial_responses.lock().unwrap();
        for (needle, response) in partial_responses.iter() {
            if prompt.contains(needle.as_str()) {
                if response == "ERROR" {
                    return Err(LlmError::Other("Mock error".to_string()));
                }
                return Ok(response.clone());
            }
        }
        Ok(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LanguageModel for MockProvider {
    type Error = LlmError;

    async fn complete(&self, _system_prompt: &str, prompt: &str) -> Result<String, Self::Error> {
        self.lookup(prompt)
    }

    async fn complete_structured(
        &self,
        _system_prompt: &str,
        prompt: &str,
    ) -> Result<Value, Self::Error> {
        let response = self.lookup(prompt)?;
        serde_json::from_str(&response)
            .map_err(|e| LlmError::InvalidResponse(format!("Mock response is not JSON: {}", e)))
    }
}

#[async_trait]
impl DocumentSource for MockProvider {
    type Error = SourceError;

    async fn extract_text(&self, path: &Path) -> Result<String, Self::Error> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let texts = self.texts.lock().unwrap();
        if let Some(text) = texts.get(&filename) {
            if text == "ERROR" {
                return Err(SourceError::NotFound(filename));
            }
            return Ok(text.clone());
        }
        Ok(NO_TEXT_PLACEHOLDER.to_string())
    }
}
