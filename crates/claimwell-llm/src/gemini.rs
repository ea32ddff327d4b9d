//! Gemini Provider Implementation
//!
//! Integration with the Google Gemini `generateContent` REST API. One
//! provider instance serves all three collaborator operations: free-text
//! completion, JSON-constrained structured output, and PDF text
//! extraction (the PDF bytes are sent inline and the model does the
//! document understanding).
//!
//! The API key is read from the `GEMINI_API_KEY` environment variable;
//! a missing key is a construction-time error so the service can degrade
//! at startup instead of failing per request.

use crate::{LlmError, SourceError, NO_TEXT_PLACEHOLDER};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use claimwell_domain::traits::{DocumentSource, LanguageModel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for all operations
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Temperature for free-text completions
const COMPLETION_TEMPERATURE: f64 = 0.3;

/// Temperature for structured output and text extraction
const STRUCTURED_TEMPERATURE: f64 = 0.0;

/// Instruction sent alongside PDF bytes for text extraction
const EXTRACT_TEXT_PROMPT: &str =
    "Extract ALL text content from this document. Include names, dates, amounts, diagnoses, etc.";

/// Gemini API provider
///
/// Holds a single `reqwest::Client`, created once and treated as
/// read-only across calls. No retry and no request timeout: each call
/// either succeeds or the caller's fallback logic substitutes a sentinel.
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn pdf(data: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: "application/pdf".to_string(),
                data: BASE64.encode(data),
            }),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new provider with an explicit API key
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingApiKey` when the variable is unset or
    /// empty; callers treat this as a startup failure and degrade.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(API_KEY_VAR.to_string()))?;
        Ok(Self::new(api_key, DEFAULT_MODEL))
    }

    /// Override the API endpoint (for testing against a local stub)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Issue one generateContent call and return the first candidate's text
    async fn generate(
        &self,
        parts: Vec<Part>,
        temperature: f64,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let request_body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: json_mode.then(|| "application/json".to_string()),
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let text: String = body
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::InvalidResponse(
                "Response contained no candidate text".to_string(),
            ));
        }

        debug!(chars = text.len(), "Gemini response received");
        Ok(text)
    }
}

#[async_trait]
impl LanguageModel for GeminiProvider {
    type Error = LlmError;

    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String, Self::Error> {
        let full_prompt = if system_prompt.is_empty() {
            prompt.to_string()
        } else {
            format!("{}\n\n{}", system_prompt, prompt)
        };
        self.generate(vec![Part::text(full_prompt)], COMPLETION_TEMPERATURE, false)
            .await
    }

    async fn complete_structured(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<Value, Self::Error> {
        let full_prompt = format!(
            "{}\n\n{}\n\nIMPORTANT: Return ONLY valid JSON. No markdown.",
            system_prompt, prompt
        );
        let response = self
            .generate(vec![Part::text(full_prompt)], STRUCTURED_TEMPERATURE, true)
            .await?;

        serde_json::from_str(strip_code_fences(&response))
            .map_err(|e| LlmError::InvalidResponse(format!("Invalid JSON from model: {}", e)))
    }
}

/// Strip a markdown code fence, which models sometimes emit despite JSON
/// mode and explicit instructions
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[async_trait]
impl DocumentSource for GeminiProvider {
    type Error = SourceError;

    async fn extract_text(&self, path: &Path) -> Result<String, Self::Error> {
        if !path.exists() {
            return Err(SourceError::NotFound(path.display().to_string()));
        }
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(SourceError::NotAPdf(path.display().to_string()));
        }

        let pdf_data = tokio::fs::read(path).await?;
        debug!(
            file = %path.display(),
            bytes = pdf_data.len(),
            "Extracting text from PDF"
        );

        let text = self
            .generate(
                vec![Part::pdf(&pdf_data), Part::text(EXTRACT_TEXT_PROMPT)],
                STRUCTURED_TEMPERATURE,
                false,
            )
            .await?;

        if text.trim().is_empty() {
            warn!(file = %path.display(), "No text extracted from PDF");
            return Ok(NO_TEXT_PLACEHOLDER.to_string());
        }
        Ok(text)
    }
}
