//! Orchestrator error types

use thiserror::Error;

/// Errors that abort a claim request.
///
/// Field-extraction failures never appear here; they are absorbed into
/// sentinel records inside the extractor. What remains fatal is the text
/// stage: without document text there is nothing to route.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Text extraction failed for one of the uploaded files
    #[error("Text extraction failed for '{filename}': {message}")]
    TextExtraction {
        /// The file that failed
        filename: String,
        /// Collaborator error description
        message: String,
    },
}
