//! The response envelope assembled after one orchestration run

use crate::decision::ClaimDecision;
use crate::document::{Document, DocumentType};
use crate::validation::ValidationResult;
use serde::{Deserialize, Serialize};

/// Wire tag for a validation pass with no discrepancies
pub const VALIDATION_PASSED: &str = "passed";

/// Wire tag for a validation pass that found discrepancies
pub const VALIDATION_ISSUES_FOUND: &str = "issues_found";

/// Summary counters attached to a processing response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingMetadata {
    /// Number of files in the input batch
    pub total_files_processed: usize,

    /// Type tags of the documents produced, in input order
    pub document_types_found: Vec<DocumentType>,

    /// "passed" when no discrepancies were found, "issues_found" otherwise
    pub validation_status: String,
}

/// Complete result of processing one claim.
///
/// The sole externally visible artifact of an orchestration run; it has
/// no identity across requests and is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimProcessingResponse {
    /// Extracted documents, in input order
    pub documents: Vec<Document>,

    /// Completeness and consistency findings
    pub validation: ValidationResult,

    /// The terminal decision
    pub claim_decision: ClaimDecision,

    /// Summary counters for the run
    pub processing_metadata: ProcessingMetadata,
}
