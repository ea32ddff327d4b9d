//! Validation result produced by the cross-document consistency checks

use crate::document::DocumentType;
use serde::{Deserialize, Serialize};

/// Findings from validating one claim's document set.
///
/// Created once per claim by the validator and read-only afterward.
/// `missing_documents` lists required types absent from the input, in the
/// canonical required-set order; `discrepancies` lists human-readable
/// consistency issues in the fixed rule order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Required document types absent from the input
    #[serde(default)]
    pub missing_documents: Vec<DocumentType>,

    /// Detected inconsistencies among extracted fields
    #[serde(default)]
    pub discrepancies: Vec<String>,
}

impl ValidationResult {
    /// True when every required document type is present
    pub fn is_complete(&self) -> bool {
        self.missing_documents.is_empty()
    }

    /// True when no field-level discrepancies were found
    pub fn is_consistent(&self) -> bool {
        self.discrepancies.is_empty()
    }
}
