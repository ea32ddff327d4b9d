//! Parse model output into typed documents

use crate::error::ExtractorError;
use claimwell_domain::{
    BillDocument, DischargeSummaryDocument, Document, DocumentType, IdCardDocument,
};
use serde_json::Value;

/// Parse a structured model response into the document variant matching
/// `doc_type`.
///
/// The payload structs reject missing required fields; a stray `type`
/// discriminant in the value is ignored. The requested type decides the
/// variant: a model that answers with a different `type` tag does not
/// get to reroute the document.
pub(crate) fn parse_document(doc_type: DocumentType, value: Value) -> Result<Document, ExtractorError> {
    if !value.is_object() {
        return Err(ExtractorError::InvalidFormat(
            "Expected a JSON object".to_string(),
        ));
    }

    let document = match doc_type {
        DocumentType::Bill => Document::Bill(serde_json::from_value::<BillDocument>(value)?),
        DocumentType::DischargeSummary => {
            Document::DischargeSummary(serde_json::from_value::<DischargeSummaryDocument>(value)?)
        }
        DocumentType::IdCard => Document::IdCard(serde_json::from_value::<IdCardDocument>(value)?),
    };
    Ok(document)
}
