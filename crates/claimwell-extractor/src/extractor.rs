//! Core field extractor: one model call per document, sentinel on failure

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::{parser, prompt};
use claimwell_domain::traits::LanguageModel;
use claimwell_domain::{
    BillDocument, DischargeSummaryDocument, Document, DocumentType, IdCardDocument,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The fixed placeholder record produced when extraction fails.
///
/// A malformed or unreadable document still yields a record so downstream
/// validation can flag it (zero amount, UNKNOWN ids) instead of the claim
/// aborting. This is the single authoritative failure-absorption layer of
/// the pipeline.
pub fn sentinel_document(doc_type: DocumentType) -> Document {
    match doc_type {
        DocumentType::Bill => Document::Bill(BillDocument {
            hospital_name: "Unknown Hospital".to_string(),
            total_amount: 0.0,
            date_of_service: "2024-01-01".to_string(),
            patient_name: None,
            bill_items: None,
        }),
        DocumentType::DischargeSummary => Document::DischargeSummary(DischargeSummaryDocument {
            patient_name: "Unknown Patient".to_string(),
            diagnosis: "Unknown".to_string(),
            admission_date: "2024-01-01".to_string(),
            discharge_date: "2024-01-02".to_string(),
            treating_doctor: None,
            procedures: None,
        }),
        DocumentType::IdCard => Document::IdCard(IdCardDocument {
            patient_name: "Unknown".to_string(),
            policy_number: "UNKNOWN".to_string(),
            member_id: "UNKNOWN".to_string(),
            insurance_provider: None,
        }),
    }
}

/// Extracts typed fields from document text via the language model.
///
/// One extractor serves all three document types; the type selects the
/// schema-shaped system prompt and the target variant. Extraction failure
/// is absorbed, never fatal to the pipeline.
pub struct FieldExtractor<L: LanguageModel> {
    model: Arc<L>,
    config: ExtractorConfig,
}

impl<L: LanguageModel> FieldExtractor<L> {
    /// Create a new field extractor
    pub fn new(model: Arc<L>, config: ExtractorConfig) -> Self {
        Self { model, config }
    }

    /// Extract a typed document from `text`.
    ///
    /// Infallible by design: any model or parse failure yields the
    /// sentinel record for `doc_type`.
    pub async fn extract(&self, doc_type: DocumentType, text: &str, filename: &str) -> Document {
        match self.try_extract(doc_type, text).await {
            Ok(document) => {
                info!(%filename, %doc_type, "Extracted document fields");
                document
            }
            Err(e) => {
                warn!(%filename, %doc_type, error = %e, "Extraction failed, using sentinel record");
                sentinel_document(doc_type)
            }
        }
    }

    async fn try_extract(
        &self,
        doc_type: DocumentType,
        text: &str,
    ) -> Result<Document, ExtractorError> {
        let system = prompt::system_prompt(doc_type);
        let user = prompt::user_prompt(doc_type, text, self.config.max_prompt_chars);

        let value = self
            .model
            .complete_structured(system, &user)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        parser::parse_document(doc_type, value)
    }
}
