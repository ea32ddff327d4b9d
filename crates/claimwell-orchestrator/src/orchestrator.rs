//! The claim pipeline: classify → extract text → route → validate → decide

use crate::decision;
use crate::error::OrchestratorError;
use claimwell_domain::traits::{DocumentSource, LanguageModel};
use claimwell_domain::{
    ClaimProcessingResponse, Document, ProcessingMetadata, VALIDATION_ISSUES_FOUND,
    VALIDATION_PASSED,
};
use claimwell_extractor::{DocumentClassifier, ExtractorConfig, FieldExtractor};
use claimwell_validator::validate;
use futures_util::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// One uploaded file staged for processing
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Where the staged bytes live (scratch space, discarded after the
    /// request)
    pub path: PathBuf,

    /// The name the caller uploaded the file under; drives classification
    pub filename: String,
}

impl FileEntry {
    /// Create a new file entry
    pub fn new(path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }
}

/// Coordinates the specialized pipeline pieces over one claim.
///
/// Holds the classifier, the field extractor and the document source; the
/// model and source handles are created once and shared read-only across
/// all calls. No state survives a `process_claim` invocation.
pub struct ClaimOrchestrator<L, S>
where
    L: LanguageModel,
    S: DocumentSource,
{
    classifier: DocumentClassifier<L>,
    extractor: FieldExtractor<L>,
    source: Arc<S>,
}

impl<L, S> ClaimOrchestrator<L, S>
where
    L: LanguageModel,
    S: DocumentSource,
{
    /// Create a new orchestrator over the given model and document source
    pub fn new(model: Arc<L>, source: Arc<S>) -> Self {
        Self::with_config(model, source, ExtractorConfig::default())
    }

    /// Create a new orchestrator with an explicit extractor configuration
    pub fn with_config(model: Arc<L>, source: Arc<S>, config: ExtractorConfig) -> Self {
        Self {
            classifier: DocumentClassifier::new(Arc::clone(&model)),
            extractor: FieldExtractor::new(model, config),
            source,
        }
    }

    /// Process one claim end to end.
    ///
    /// Stages run with strict barriers: classification for all files
    /// completes before any text extraction begins, and text extraction
    /// for all files completes before routing. Within the first two
    /// stages the collaborator calls run concurrently, joined by input
    /// index. Field extraction is sequential per document.
    ///
    /// # Errors
    ///
    /// Fails when text extraction fails for any file. Field-extraction
    /// failures do not fail the claim; they surface as sentinel records
    /// that validation flags.
    pub async fn process_claim(
        &self,
        entries: &[FileEntry],
    ) -> Result<ClaimProcessingResponse, OrchestratorError> {
        info!(files = entries.len(), "Starting claim processing");

        // Stage 1: classify every file
        let classifications = join_all(
            entries
                .iter()
                .map(|entry| self.classifier.classify(&entry.filename)),
        )
        .await;
        info!(?classifications, "Classification complete");

        // Stage 2: extract text from every file
        let texts = join_all(entries.iter().map(|entry| self.source.extract_text(&entry.path))).await;
        let mut extracted_texts = Vec::with_capacity(texts.len());
        for (entry, text) in entries.iter().zip(texts) {
            let text = text.map_err(|e| OrchestratorError::TextExtraction {
                filename: entry.filename.clone(),
                message: e.to_string(),
            })?;
            extracted_texts.push(text);
        }
        info!(files = extracted_texts.len(), "Text extraction complete");

        // Stage 3: route each document to its extractor, one at a time
        let mut documents = Vec::with_capacity(entries.len());
        for (index, (entry, doc_type)) in entries.iter().zip(&classifications).enumerate() {
            debug!(
                index = index + 1,
                total = entries.len(),
                filename = %entry.filename,
                %doc_type,
                "Routing document"
            );
            let document = self
                .extractor
                .extract(*doc_type, &extracted_texts[index], &entry.filename)
                .await;
            documents.push(document);
        }
        info!(documents = documents.len(), "Field extraction complete");

        // Stage 4: validate the full document set
        let validation = validate(&documents);
        info!(issues = validation.discrepancies.len(), "Validation complete");

        // Stage 5: decide
        let claim_decision = decision::decide(&documents, &validation);
        info!(status = %claim_decision.status, "Decision made");

        // Stage 6: assemble the response
        let validation_status = if validation.is_consistent() {
            VALIDATION_PASSED
        } else {
            VALIDATION_ISSUES_FOUND
        };
        let processing_metadata = ProcessingMetadata {
            total_files_processed: entries.len(),
            document_types_found: documents.iter().map(Document::doc_type).collect(),
            validation_status: validation_status.to_string(),
        };

        Ok(ClaimProcessingResponse {
            documents,
            validation,
            claim_decision,
            processing_metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimwell_domain::DecisionStatus;
    use claimwell_llm::MockProvider;

    const BILL_JSON: &str = r#"{
        "type": "bill",
        "hospital_name": "City Hospital",
        "total_amount": 150.0,
        "date_of_service": "2024-03-15",
        "patient_name": "Jane Doe",
        "bill_items": null
    }"#;

    fn orchestrator_with(
        provider: MockProvider,
    ) -> ClaimOrchestrator<MockProvider, MockProvider> {
        ClaimOrchestrator::new(Arc::new(provider.clone()), Arc::new(provider))
    }

    #[tokio::test]
    async fn test_single_bill_is_rejected_for_missing_types() {
        let mut provider = MockProvider::default();
        provider.add_text("bill.pdf", "BILL TEXT");
        provider.add_response_containing("BILL TEXT", BILL_JSON);
        let orchestrator = orchestrator_with(provider);

        let entries = vec![FileEntry::new("/tmp/claim/bill.pdf", "bill.pdf")];
        let response = orchestrator.process_claim(&entries).await.unwrap();

        assert_eq!(response.documents.len(), 1);
        assert_eq!(
            response.validation.missing_documents,
            vec![
                claimwell_domain::DocumentType::DischargeSummary,
                claimwell_domain::DocumentType::IdCard
            ]
        );
        assert_eq!(response.claim_decision.status, DecisionStatus::Rejected);
        assert_eq!(response.processing_metadata.total_files_processed, 1);
        assert_eq!(response.processing_metadata.validation_status, "passed");
    }

    #[tokio::test]
    async fn test_text_extraction_failure_is_fatal() {
        let mut provider = MockProvider::default();
        provider.add_text("bill.pdf", "ERROR");
        let orchestrator = orchestrator_with(provider);

        let entries = vec![FileEntry::new("/tmp/claim/bill.pdf", "bill.pdf")];
        let result = orchestrator.process_claim(&entries).await;

        match result {
            Err(OrchestratorError::TextExtraction { filename, .. }) => {
                assert_eq!(filename, "bill.pdf");
            }
            other => panic!("expected text extraction error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_field_extraction_becomes_flagged_sentinel() {
        // no canned structured response: the default mock answer is not
        // bill-shaped JSON, so extraction falls back to the sentinel
        let mut provider = MockProvider::new("not json");
        provider.add_text("bill.pdf", "BILL TEXT");
        let orchestrator = orchestrator_with(provider);

        let entries = vec![FileEntry::new("/tmp/claim/bill.pdf", "bill.pdf")];
        let response = orchestrator.process_claim(&entries).await.unwrap();

        assert_eq!(response.documents.len(), 1);
        match &response.documents[0] {
            Document::Bill(bill) => assert_eq!(bill.total_amount, 0.0),
            other => panic!("expected sentinel bill, got {:?}", other),
        }
        // rule 1 fires before the discrepancy rule: the other two types
        // are missing, so the zero amount shows up in validation only
        assert!(response
            .validation
            .discrepancies
            .contains(&"Invalid bill amount (must be positive)".to_string()));
        assert_eq!(
            response.processing_metadata.validation_status,
            "issues_found"
        );
    }
}
