//! The claim decision policy

use claimwell_domain::{ClaimDecision, DecisionStatus, Document, DocumentType, ValidationResult};
use std::collections::HashSet;
use tracing::{info, warn};

/// Maximum number of discrepancies quoted in a pending-review reason
const REASON_DISCREPANCY_LIMIT: usize = 2;

/// Decide a claim from its documents and validation findings.
///
/// Pure function, evaluated as an ordered decision table; the first
/// matching rule wins:
///
/// 1. missing documents → rejected
/// 2. discrepancies → pending review
/// 3. all required types present → approved
/// 4. fallback → rejected ("Incomplete documentation")
///
/// Rule 4 is unreachable when the validation result actually describes
/// `documents` (rule 1 already rejects every incomplete set); it is kept
/// as a defensive branch, and reaching it signals a validator bug.
pub fn decide(documents: &[Document], validation: &ValidationResult) -> ClaimDecision {
    if !validation.missing_documents.is_empty() {
        warn!(missing = ?validation.missing_documents, "Rejecting claim, documents missing");
        let missing: Vec<&str> = validation
            .missing_documents
            .iter()
            .map(DocumentType::as_str)
            .collect();
        return ClaimDecision {
            status: DecisionStatus::Rejected,
            reason: format!("Missing required documents: {}", missing.join(", ")),
            confidence_score: Some(1.0),
        };
    }

    if !validation.discrepancies.is_empty() {
        warn!(discrepancies = ?validation.discrepancies, "Claim needs manual review");
        let preview = validation
            .discrepancies
            .iter()
            .take(REASON_DISCREPANCY_LIMIT)
            .cloned()
            .collect::<Vec<_>>()
            .join("; ");
        return ClaimDecision {
            status: DecisionStatus::PendingReview,
            reason: format!(
                "Data discrepancies found - manual review required: {}",
                preview
            ),
            confidence_score: Some(0.6),
        };
    }

    let present: HashSet<DocumentType> = documents.iter().map(Document::doc_type).collect();
    if DocumentType::REQUIRED
        .iter()
        .all(|doc_type| present.contains(doc_type))
    {
        info!("All required documents present and validated");
        return ClaimDecision {
            status: DecisionStatus::Approved,
            reason: "All required documents present and data is consistent".to_string(),
            confidence_score: Some(0.95),
        };
    }

    warn!("Incomplete documentation reached the decision fallback");
    ClaimDecision {
        status: DecisionStatus::Rejected,
        reason: "Incomplete documentation".to_string(),
        confidence_score: Some(0.8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claimwell_domain::{BillDocument, DischargeSummaryDocument, IdCardDocument};

    fn full_document_set() -> Vec<Document> {
        vec![
            Document::Bill(BillDocument {
                hospital_name: "City Hospital".to_string(),
                total_amount: 150.0,
                date_of_service: "2024-03-15".to_string(),
                patient_name: Some("Jane Doe".to_string()),
                bill_items: None,
            }),
            Document::DischargeSummary(DischargeSummaryDocument {
                patient_name: "Jane Doe".to_string(),
                diagnosis: "Pneumonia".to_string(),
                admission_date: "2024-03-10".to_string(),
                discharge_date: "2024-03-15".to_string(),
                treating_doctor: None,
                procedures: None,
            }),
            Document::IdCard(IdCardDocument {
                patient_name: "Jane Doe".to_string(),
                policy_number: "POL123".to_string(),
                member_id: "MEM456".to_string(),
                insurance_provider: None,
            }),
        ]
    }

    #[test]
    fn test_missing_documents_reject() {
        let validation = ValidationResult {
            missing_documents: vec![DocumentType::DischargeSummary, DocumentType::IdCard],
            discrepancies: vec![],
        };
        let decision = decide(&full_document_set()[..1], &validation);

        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(
            decision.reason,
            "Missing required documents: discharge_summary, id_card"
        );
        assert_eq!(decision.confidence_score, Some(1.0));
    }

    #[test]
    fn test_missing_wins_over_discrepancies() {
        let validation = ValidationResult {
            missing_documents: vec![DocumentType::IdCard],
            discrepancies: vec!["Invalid bill amount (must be positive)".to_string()],
        };
        let decision = decide(&full_document_set()[..2], &validation);
        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(decision.confidence_score, Some(1.0));
    }

    #[test]
    fn test_discrepancies_pend_review() {
        let validation = ValidationResult {
            missing_documents: vec![],
            discrepancies: vec!["Patient name mismatch across documents".to_string()],
        };
        let decision = decide(&full_document_set(), &validation);

        assert_eq!(decision.status, DecisionStatus::PendingReview);
        assert!(decision
            .reason
            .contains("Patient name mismatch across documents"));
        assert_eq!(decision.confidence_score, Some(0.6));
    }

    #[test]
    fn test_review_reason_quotes_at_most_two_discrepancies() {
        let validation = ValidationResult {
            missing_documents: vec![],
            discrepancies: vec![
                "Patient name mismatch across documents".to_string(),
                "Invalid bill amount (must be positive)".to_string(),
                "Missing or invalid policy number".to_string(),
            ],
        };
        let decision = decide(&full_document_set(), &validation);

        assert!(decision.reason.contains("Patient name mismatch across documents"));
        assert!(decision.reason.contains("Invalid bill amount (must be positive)"));
        assert!(!decision.reason.contains("Missing or invalid policy number"));
    }

    #[test]
    fn test_clean_complete_set_approves() {
        let decision = decide(&full_document_set(), &ValidationResult::default());

        assert_eq!(decision.status, DecisionStatus::Approved);
        assert_eq!(
            decision.reason,
            "All required documents present and data is consistent"
        );
        assert_eq!(decision.confidence_score, Some(0.95));
    }

    #[test]
    fn test_defensive_fallback() {
        // a clean validation result paired with an incomplete document set
        // cannot come out of the validator; the table still answers
        let decision = decide(&full_document_set()[..1], &ValidationResult::default());

        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(decision.reason, "Incomplete documentation");
        assert_eq!(decision.confidence_score, Some(0.8));
    }

    #[test]
    fn test_decide_is_pure() {
        let documents = full_document_set();
        let validation = ValidationResult {
            missing_documents: vec![],
            discrepancies: vec!["Missing or invalid member ID".to_string()],
        };
        assert_eq!(decide(&documents, &validation), decide(&documents, &validation));
    }
}
