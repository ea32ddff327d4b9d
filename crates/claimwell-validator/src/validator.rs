//! The fixed battery of cross-document checks

use chrono::NaiveDate;
use claimwell_domain::{Document, DocumentType, ValidationResult};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Invalid-field sentinel substituted by failed ID card extraction
const UNKNOWN_SENTINEL: &str = "UNKNOWN";

/// Date format used throughout the claim documents
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate one claim's document set for completeness and consistency.
///
/// Pure and deterministic: the same documents always produce the same
/// result. Missing types are reported in the canonical required-set
/// order; discrepancies in the fixed rule order (names, dates, bill
/// amount, ID card fields).
pub fn validate(documents: &[Document]) -> ValidationResult {
    let missing_documents = check_completeness(documents);
    if !missing_documents.is_empty() {
        warn!(?missing_documents, "Missing required documents");
    }

    let mut discrepancies = Vec::new();
    check_name_consistency(documents, &mut discrepancies);
    check_date_ordering(documents, &mut discrepancies);
    check_bill_amount(documents, &mut discrepancies);
    check_id_card(documents, &mut discrepancies);

    info!(issues = discrepancies.len(), "Validation complete");

    ValidationResult {
        missing_documents,
        discrepancies,
    }
}

/// Required type set minus the types present, in required-set order
fn check_completeness(documents: &[Document]) -> Vec<DocumentType> {
    let present: HashSet<DocumentType> = documents.iter().map(Document::doc_type).collect();
    DocumentType::REQUIRED
        .into_iter()
        .filter(|doc_type| !present.contains(doc_type))
        .collect()
}

/// More than one distinct normalized patient name is a mismatch
fn check_name_consistency(documents: &[Document], discrepancies: &mut Vec<String>) {
    let names: Vec<String> = documents
        .iter()
        .filter_map(Document::patient_name)
        .map(|name| name.to_lowercase().trim().to_string())
        .collect();

    if names.len() > 1 {
        let unique: HashSet<&String> = names.iter().collect();
        if unique.len() > 1 {
            warn!("Patient name mismatch detected");
            discrepancies.push("Patient name mismatch across documents".to_string());
        }
    }
}

/// Discharge before admission is a discrepancy; unparseable dates are
/// silently skipped
fn check_date_ordering(documents: &[Document], discrepancies: &mut Vec<String>) {
    let summary = documents.iter().find_map(|doc| match doc {
        Document::DischargeSummary(summary) => Some(summary),
        _ => None,
    });
    let Some(summary) = summary else {
        return;
    };

    let admission = NaiveDate::parse_from_str(&summary.admission_date, DATE_FORMAT);
    let discharge = NaiveDate::parse_from_str(&summary.discharge_date, DATE_FORMAT);
    match (admission, discharge) {
        (Ok(admission), Ok(discharge)) => {
            if discharge < admission {
                warn!("Discharge date precedes admission date");
                discrepancies.push("Discharge date is before admission date".to_string());
            }
        }
        _ => debug!(
            admission = %summary.admission_date,
            discharge = %summary.discharge_date,
            "Skipping date check, dates did not parse"
        ),
    }
}

/// A bill must carry a positive amount
fn check_bill_amount(documents: &[Document], discrepancies: &mut Vec<String>) {
    let bill = documents.iter().find_map(|doc| match doc {
        Document::Bill(bill) => Some(bill),
        _ => None,
    });
    if let Some(bill) = bill {
        if bill.total_amount <= 0.0 {
            warn!(amount = bill.total_amount, "Invalid bill amount");
            discrepancies.push("Invalid bill amount (must be positive)".to_string());
        }
    }
}

/// ID card policy number and member ID must be present and real
fn check_id_card(documents: &[Document], discrepancies: &mut Vec<String>) {
    let card = documents.iter().find_map(|doc| match doc {
        Document::IdCard(card) => Some(card),
        _ => None,
    });
    let Some(card) = card else {
        return;
    };

    if card.policy_number.is_empty() || card.policy_number == UNKNOWN_SENTINEL {
        warn!("Missing or invalid policy number");
        discrepancies.push("Missing or invalid policy number".to_string());
    }
    if card.member_id.is_empty() || card.member_id == UNKNOWN_SENTINEL {
        warn!("Missing or invalid member ID");
        discrepancies.push("Missing or invalid member ID".to_string());
    }
}
