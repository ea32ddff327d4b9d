//! Document classification: keyword fast path with model fallback

use claimwell_domain::traits::LanguageModel;
use claimwell_domain::DocumentType;
use std::sync::Arc;
use tracing::{debug, warn};

/// Filename keywords checked in priority order; first matching set wins.
const BILL_KEYWORDS: [&str; 4] = ["bill", "invoice", "payment", "receipt"];
const DISCHARGE_KEYWORDS: [&str; 3] = ["discharge", "summary", "report"];
const ID_KEYWORDS: [&str; 4] = ["id", "card", "policy", "insurance"];

const CLASSIFIER_SYSTEM_PROMPT: &str = "\
You are a document classification expert for medical insurance claims.
Given a filename, classify it into ONE of these types:
- bill: Medical bills, invoices, payment receipts
- discharge_summary: Hospital discharge summaries, medical reports
- id_card: Insurance ID cards, policy documents

Respond ONLY with: bill, discharge_summary, or id_card";

/// Classify a filename by keyword alone.
///
/// Case-insensitive substring match against the three fixed keyword sets,
/// bill first, then discharge, then id. Returns `None` when no keyword
/// matches; the caller decides whether to fall back to the model.
pub fn classify_by_filename(filename: &str) -> Option<DocumentType> {
    let lower = filename.to_lowercase();

    if BILL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Some(DocumentType::Bill);
    }
    if DISCHARGE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Some(DocumentType::DischargeSummary);
    }
    if ID_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Some(DocumentType::IdCard);
    }
    None
}

/// Classifies uploaded files into document types.
///
/// The keyword fast path answers without touching the model; only
/// keyword-free filenames cost a model call. Classification never fails:
/// an unusable model answer or a call error defaults to `Bill`.
pub struct DocumentClassifier<L: LanguageModel> {
    model: Arc<L>,
}

impl<L: LanguageModel> DocumentClassifier<L> {
    /// Create a new classifier backed by the given model
    pub fn new(model: Arc<L>) -> Self {
        Self { model }
    }

    /// Classify a file by its name, falling back to the model
    pub async fn classify(&self, filename: &str) -> DocumentType {
        if let Some(doc_type) = classify_by_filename(filename) {
            debug!(%filename, %doc_type, "Classified by filename");
            return doc_type;
        }

        let prompt = format!("Classify this document: {}", filename);
        match self.model.complete(CLASSIFIER_SYSTEM_PROMPT, &prompt).await {
            Ok(answer) => {
                let normalized = answer.trim().to_lowercase();
                match normalized.parse::<DocumentType>() {
                    Ok(doc_type) => {
                        debug!(%filename, %doc_type, "Classified by model");
                        doc_type
                    }
                    Err(_) => {
                        warn!(
                            %filename,
                            answer = %normalized,
                            "Invalid classification from model, defaulting to bill"
                        );
                        DocumentType::Bill
                    }
                }
            }
            Err(e) => {
                warn!(%filename, error = %e, "Classification call failed, defaulting to bill");
                DocumentType::Bill
            }
        }
    }
}
