//! Document module - the claim document variants and their type tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of recognized claim document categories.
///
/// The wire representation is the snake_case tag used in API responses
/// and LLM prompts ("bill", "discharge_summary", "id_card").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Medical bills, invoices, payment receipts
    Bill,
    /// Hospital discharge summaries, medical reports
    DischargeSummary,
    /// Insurance ID cards, policy documents
    IdCard,
}

impl DocumentType {
    /// Every claim must ultimately be substantiated by one document of
    /// each of these types, checked in this order.
    pub const REQUIRED: [DocumentType; 3] = [
        DocumentType::Bill,
        DocumentType::DischargeSummary,
        DocumentType::IdCard,
    ];

    /// The snake_case tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Bill => "bill",
            DocumentType::DischargeSummary => "discharge_summary",
            DocumentType::IdCard => "id_card",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bill" => Ok(DocumentType::Bill),
            "discharge_summary" => Ok(DocumentType::DischargeSummary),
            "id_card" => Ok(DocumentType::IdCard),
            other => Err(format!("unrecognized document type '{}'", other)),
        }
    }
}

/// Structured fields extracted from a medical bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillDocument {
    /// Name of the billing hospital
    pub hospital_name: String,

    /// Total bill amount; a positive value is expected, zero marks a
    /// sentinel record from a failed extraction
    pub total_amount: f64,

    /// Date of service (YYYY-MM-DD)
    pub date_of_service: String,

    /// Patient name, when the bill states one
    #[serde(default)]
    pub patient_name: Option<String>,

    /// Itemized charges, when present
    #[serde(default)]
    pub bill_items: Option<Vec<String>>,
}

/// Structured fields extracted from a hospital discharge summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DischargeSummaryDocument {
    /// Full patient name
    pub patient_name: String,

    /// Primary diagnosis
    pub diagnosis: String,

    /// Admission date (YYYY-MM-DD)
    pub admission_date: String,

    /// Discharge date (YYYY-MM-DD); must not precede the admission date
    pub discharge_date: String,

    /// Treating doctor, when stated
    #[serde(default)]
    pub treating_doctor: Option<String>,

    /// Procedures performed, when listed
    #[serde(default)]
    pub procedures: Option<Vec<String>>,
}

/// Structured fields extracted from an insurance ID card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdCardDocument {
    /// Full patient name
    pub patient_name: String,

    /// Policy number; the "UNKNOWN" sentinel marks a failed extraction
    pub policy_number: String,

    /// Member / subscriber ID; the "UNKNOWN" sentinel marks a failed
    /// extraction
    pub member_id: String,

    /// Insurance company name, when stated
    #[serde(default)]
    pub insurance_provider: Option<String>,
}

/// One extracted claim document.
///
/// Tagged union over the closed variant set; the `type` field carries the
/// discriminant on the wire. Each document is created exactly once per
/// input file by exactly one extractor and is immutable thereafter; the
/// validator and decision policy only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Document {
    /// A medical bill
    Bill(BillDocument),
    /// A hospital discharge summary
    DischargeSummary(DischargeSummaryDocument),
    /// An insurance ID card
    IdCard(IdCardDocument),
}

impl Document {
    /// The type tag of this document
    pub fn doc_type(&self) -> DocumentType {
        match self {
            Document::Bill(_) => DocumentType::Bill,
            Document::DischargeSummary(_) => DocumentType::DischargeSummary,
            Document::IdCard(_) => DocumentType::IdCard,
        }
    }

    /// The patient name this document exposes, if it states a non-empty one
    pub fn patient_name(&self) -> Option<&str> {
        let name = match self {
            Document::Bill(bill) => bill.patient_name.as_deref()?,
            Document::DischargeSummary(summary) => summary.patient_name.as_str(),
            Document::IdCard(card) => card.patient_name.as_str(),
        };
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bill() -> Document {
        Document::Bill(BillDocument {
            hospital_name: "St. Mary's Hospital".to_string(),
            total_amount: 1250.0,
            date_of_service: "2024-03-15".to_string(),
            patient_name: Some("Jane Doe".to_string()),
            bill_items: Some(vec!["Consultation".to_string(), "X-Ray".to_string()]),
        })
    }

    #[test]
    fn test_document_type_tags() {
        assert_eq!(DocumentType::Bill.as_str(), "bill");
        assert_eq!(DocumentType::DischargeSummary.as_str(), "discharge_summary");
        assert_eq!(DocumentType::IdCard.as_str(), "id_card");
    }

    #[test]
    fn test_document_type_parse_roundtrip() {
        for doc_type in DocumentType::REQUIRED {
            let parsed: DocumentType = doc_type.as_str().parse().unwrap();
            assert_eq!(parsed, doc_type);
        }
        assert!("invoice".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_serializes_with_type_tag() {
        let json = serde_json::to_value(sample_bill()).unwrap();
        assert_eq!(json["type"], "bill");
        assert_eq!(json["hospital_name"], "St. Mary's Hospital");
        assert_eq!(json["total_amount"], 1250.0);
    }

    #[test]
    fn test_document_deserializes_by_tag() {
        let json = r#"{
            "type": "id_card",
            "patient_name": "Jane Doe",
            "policy_number": "POL123",
            "member_id": "MEM456"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.doc_type(), DocumentType::IdCard);
        match doc {
            Document::IdCard(card) => {
                assert_eq!(card.policy_number, "POL123");
                assert_eq!(card.insurance_provider, None);
            }
            other => panic!("expected id_card, got {:?}", other),
        }
    }

    #[test]
    fn test_patient_name_accessor() {
        assert_eq!(sample_bill().patient_name(), Some("Jane Doe"));

        let anonymous_bill = Document::Bill(BillDocument {
            hospital_name: "General".to_string(),
            total_amount: 10.0,
            date_of_service: "2024-01-01".to_string(),
            patient_name: None,
            bill_items: None,
        });
        assert_eq!(anonymous_bill.patient_name(), None);

        let empty_name = Document::IdCard(IdCardDocument {
            patient_name: String::new(),
            policy_number: "POL1".to_string(),
            member_id: "MEM1".to_string(),
            insurance_provider: None,
        });
        assert_eq!(empty_name.patient_name(), None);
    }
}
