//! Prompt construction for field extraction

use claimwell_domain::DocumentType;

const BILL_SYSTEM_PROMPT: &str = r#"You are an expert at extracting information from medical bills.
Extract and return ONLY valid JSON (no markdown):
{
    "type": "bill",
    "hospital_name": "hospital name",
    "total_amount": numeric_amount,
    "date_of_service": "YYYY-MM-DD",
    "patient_name": "patient name or null",
    "bill_items": ["item1", "item2"] or null
}"#;

const DISCHARGE_SYSTEM_PROMPT: &str = r#"You are an expert at extracting information from hospital discharge summaries.
Extract and return ONLY valid JSON (no markdown):
{
    "type": "discharge_summary",
    "patient_name": "full patient name",
    "diagnosis": "primary diagnosis",
    "admission_date": "YYYY-MM-DD",
    "discharge_date": "YYYY-MM-DD",
    "treating_doctor": "doctor name or null",
    "procedures": ["procedure1", "procedure2"] or null
}"#;

const ID_CARD_SYSTEM_PROMPT: &str = r#"You are an expert at extracting information from insurance ID cards.
Extract and return ONLY valid JSON (no markdown):
{
    "type": "id_card",
    "patient_name": "full patient name",
    "policy_number": "policy number",
    "member_id": "member/subscriber ID",
    "insurance_provider": "insurance company name or null"
}"#;

/// The schema-shaped system instruction for one document type
pub(crate) fn system_prompt(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::Bill => BILL_SYSTEM_PROMPT,
        DocumentType::DischargeSummary => DISCHARGE_SYSTEM_PROMPT,
        DocumentType::IdCard => ID_CARD_SYSTEM_PROMPT,
    }
}

/// Human-readable name used in the user prompt
fn prompt_subject(doc_type: DocumentType) -> &'static str {
    match doc_type {
        DocumentType::Bill => "medical bill",
        DocumentType::DischargeSummary => "discharge summary",
        DocumentType::IdCard => "insurance ID card",
    }
}

/// Build the user prompt, truncating the document text to `max_chars`
/// characters (char-boundary safe)
pub(crate) fn user_prompt(doc_type: DocumentType, text: &str, max_chars: usize) -> String {
    let excerpt: String = text.chars().take(max_chars).collect();
    format!(
        "Extract data from this {}:\n\n{}\n\nReturn valid JSON only.",
        prompt_subject(doc_type),
        excerpt
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_names_the_type_tag() {
        assert!(system_prompt(DocumentType::Bill).contains(r#""type": "bill""#));
        assert!(system_prompt(DocumentType::DischargeSummary)
            .contains(r#""type": "discharge_summary""#));
        assert!(system_prompt(DocumentType::IdCard).contains(r#""type": "id_card""#));
    }

    #[test]
    fn test_user_prompt_includes_text() {
        let prompt = user_prompt(DocumentType::Bill, "Total due: $1,250.00", 3000);
        assert!(prompt.contains("medical bill"));
        assert!(prompt.contains("Total due: $1,250.00"));
        assert!(prompt.ends_with("Return valid JSON only."));
    }

    #[test]
    fn test_user_prompt_truncates() {
        let text = "a".repeat(10_000);
        let prompt = user_prompt(DocumentType::IdCard, &text, 3000);
        assert!(prompt.contains(&"a".repeat(3000)));
        assert!(!prompt.contains(&"a".repeat(3001)));
    }

    #[test]
    fn test_truncation_is_char_boundary_safe() {
        // multi-byte characters near the cut must not panic
        let text = "é".repeat(4000);
        let prompt = user_prompt(DocumentType::Bill, &text, 3000);
        assert!(prompt.contains(&"é".repeat(3000)));
    }
}
