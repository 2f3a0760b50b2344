//! Keyword-density document classification.
//!
//! Five fixed keyword sets, checked in a fixed order. The score of a
//! category is the total occurrence count of its keywords in the lowercased
//! text divided by the word count. The highest score wins when it strictly
//! exceeds the configured minimum density; ties resolve to the earlier
//! category. This is a density heuristic, not a trained classifier.

use crate::models::DocumentCategory;

const CONTRACT_KEYWORDS: &[&str] = &[
    "agreement",
    "contract",
    "whereas",
    "party",
    "terms",
    "conditions",
    "obligations",
    "breach",
    "termination",
    "governing law",
];

const LEGAL_KEYWORDS: &[&str] = &[
    "court",
    "judgment",
    "plaintiff",
    "defendant",
    "statute",
    "regulation",
    "legal",
    "law",
    "section",
    "clause",
    "amendment",
];

const FINANCIAL_KEYWORDS: &[&str] = &[
    "invoice",
    "payment",
    "amount",
    "tax",
    "receipt",
    "balance",
    "account",
    "transaction",
    "financial",
    "budget",
];

const REPORT_KEYWORDS: &[&str] = &[
    "analysis",
    "summary",
    "findings",
    "conclusion",
    "recommendation",
    "executive summary",
    "methodology",
    "results",
];

const VISA_KEYWORDS: &[&str] = &[
    "visa",
    "passport",
    "immigration",
    "border",
    "residence",
    "permit",
    "citizenship",
    "embassy",
    "consulate",
    "application",
];

/// Categories in evaluation order.
const CATEGORIES: &[(DocumentCategory, &[&str])] = &[
    (DocumentCategory::Contract, CONTRACT_KEYWORDS),
    (DocumentCategory::Legal, LEGAL_KEYWORDS),
    (DocumentCategory::Financial, FINANCIAL_KEYWORDS),
    (DocumentCategory::Report, REPORT_KEYWORDS),
    (DocumentCategory::VisaImmigration, VISA_KEYWORDS),
];

/// Classify text by keyword density, or [`DocumentCategory::General`] when
/// no category clears `min_density`.
pub fn classify(text: &str, min_density: f64) -> DocumentCategory {
    let lowered = text.to_lowercase();
    let word_count = lowered.split_whitespace().count();
    if word_count == 0 {
        return DocumentCategory::General;
    }

    let mut best = DocumentCategory::General;
    let mut best_score = 0.0f64;

    for (category, keywords) in CATEGORIES {
        let hits: usize = keywords.iter().map(|kw| occurrences(&lowered, kw)).sum();
        let score = hits as f64 / word_count as f64;
        // Strictly greater keeps the earlier category on ties.
        if score > best_score {
            best_score = score;
            best = *category;
        }
    }

    if best_score > min_density {
        best
    } else {
        DocumentCategory::General
    }
}

/// Non-overlapping substring occurrence count.
fn occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CLASSIFY_MIN_DENSITY;

    #[test]
    fn test_contract_text_classifies_as_contract() {
        // ~100 words with repeated contract markers.
        let text = "This agreement is made between the first party and the second party. \
            Whereas the parties wish to define terms and conditions, the agreement sets out \
            obligations for each party. Termination of this agreement requires notice. \
            Whereas a breach of the agreement occurs, termination follows the governing law \
            of the territory. The terms of this contract bind both parties through every \
            obligation stated herein. Further conditions may be added to the agreement by \
            amendment when both parties consent in writing, and the contract continues in \
            force until termination as provided above, whereas notice has been served on \
            either party under the terms stated.";
        assert_eq!(
            classify(text, DEFAULT_CLASSIFY_MIN_DENSITY),
            DocumentCategory::Contract
        );
    }

    #[test]
    fn test_visa_text_classifies_as_visa() {
        let text = "Submit the visa application to the embassy with a valid passport. \
            The immigration office issues the residence permit after the application \
            is reviewed by the consulate.";
        assert_eq!(
            classify(text, DEFAULT_CLASSIFY_MIN_DENSITY),
            DocumentCategory::VisaImmigration
        );
    }

    #[test]
    fn test_plain_text_is_general() {
        let text = "The weather was mild and the garden grew quickly through spring.";
        assert_eq!(
            classify(text, DEFAULT_CLASSIFY_MIN_DENSITY),
            DocumentCategory::General
        );
    }

    #[test]
    fn test_empty_text_is_general() {
        assert_eq!(
            classify("", DEFAULT_CLASSIFY_MIN_DENSITY),
            DocumentCategory::General
        );
    }

    #[test]
    fn test_threshold_gates_classification() {
        // One keyword in a long filler text stays below a high threshold.
        let filler = "lorem ipsum dolor sit amet ".repeat(40);
        let text = format!("{filler} contract");
        assert_eq!(classify(&text, 0.5), DocumentCategory::General);
        assert_eq!(classify(&text, 0.0), DocumentCategory::Contract);
    }
}
