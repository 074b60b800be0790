//! Signature fallback

use wiform_common::FormRecord;

use super::RefinementRule;

/// Replace a missing or placeholder signature with the claimant's name
///
/// An empty signature, an "X" mark, or a single character is replaced by
/// "firstName lastName" when that name is non-empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureRule;

fn is_placeholder(signature: &str) -> bool {
    let trimmed = signature.trim();
    trimmed.is_empty() || trimmed == "X" || trimmed.chars().count() < 2
}

impl RefinementRule for SignatureRule {
    fn name(&self) -> &'static str {
        "SignatureRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        if is_placeholder(&record.signature) {
            let name = record.full_name();
            if !name.is_empty() {
                record.signature = name;
            }
        }
        record
    }
}
