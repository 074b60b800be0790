//! Single-character OCR noise removal

use wiform_common::FormRecord;

use super::RefinementRule;

/// Clear phones and job type that are a lone stray character
#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseStripRule;

fn strip(value: &mut String) {
    if value.trim().chars().count() <= 1 {
        value.clear();
    }
}

impl RefinementRule for NoiseStripRule {
    fn name(&self) -> &'static str {
        "NoiseStripRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        strip(&mut record.landline_phone);
        strip(&mut record.mobile_phone);
        strip(&mut record.job_type);
        record
    }
}
