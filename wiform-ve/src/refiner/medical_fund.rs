//! Health fund recovery

use wiform_common::{FormRecord, HealthFund};

use super::RefinementRule;

/// Ensure `healthFundMember` is empty or one of the four fund names
///
/// A recognized name is kept (trimmed). Anything else is replaced by the
/// first fund, in [`HealthFund::ALL`] order, named in `medicalDiagnoses`
/// directly followed by `jobType` (no separator, so a name split across the
/// two fields is still found); with no such mention the field is cleared.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedicalFundRule;

impl RefinementRule for MedicalFundRule {
    fn name(&self) -> &'static str {
        "MedicalFundRule"
    }

    fn apply(&self, mut record: FormRecord) -> FormRecord {
        let medical = &record.medical_institution_fields;

        let fund = HealthFund::from_name(&medical.health_fund_member).or_else(|| {
            let haystack = format!("{}{}", medical.medical_diagnoses, record.job_type);
            HealthFund::find_in(&haystack)
        });

        record.medical_institution_fields.health_fund_member =
            fund.map(|f| f.as_str().to_string()).unwrap_or_default();
        record
    }
}
