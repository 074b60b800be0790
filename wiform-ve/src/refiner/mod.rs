//! Refinement pipeline
//!
//! Deterministic correction of the noise an OCR + language-model extraction
//! leaves in a merged [`FormRecord`].
//!
//! # Architecture
//! Each correction is an explicit [`RefinementRule`] object. The pipeline
//! holds the rules in one declared order and runs each exactly once:
//! 1. **IdNumberRule** - digits only, pad 8 → 9, truncate over-long IDs
//! 2. **PhoneRule** - digits only, mobile "65"/"5" prefix repair
//! 3. **DateSwapRule** - day/month swap when month > 12, two-digit padding
//! 4. **MedicalFundRule** - recover the health fund name from free text
//! 5. **SignatureRule** - fall back to the claimant's name
//! 6. **NoiseStripRule** - drop single-character OCR noise
//! 7. **AccidentLocationRule** - optional, appended only when configured
//!
//! Every rule is total and idempotent, so the whole pipeline is too:
//! `refine(refine(r)) == refine(r)`.
//!
//! # Tracing
//! [`RefinerPipeline::refine_traced`] diffs the record's leaves around each
//! rule and reports every changed leaf as a [`Correction`].

mod accident_location;
mod date_swap;
mod id_number;
mod medical_fund;
mod noise_strip;
mod phone;
mod signature;

pub use accident_location::AccidentLocationRule;
pub use date_swap::DateSwapRule;
pub use id_number::IdNumberRule;
pub use medical_fund::MedicalFundRule;
pub use noise_strip::NoiseStripRule;
pub use phone::PhoneRule;
pub use signature::SignatureRule;

use serde::Serialize;
use tracing::debug;
use wiform_common::config::RefinerConfig;
use wiform_common::FormRecord;

/// One correction step of the pipeline
pub trait RefinementRule: Send + Sync {
    /// Stable rule name (appears in correction traces)
    fn name(&self) -> &'static str;

    /// Apply the rule. Must be total and idempotent.
    fn apply(&self, record: FormRecord) -> FormRecord;
}

/// One leaf changed by one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub rule: &'static str,
    pub field: String,
    pub before: String,
    pub after: String,
}

/// Refined record with the corrections that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refined {
    pub record: FormRecord,
    pub corrections: Vec<Correction>,
}

/// Ordered chain of refinement rules
pub struct RefinerPipeline {
    rules: Vec<Box<dyn RefinementRule>>,
}

impl RefinerPipeline {
    /// Pipeline with the six standard rules and default policies
    pub fn new() -> Self {
        Self::from_config(&RefinerConfig::default())
    }

    /// Pipeline built from configuration
    pub fn from_config(config: &RefinerConfig) -> Self {
        let mut rules: Vec<Box<dyn RefinementRule>> = vec![
            Box::new(IdNumberRule::new(config.id_truncation)),
            Box::new(PhoneRule),
            Box::new(DateSwapRule),
            Box::new(MedicalFundRule),
            Box::new(SignatureRule),
            Box::new(NoiseStripRule),
        ];
        if config.accident_location_override {
            rules.push(Box::new(AccidentLocationRule));
        }

        Self { rules }
    }

    /// Rule names in execution order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule once, in order
    pub fn refine(&self, record: FormRecord) -> FormRecord {
        self.rules.iter().fold(record, |record, rule| rule.apply(record))
    }

    /// Run every rule once, in order, recording each changed leaf
    pub fn refine_traced(&self, record: FormRecord) -> Refined {
        let mut record = record;
        let mut corrections = Vec::new();

        for rule in &self.rules {
            let before = record.clone();
            record = rule.apply(record);
            diff_leaves(rule.name(), &before, &record, &mut corrections);
        }

        debug!(corrections = corrections.len(), "Refinement complete");
        Refined {
            record,
            corrections,
        }
    }
}

impl Default for RefinerPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn diff_leaves(
    rule: &'static str,
    before: &FormRecord,
    after: &FormRecord,
    out: &mut Vec<Correction>,
) {
    // Both records share the schema tree, so leaves line up by position
    for (old, new) in before.leaves().into_iter().zip(after.leaves()) {
        if old.value != new.value {
            debug!(
                rule,
                field = %new.path,
                before = old.value,
                after = new.value,
                "Field corrected"
            );
            out.push(Correction {
                rule,
                field: new.path,
                before: old.value.to_string(),
                after: new.value.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiform_common::config::IdTruncation;
    use wiform_common::DateField;

    fn noisy_record() -> FormRecord {
        FormRecord {
            first_name: "שלמה".to_string(),
            last_name: "הלוי".to_string(),
            id_number: "22-456-120".to_string(),
            mobile_phone: "554-412742".to_string(),
            job_type: "מאפיית האחים".to_string(),
            signature: "X".to_string(),
            date_of_injury: DateField::new("8", "12", "2005"),
            form_filling_date: DateField::new("9", "14", "2006"),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_rule_order() {
        let pipeline = RefinerPipeline::new();
        assert_eq!(
            pipeline.rule_names(),
            vec![
                "IdNumberRule",
                "PhoneRule",
                "DateSwapRule",
                "MedicalFundRule",
                "SignatureRule",
                "NoiseStripRule",
            ]
        );
    }

    #[test]
    fn test_accident_location_rule_appended_when_enabled() {
        let config = RefinerConfig {
            id_truncation: IdTruncation::KeepFirst,
            accident_location_override: true,
        };
        let pipeline = RefinerPipeline::from_config(&config);
        assert_eq!(pipeline.rule_names().last(), Some(&"AccidentLocationRule"));
        assert_eq!(pipeline.rule_names().len(), 7);
    }

    #[test]
    fn test_refine_repairs_noisy_record() {
        let refined = RefinerPipeline::new().refine(noisy_record());

        assert_eq!(refined.id_number, "022456120");
        assert_eq!(refined.mobile_phone, "0554412742");
        assert_eq!(refined.date_of_injury, DateField::new("08", "12", "2005"));
        assert_eq!(refined.form_filling_date, DateField::new("14", "09", "2006"));
        assert_eq!(refined.signature, "שלמה הלוי");
    }

    #[test]
    fn test_refine_is_idempotent() {
        let pipeline = RefinerPipeline::new();
        let once = pipeline.refine(noisy_record());
        let twice = pipeline.refine(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_trace_matches_untraced_result() {
        let pipeline = RefinerPipeline::new();
        let traced = pipeline.refine_traced(noisy_record());
        assert_eq!(traced.record, pipeline.refine(noisy_record()));
    }

    #[test]
    fn test_trace_records_corrections_in_rule_order() {
        let traced = RefinerPipeline::new().refine_traced(noisy_record());

        let rules: Vec<&str> = traced.corrections.iter().map(|c| c.rule).collect();
        let mut sorted = rules.clone();
        let order = RefinerPipeline::new().rule_names();
        sorted.sort_by_key(|r| order.iter().position(|o| o == r));
        assert_eq!(rules, sorted);

        let id = &traced.corrections[0];
        assert_eq!(id.rule, "IdNumberRule");
        assert_eq!(id.field, "idNumber");
        assert_eq!(id.before, "22-456-120");
        assert_eq!(id.after, "022456120");

        assert!(traced.corrections.iter().any(|c| c.field == "formFillingDate.month"
            && c.before == "14"
            && c.after == "09"));
        assert!(traced
            .corrections
            .iter()
            .any(|c| c.rule == "SignatureRule" && c.after == "שלמה הלוי"));
    }

    #[test]
    fn test_clean_record_has_no_corrections() {
        let pipeline = RefinerPipeline::new();
        let clean = pipeline.refine(noisy_record());
        let traced = pipeline.refine_traced(clean);
        assert!(traced.corrections.is_empty());
    }
}
