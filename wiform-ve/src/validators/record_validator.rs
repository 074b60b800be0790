//! Record validator
//!
//! Runs every field validator, the cross-field check and the completeness
//! scorer over one refined record and assembles the [`ValidationReport`].
//!
//! # Validity
//! `valid` is false iff a field validator failed on a non-empty value or the
//! cross-field check failed. Missing critical fields are only warnings.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;
use wiform_common::form::fields;
use wiform_common::{DateField, FormRecord};

use super::cross_field::check_receipt_after_filling;
use super::date::validate_date;
use super::israeli_id::validate_israeli_id;
use super::phone::validate_phone;
use super::{CompletenessScorer, FieldCheck};
use crate::report::{FieldResult, ValidationReport};

fn date_value(date: &DateField) -> Value {
    json!({"day": date.day, "month": date.month, "year": date.year})
}

/// Record Validator
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    scorer: CompletenessScorer,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self {
            scorer: CompletenessScorer::new(),
        }
    }

    /// Validate a refined record
    pub fn validate(&self, record: &FormRecord) -> ValidationReport {
        self.validate_with_warnings(record, Vec::new())
    }

    /// Validate a refined record, appending earlier-stage warnings
    /// (e.g. merge diagnostics) after the critical-field warnings
    pub fn validate_with_warnings(
        &self,
        record: &FormRecord,
        extra_warnings: Vec<String>,
    ) -> ValidationReport {
        let mut errors = Vec::new();
        let mut field_results = BTreeMap::new();

        let mut record_check = |field: &str, blank: bool, check: FieldCheck, value: Value| {
            if !check.valid && !blank {
                errors.push(format!("{field}: {}", check.message));
            }
            field_results.insert(
                field.to_string(),
                FieldResult {
                    valid: check.valid,
                    message: check.message,
                    value,
                },
            );
        };

        record_check(
            fields::ID_NUMBER,
            record.id_number.trim().is_empty(),
            validate_israeli_id(&record.id_number),
            json!(record.id_number),
        );
        for (name, date) in record.date_fields() {
            record_check(name, date.is_empty(), validate_date(date), date_value(date));
        }
        record_check(
            fields::MOBILE_PHONE,
            record.mobile_phone.trim().is_empty(),
            validate_phone(&record.mobile_phone),
            json!(record.mobile_phone),
        );
        record_check(
            fields::LANDLINE_PHONE,
            record.landline_phone.trim().is_empty(),
            validate_phone(&record.landline_phone),
            json!(record.landline_phone),
        );

        if let Some(error) = check_receipt_after_filling(record) {
            errors.push(error);
        }

        let critical = [
            (fields::FIRST_NAME, &record.first_name),
            (fields::LAST_NAME, &record.last_name),
            (fields::ID_NUMBER, &record.id_number),
        ];
        let mut warnings: Vec<String> = critical
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| format!("Critical field missing: {field}"))
            .collect();
        warnings.extend(extra_warnings);

        let completeness = self.scorer.score(record);
        let valid = errors.is_empty();

        info!(
            valid,
            errors = errors.len(),
            warnings = warnings.len(),
            completeness_percentage = completeness.percentage,
            "Validation completed"
        );

        ValidationReport {
            valid,
            errors,
            warnings,
            field_results,
            completeness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_record() -> FormRecord {
        FormRecord {
            last_name: "טננהוים".to_string(),
            first_name: "יהודה".to_string(),
            id_number: "123456782".to_string(),
            mobile_phone: "0502474947".to_string(),
            date_of_birth: DateField::new("02", "02", "1995"),
            form_filling_date: DateField::new("25", "01", "2023"),
            form_receipt_date_at_clinic: DateField::new("02", "02", "2023"),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_record_is_valid() {
        let report = RecordValidator::new().validate(&clean_record());
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.field_results.len(), 7);
        assert_eq!(report.field_results["idNumber"].message, "Valid Israeli ID");
        assert_eq!(report.field_results["landlinePhone"].message, "No phone provided");
        assert_eq!(
            report.field_results["dateOfBirth"].value,
            json!({"day": "02", "month": "02", "year": "1995"})
        );
    }

    #[test]
    fn test_invalid_id_is_error() {
        let record = FormRecord {
            id_number: "123456789".to_string(),
            ..clean_record()
        };
        let report = RecordValidator::new().validate(&record);
        assert!(!report.valid);
        assert_eq!(
            report.errors,
            vec!["idNumber: Invalid Israeli ID check digit".to_string()]
        );
    }

    #[test]
    fn test_receipt_before_filling_is_hard_error() {
        let record = FormRecord {
            form_filling_date: DateField::new("01", "06", "2023"),
            form_receipt_date_at_clinic: DateField::new("01", "05", "2023"),
            ..clean_record()
        };
        let report = RecordValidator::new().validate(&record);
        assert!(!report.valid);
        assert!(report.errors[0].starts_with("Logic Error: Receipt date (01/05/2023)"));
    }

    #[test]
    fn test_partial_date_is_error() {
        let record = FormRecord {
            date_of_injury: DateField::new("", "04", "2022"),
            ..clean_record()
        };
        let report = RecordValidator::new().validate(&record);
        assert_eq!(
            report.errors,
            vec!["dateOfInjury: Incomplete date (missing day, month, or year)".to_string()]
        );
    }

    #[test]
    fn test_missing_critical_fields_warn_but_stay_valid() {
        let report = RecordValidator::new().validate(&FormRecord::default());
        assert!(report.valid);
        assert_eq!(
            report.warnings,
            vec![
                "Critical field missing: firstName".to_string(),
                "Critical field missing: lastName".to_string(),
                "Critical field missing: idNumber".to_string(),
            ]
        );
        assert_eq!(report.completeness.filled_fields, 0);
        assert_eq!(report.completeness.total_fields, 35);
    }

    #[test]
    fn test_extra_warnings_appended() {
        let report = RecordValidator::new().validate_with_warnings(
            &FormRecord {
                id_number: "123456782".to_string(),
                ..Default::default()
            },
            vec!["gender: expected text, got array; default kept".to_string()],
        );
        assert_eq!(report.warnings.len(), 3);
        assert_eq!(
            report.warnings.last().map(String::as_str),
            Some("gender: expected text, got array; default kept")
        );
    }
}
