//! Schema merger
//!
//! Deep-merges a loosely-typed extraction draft into a complete
//! [`FormRecord`]. The result always carries every leaf of the schema;
//! anything the draft does not supply stays at its default.
//!
//! # Merge Rules
//! - Keys outside the schema are dropped silently
//! - `null` means absent (the default is kept)
//! - Object under a nested field: recurse
//! - Scalar under a leaf: string as is, number as its decimal text,
//!   bool as `"true"`/`"false"`
//!
//! # Type Mismatches
//! The merger never fails. A shape it cannot use keeps the default and is
//! reported as a merge warning:
//! - array/object where a leaf is expected
//! - scalar or array where a nested object is expected
//! - a draft root that is not an object (the all-default record is returned)

use serde_json::{Map, Value};
use tracing::debug;
use wiform_common::form::{FieldGroup, SlotMut};
use wiform_common::FormRecord;

/// Merged record plus any type-mismatch warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub record: FormRecord,
    pub warnings: Vec<String>,
}

/// Merge `draft` into the all-default record, discarding diagnostics
pub fn merge(draft: &Value) -> FormRecord {
    merge_with_diagnostics(draft).record
}

/// Merge `draft` into the all-default record
pub fn merge_with_diagnostics(draft: &Value) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();

    match draft {
        Value::Object(map) => merge_group(&mut outcome.record, map, "", &mut outcome.warnings),
        other => {
            let warning = format!(
                "Draft root must be an object (got {}); all fields left empty",
                kind(other)
            );
            debug!(kind = kind(other), "Non-object draft root");
            outcome.warnings.push(warning);
        }
    }

    outcome
}

fn merge_group(
    group: &mut dyn FieldGroup,
    draft: &Map<String, Value>,
    prefix: &str,
    warnings: &mut Vec<String>,
) {
    for (key, value) in draft {
        let Some(slot) = group.slot_mut(key) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match (slot, value) {
            (SlotMut::Group(inner), Value::Object(map)) => merge_group(inner, map, &path, warnings),
            (SlotMut::Group(_), other) => {
                debug!(field = %path, got = kind(other), "Expected object, default kept");
                warnings.push(format!(
                    "{path}: expected object, got {}; default kept",
                    kind(other)
                ));
            }
            (SlotMut::Leaf(leaf), Value::String(s)) => *leaf = s.clone(),
            (SlotMut::Leaf(leaf), Value::Number(n)) => *leaf = n.to_string(),
            (SlotMut::Leaf(leaf), Value::Bool(b)) => *leaf = b.to_string(),
            (SlotMut::Leaf(_), other) => {
                debug!(field = %path, got = kind(other), "Expected scalar, default kept");
                warnings.push(format!(
                    "{path}: expected text, got {}; default kept",
                    kind(other)
                ));
            }
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiform_common::DateField;

    #[test]
    fn test_empty_draft_gives_default_record() {
        let outcome = merge_with_diagnostics(&json!({}));
        assert_eq!(outcome.record, FormRecord::default());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_partial_nested_draft() {
        let record = merge(&json!({
            "firstName": "יהודה",
            "dateOfBirth": {"day": "02", "year": "1995"},
            "address": {"city": "אבן יהודה"}
        }));

        assert_eq!(record.first_name, "יהודה");
        assert_eq!(record.date_of_birth, DateField::new("02", "", "1995"));
        assert_eq!(record.address.city, "אבן יהודה");
        assert_eq!(record.address.street, "");
        assert_eq!(record.leaves().len(), 35);
    }

    #[test]
    fn test_unknown_keys_dropped_silently() {
        let outcome = merge_with_diagnostics(&json!({
            "favouriteColour": "blue",
            "address": {"floor": "3"}
        }));
        assert_eq!(outcome.record, FormRecord::default());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_null_means_absent() {
        let outcome = merge_with_diagnostics(&json!({
            "lastName": null,
            "dateOfInjury": null,
            "medicalInstitutionFields": {"healthFundMember": null}
        }));
        assert_eq!(outcome.record, FormRecord::default());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_scalar_coercion() {
        let record = merge(&json!({
            "idNumber": 12345678,
            "dateOfBirth": {"day": 3, "month": 4.5, "year": "1990"},
            "gender": true
        }));
        assert_eq!(record.id_number, "12345678");
        assert_eq!(record.date_of_birth.day, "3");
        assert_eq!(record.date_of_birth.month, "4.5");
        assert_eq!(record.gender, "true");
    }

    #[test]
    fn test_container_at_leaf_keeps_default_with_warning() {
        let outcome = merge_with_diagnostics(&json!({
            "firstName": ["a", "b"],
            "lastName": {"x": 1},
            "jobType": "מלצרות"
        }));
        assert_eq!(outcome.record.first_name, "");
        assert_eq!(outcome.record.last_name, "");
        assert_eq!(outcome.record.job_type, "מלצרות");
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings.iter().any(|w| w.starts_with("firstName:")));
        assert!(outcome.warnings.iter().any(|w| w.starts_with("lastName:")));
    }

    #[test]
    fn test_scalar_at_group_keeps_default_with_warning() {
        let outcome = merge_with_diagnostics(&json!({
            "dateOfBirth": "02/02/1995",
            "address": {"city": ["x"]}
        }));
        assert_eq!(outcome.record.date_of_birth, DateField::default());
        let mut warnings = outcome.warnings;
        warnings.sort();
        assert_eq!(
            warnings,
            vec![
                "address.city: expected text, got array; default kept".to_string(),
                "dateOfBirth: expected object, got string; default kept".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_object_root() {
        for draft in [json!([1, 2]), json!("text"), json!(null), json!(7)] {
            let outcome = merge_with_diagnostics(&draft);
            assert_eq!(outcome.record, FormRecord::default());
            assert_eq!(outcome.warnings.len(), 1);
            assert!(outcome.warnings[0].starts_with("Draft root must be an object"));
        }
    }

    #[test]
    fn test_merge_is_deterministic() {
        let draft = json!({"lastName": "הלוי", "address": {"apartment": 34}});
        assert_eq!(merge(&draft), merge(&draft));
    }
}
