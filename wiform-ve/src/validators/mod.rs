//! Validation layer
//!
//! Field validators, the cross-field date-order check, completeness scoring
//! and the [`RecordValidator`] that combines them into a
//! [`ValidationReport`](crate::report::ValidationReport).
//!
//! # Validators
//! 1. **israeli_id** - 9 digits with weighted check digit
//! 2. **date** - well-formed, in range, real calendar date
//! 3. **phone** - Israeli mobile/landline shape
//! 4. **cross_field** - receipt date must not precede filling date
//! 5. **completeness_scorer** - filled/total leaf counts
//!
//! Field validators never fail: they return a [`FieldCheck`]. An empty value
//! is always valid; missing data is reported as a warning elsewhere.

pub mod completeness_scorer;
pub mod cross_field;
pub mod date;
pub mod israeli_id;
pub mod phone;
pub mod record_validator;

pub use completeness_scorer::CompletenessScorer;
pub use record_validator::RecordValidator;

/// Outcome of one field validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub valid: bool,
    pub message: String,
}

impl FieldCheck {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            valid: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }
}
