//! Completeness Scorer
//!
//! Counts filled leaves of the canonical schema tree.
//!
//! # Scoring Algorithm
//! - Every leaf of the record counts toward the total (35 for form 283)
//! - A leaf is filled iff its trimmed value is non-empty
//! - `percentage = round(filled / total * 100, 1)`, 0 when total is 0
//!
//! The leaf set comes from the typed tree, so the total never depends on
//! which keys the extraction happened to produce.

use serde_json::json;
use tracing::debug;
use wiform_common::form::{collect_leaves, FieldGroup};

use crate::report::{round1, Completeness};

/// Completeness Scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletenessScorer;

impl CompletenessScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score any schema node (normally a whole `FormRecord`)
    pub fn score(&self, group: &dyn FieldGroup) -> Completeness {
        let mut leaves = Vec::new();
        collect_leaves(group, "", &mut leaves);

        let total = leaves.len();
        let filled = leaves
            .iter()
            .filter(|leaf| !leaf.value.trim().is_empty())
            .count();

        let percentage = if total == 0 {
            0.0
        } else {
            round1(filled as f64 / total as f64 * 100.0)
        };

        debug!(filled, total, percentage, "Completeness scoring complete");

        Completeness {
            filled_fields: filled,
            total_fields: total,
            percentage,
        }
    }

    /// Leaf paths that are still empty, in form order
    pub fn missing_fields(&self, group: &dyn FieldGroup) -> Vec<String> {
        let mut leaves = Vec::new();
        collect_leaves(group, "", &mut leaves);
        leaves
            .into_iter()
            .filter(|leaf| leaf.value.trim().is_empty())
            .map(|leaf| leaf.path)
            .collect()
    }

    /// Detailed report for diagnostics
    pub fn report(&self, group: &dyn FieldGroup) -> serde_json::Value {
        let completeness = self.score(group);
        json!({
            "scorer": "CompletenessScorer",
            "filledFields": completeness.filled_fields,
            "totalFields": completeness.total_fields,
            "percentage": completeness.percentage,
            "missing": self.missing_fields(group),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
