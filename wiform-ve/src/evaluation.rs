//! Ground-truth evaluation
//!
//! Field-by-field comparison of a refined record against a hand-labelled
//! record. Both sides are flattened to dotted leaf paths
//! (`dateOfBirth.day`) and compared after trimming.
//!
//! Each mismatch carries the normalized Levenshtein similarity of the two
//! values (`strsim`), which separates near misses (one misread digit) from
//! wrong answers.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wiform_common::FormRecord;

use crate::engine::FormEngine;
use crate::report::round1;

/// One leaf that differs from the label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: String,
    pub actual: String,
    /// 0.0-1.0, 1.0 means identical
    pub similarity: f64,
}

/// Field-level accuracy of one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAccuracy {
    /// 0.0-100.0
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
    pub mismatches: Vec<FieldMismatch>,
}

/// Compare every leaf of `actual` against `expected`
pub fn compare_records(actual: &FormRecord, expected: &FormRecord) -> FieldAccuracy {
    let mut correct = 0;
    let mut mismatches = Vec::new();

    let expected_leaves = expected.leaves();
    let total = expected_leaves.len();

    for (exp, act) in expected_leaves.into_iter().zip(actual.leaves()) {
        let exp_value = exp.value.trim();
        let act_value = act.value.trim();

        if exp_value == act_value {
            correct += 1;
        } else {
            mismatches.push(FieldMismatch {
                field: exp.path,
                expected: exp_value.to_string(),
                actual: act_value.to_string(),
                similarity: strsim::normalized_levenshtein(exp_value, act_value),
            });
        }
    }

    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    };

    FieldAccuracy {
        accuracy,
        correct,
        total,
        mismatches,
    }
}

/// One labelled draft
#[derive(Debug, Clone, Deserialize)]
pub struct EvalCase {
    pub name: String,
    /// Raw extraction output
    pub draft: Value,
    /// Ground-truth label
    pub expected: FormRecord,
}

/// A set of labelled drafts
#[derive(Debug, Clone, Deserialize)]
pub struct EvalSuite {
    pub cases: Vec<EvalCase>,
}

impl EvalSuite {
    /// Read a suite file (`{"cases": [...]}`)
    pub fn from_path(path: &Path) -> wiform_common::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|err| {
            wiform_common::Error::InvalidInput(format!("{}: {}", path.display(), err))
        })
    }
}

/// Result of one case
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub name: String,
    pub fields: FieldAccuracy,
    pub valid: bool,
    pub accuracy_score: f64,
}

/// Result of a whole suite
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    pub cases: Vec<CaseResult>,
    pub overall_correct: usize,
    pub overall_total: usize,
    /// 0.0-100.0, one decimal
    pub overall_accuracy: f64,
}

/// Run every case through the engine and score it against its label
pub fn run_suite(engine: &FormEngine, suite: &EvalSuite) -> SuiteResult {
    let cases: Vec<CaseResult> = suite
        .cases
        .iter()
        .map(|case| {
            let output = engine.process(&case.draft);
            CaseResult {
                name: case.name.clone(),
                fields: compare_records(&output.record, &case.expected),
                valid: output.report.valid,
                accuracy_score: round1(output.accuracy_score),
            }
        })
        .collect();

    let overall_correct = cases.iter().map(|c| c.fields.correct).sum();
    let overall_total = cases.iter().map(|c| c.fields.total).sum();
    let overall_accuracy = if overall_total == 0 {
        0.0
    } else {
        round1(overall_correct as f64 / overall_total as f64 * 100.0)
    };

    SuiteResult {
        cases,
        overall_correct,
        overall_total,
        overall_accuracy,
    }
}
