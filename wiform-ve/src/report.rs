//! Validation report
//!
//! The aggregate result of validating one refined record, plus its
//! single-number accuracy score and a human-readable rendering.
//!
//! # Accuracy Score
//! `max(0, completeness - min(errors * 0.05, 0.5)) * 100`, where
//! completeness is the filled fraction (0.0-1.0). Each hard error costs five
//! points, capped at fifty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ERROR_PENALTY: f64 = 0.05;
const MAX_ERROR_PENALTY: f64 = 0.5;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Filled/total leaf counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completeness {
    pub filled_fields: usize,
    pub total_fields: usize,
    /// 0.0-100.0, one decimal
    pub percentage: f64,
}

/// Per-field validator outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub valid: bool,
    pub message: String,
    /// The validated value as it appears in the record
    pub value: serde_json::Value,
}

/// Aggregate validation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub field_results: BTreeMap<String, FieldResult>,
    pub completeness: Completeness,
}

impl ValidationReport {
    /// Completeness discounted by hard errors, 0.0-100.0 (unrounded)
    pub fn accuracy_score(&self) -> f64 {
        let penalty = (self.errors.len() as f64 * ERROR_PENALTY).min(MAX_ERROR_PENALTY);
        (self.completeness.percentage / 100.0 - penalty).max(0.0) * 100.0
    }
}

/// Render a report as plain text
pub fn render_text(report: &ValidationReport) -> String {
    let rule = "=".repeat(60);
    let c = &report.completeness;

    let mut lines = vec![
        rule.clone(),
        "VALIDATION REPORT".to_string(),
        rule.clone(),
        String::new(),
        format!(
            "Overall Status: {}",
            if report.valid { "VALID" } else { "INVALID" }
        ),
        format!(
            "Completeness: {}/{} fields ({:.1}%)",
            c.filled_fields, c.total_fields, c.percentage
        ),
        format!("Accuracy Score: {:.1}", report.accuracy_score()),
    ];

    push_section(&mut lines, "Errors", &report.errors);
    push_section(&mut lines, "Warnings", &report.warnings);

    if !report.field_results.is_empty() {
        lines.push(String::new());
        lines.push("Field Validations:".to_string());
        for (field, result) in &report.field_results {
            let mark = if result.valid { "OK  " } else { "FAIL" };
            lines.push(format!("   [{mark}] {field}: {}", result.message));
        }
    }

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{title} ({}):", items.len()));
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("   {}. {item}", i + 1));
    }
}
