//! Form engine
//!
//! Orchestrates the full repair-and-validate flow for one draft:
//!
//! ```text
//! raw draft → merger → merged record → RefinerPipeline → refined record
//!           → RecordValidator (+ CompletenessScorer) → ValidationReport
//! ```
//!
//! The engine holds no per-request state. Build it once, wrap it in an
//! `Arc` and share it across any number of handlers.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use wiform_common::config::RefinerConfig;
use wiform_common::FormRecord;

use crate::merger::merge_with_diagnostics;
use crate::refiner::{Correction, Refined, RefinerPipeline};
use crate::report::ValidationReport;
use crate::validators::RecordValidator;

/// Everything produced for one draft
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOutput {
    /// Refined record
    pub record: FormRecord,
    pub report: ValidationReport,
    pub corrections: Vec<Correction>,
    /// `report.accuracy_score()`, unrounded
    pub accuracy_score: f64,
}

/// Merge → refine → validate
pub struct FormEngine {
    refiner: RefinerPipeline,
    validator: RecordValidator,
}

impl FormEngine {
    /// Engine with default refiner policies
    pub fn new() -> Self {
        Self::with_config(&RefinerConfig::default())
    }

    pub fn with_config(config: &RefinerConfig) -> Self {
        Self {
            refiner: RefinerPipeline::from_config(config),
            validator: RecordValidator::new(),
        }
    }

    pub fn refiner(&self) -> &RefinerPipeline {
        &self.refiner
    }

    /// Merge and refine a draft without validating it
    ///
    /// Returns the refinement result and the merge warnings.
    pub fn refine_draft(&self, draft: &Value) -> (Refined, Vec<String>) {
        let merged = merge_with_diagnostics(draft);
        debug!(
            merge_warnings = merged.warnings.len(),
            "Draft merged into canonical schema"
        );
        (self.refiner.refine_traced(merged.record), merged.warnings)
    }

    /// Run the whole flow for one draft
    pub fn process(&self, draft: &Value) -> EngineOutput {
        let (refined, merge_warnings) = self.refine_draft(draft);
        let report = self
            .validator
            .validate_with_warnings(&refined.record, merge_warnings);
        let accuracy_score = report.accuracy_score();

        EngineOutput {
            record: refined.record,
            report,
            corrections: refined.corrections,
            accuracy_score,
        }
    }
}

impl Default for FormEngine {
    fn default() -> Self {
        Self::new()
    }
}
