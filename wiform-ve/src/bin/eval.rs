//! Ground-truth evaluation utility
//!
//! Runs labelled extraction drafts through the engine and reports
//! field-level accuracy against the labels.
//!
//! **Usage:**
//! ```bash
//! wiform-eval --suite suite.json [--config wiform.toml] [--export results.json]
//! ```
//!
//! Suite format: `{"cases": [{"name": ..., "draft": {...}, "expected": {...}}]}`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use wiform_common::config::resolve_config;
use wiform_ve::evaluation::{run_suite, EvalSuite, SuiteResult};
use wiform_ve::logging::init_tracing;
use wiform_ve::FormEngine;

/// Ground-truth evaluation utility
#[derive(Parser, Debug)]
#[clap(name = "wiform-eval")]
#[clap(about = "Measure field accuracy of refined drafts against ground-truth labels")]
struct Args {
    /// Labelled suite (JSON)
    #[clap(long, value_name = "FILE")]
    suite: PathBuf,

    /// Path to TOML config file (refiner policy, logging)
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Export results to JSON file
    #[clap(long, value_name = "FILE")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, source) =
        resolve_config(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging)?;

    info!(
        "wiform-eval v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    source.log();

    let suite = EvalSuite::from_path(&args.suite).context("Failed to load suite")?;
    info!(cases = suite.cases.len(), "Suite loaded");

    let engine = FormEngine::with_config(&config.refiner);
    let result = run_suite(&engine, &suite);

    print_result(&result);

    if let Some(path) = &args.export {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write results to {}", path.display()))?;
        info!(path = %path.display(), "Results exported");
    }

    Ok(())
}

fn print_result(result: &SuiteResult) {
    let rule = "=".repeat(80);
    println!("{rule}");
    println!("GROUND-TRUTH EVALUATION");
    println!("{rule}");

    for case in &result.cases {
        let fields = &case.fields;
        println!("\n{}", case.name);
        println!(
            "   Field accuracy: {:.1}% ({}/{})",
            fields.accuracy, fields.correct, fields.total
        );
        println!(
            "   Validation: {} (accuracy score {:.1})",
            if case.valid { "valid" } else { "invalid" },
            case.accuracy_score
        );

        if fields.mismatches.is_empty() {
            println!("   All fields match ground truth");
        } else {
            println!("   Field mismatches (expected vs actual):");
            for m in &fields.mismatches {
                println!(
                    "      - {}: expected='{}' | actual='{}' (similarity {:.2})",
                    m.field, m.expected, m.actual, m.similarity
                );
            }
        }
    }

    println!("\n{rule}");
    println!(
        "Total correct fields: {}/{}",
        result.overall_correct, result.overall_total
    );
    println!("Overall accuracy: {:.1}%", result.overall_accuracy);
    println!("{rule}");
}
