//! Pariksha CLI - YOLO-Pose Dataset Validation
//!
//! Validates an exported dataset before training so malformed data is
//! caught while it is still cheap to fix.

use anyhow::Context;
use pariksha::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut path: Option<PathBuf> = None;
    let mut json = false;

    for arg in &args[1..] {
        match arg.as_str() {
            "--json" => json = true,
            "help" | "--help" | "-h" => {
                print_usage(&args[0]);
                return ExitCode::SUCCESS;
            }
            other if path.is_none() && !other.starts_with('-') => {
                path = Some(PathBuf::from(other));
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage(&args[0]);
                return ExitCode::FAILURE;
            }
        }
    }

    let Some(path) = path else {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    };

    match run(&path, json) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("❌ {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    println!("Usage: {program} <dataset_path> [--json]");
    println!();
    println!("Validates a YOLO-pose dataset before training.");
    println!();
    println!("Options:");
    println!("  --json    Emit the report as JSON instead of text");
    println!();
    println!("Example: {program} backend/yolo_dataset");
}

fn run(path: &Path, json: bool) -> anyhow::Result<bool> {
    let mut validator = DatasetValidator::new(path);

    if !json {
        println!("🔍 Validating YOLO-pose dataset...");
        println!("Dataset path: {}", path.display());
        println!("{}", "=".repeat(60));
    }

    let passed = validator.validate();

    if json {
        let document = JsonReport::new(validator.report(), validator.split_summaries());
        let rendered = document
            .to_json()
            .context("failed to serialize validation report")?;
        println!("{rendered}");
    } else {
        for summary in validator.split_summaries() {
            print!("{}", format_split_summary(summary));
        }
        println!();
        print!("{}", format_report(validator.report()));
    }

    Ok(passed)
}
