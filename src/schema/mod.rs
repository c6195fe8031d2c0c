//! Dataset schema (`data.yaml`) loading and validation.
//!
//! The config is deserialized leniently: every field is optional and
//! `kpt_shape` is kept as a raw YAML value, so an incomplete or oddly
//! shaped schema produces per-field diagnostics instead of aborting the
//! whole parse. Only an unreadable or syntactically invalid file is a
//! hard failure.

use crate::core::error::{Diagnostic, IssueCategory, ParikshaResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name of the dataset schema at the dataset root.
pub const CONFIG_FILE: &str = "data.yaml";

/// Keypoint layout this validator is specialized to: 4 corner keypoints,
/// 3 values (x, y, visibility) each. Any other cardinality is rejected.
pub const EXPECTED_KPT_SHAPE: [i64; 2] = [4, 3];

/// Declarative dataset configuration parsed from `data.yaml`.
///
/// Loaded once per validation run and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Relative path to the training image directory (informational).
    pub train: Option<String>,
    /// Relative path to the validation image directory (informational).
    pub val: Option<String>,
    /// Declared class count.
    pub nc: Option<i64>,
    /// Ordered class names, one per class.
    pub names: Option<Vec<String>>,
    /// Keypoint layout; raw so malformed shapes can be diagnosed.
    pub kpt_shape: Option<serde_yaml::Value>,
}

impl DatasetConfig {
    /// The declared class count, falling back to the single-class
    /// convention when the field is absent.
    pub fn num_classes(&self) -> i64 {
        self.nc.unwrap_or(1)
    }
}

/// Read and parse the schema file.
pub fn read_config(path: &Path) -> ParikshaResult<DatasetConfig> {
    let raw = fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&raw)?;
    log::debug!("parsed {}", path.display());
    Ok(config)
}

/// Check a parsed config against the schema contract.
///
/// Returns the diagnostic batch; the config stays usable downstream even
/// when fields are missing or inconsistent.
pub fn check_config(config: &DatasetConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let required = [
        ("train", config.train.is_some()),
        ("val", config.val.is_some()),
        ("nc", config.nc.is_some()),
        ("names", config.names.is_some()),
        ("kpt_shape", config.kpt_shape.is_some()),
    ];
    for (field, present) in required {
        if !present {
            diagnostics.push(Diagnostic::error(
                IssueCategory::MissingField,
                format!("data.yaml missing field: {field}"),
            ));
        }
    }

    if let Some(value) = &config.kpt_shape {
        diagnostics.extend(check_kpt_shape(value));
    }

    if let (Some(nc), Some(names)) = (config.nc, config.names.as_ref()) {
        if nc != names.len() as i64 {
            diagnostics.push(Diagnostic::error(
                IssueCategory::ClassCountMismatch,
                format!(
                    "Class count mismatch: nc={nc} but {} names provided",
                    names.len()
                ),
            ));
        }
    }

    // Single-class datasets are the recommended convention, not a hard
    // requirement.
    if let Some(nc) = config.nc {
        if nc != 1 {
            diagnostics.push(Diagnostic::warning(
                IssueCategory::MultiClass,
                format!("Multi-class dataset: nc={nc} (expected 1)"),
            ));
        }
    }

    diagnostics
}

/// A 2-element sequence is required; a 2-element sequence that is not
/// `[4, 3]` (including non-integer elements) is well-formed but wrong.
fn check_kpt_shape(value: &serde_yaml::Value) -> Option<Diagnostic> {
    let rendered = render_yaml(value);
    match value.as_sequence() {
        Some(seq) if seq.len() == 2 => {
            let pair = (seq[0].as_i64(), seq[1].as_i64());
            if pair == (Some(EXPECTED_KPT_SHAPE[0]), Some(EXPECTED_KPT_SHAPE[1])) {
                None
            } else {
                Some(Diagnostic::error(
                    IssueCategory::KptShape,
                    format!("Invalid kpt_shape: {rendered} (expected [4, 3] for base corners)"),
                ))
            }
        }
        _ => Some(Diagnostic::error(
            IssueCategory::KptShapeFormat,
            format!("Invalid kpt_shape format: {rendered} (expected [n_kpts, n_values])"),
        )),
    }
}

/// Compact single-line rendering of a YAML value for messages.
fn render_yaml(value: &serde_yaml::Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unrepresentable>".to_string())
}
