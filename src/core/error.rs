//! Error types and the diagnostic model for Pariksha.
//!
//! Uses thiserror for structured errors. Failures of the tool itself
//! (I/O, malformed serialization) travel as [`ParikshaError`]; problems
//! *with the dataset* are not Rust errors at all. They accumulate as
//! [`Diagnostic`] values inside a [`ValidationReport`] so a single run
//! can enumerate every issue at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Top-level error type for Pariksha.
#[derive(Error, Debug)]
pub enum ParikshaError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML document could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A report could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Pariksha operations.
pub type ParikshaResult<T> = Result<T, ParikshaError>;

/// Severity of a diagnostic.
///
/// Errors violate a hard invariant: the dataset must not be used for
/// training as-is. Warnings are advisory; training can proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Fatal to the run's "valid" status.
    Error,
    /// Advisory only.
    Warning,
}

/// Closed set of categories a diagnostic can carry.
///
/// The category is attached structurally at creation time so callers and
/// tests assert on the *kind* of a failure without parsing message prose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// A required dataset sub-directory is absent.
    MissingDirectory,
    /// `data.yaml` is absent from the dataset root.
    MissingConfig,
    /// `data.yaml` could not be read or parsed.
    ConfigParse,
    /// A required `data.yaml` field is absent.
    MissingField,
    /// `kpt_shape` is not a 2-element sequence.
    KptShapeFormat,
    /// `kpt_shape` is well-formed but not the expected `[4, 3]`.
    KptShape,
    /// `nc` disagrees with the number of entries in `names`.
    ClassCountMismatch,
    /// More than one class declared.
    MultiClass,
    /// Images without a matching label file.
    MissingLabels,
    /// Label files without a matching image.
    OrphanedLabels,
    /// A label file could not be read.
    ReadError,
    /// Wrong number of fields on a label line.
    Format,
    /// Class id unparsable or out of range.
    Class,
    /// Bbox fields failed to parse as numbers.
    BboxParse,
    /// Bbox center outside `[0, 1]`.
    BboxCenter,
    /// Bbox width or height outside `(0, 1]`.
    BboxSize,
    /// Keypoint fields failed to parse as numbers.
    KptParse,
    /// Wrong number of keypoint values.
    KptCount,
    /// Keypoint coordinate outside `[0, 1]`.
    KptCoords,
    /// Visibility flag other than 0 or 1.
    KptVisibility,
    /// Suspicious keypoint ordering.
    KptOrder,
    /// Two instances overlap beyond the IoU threshold.
    Overlap,
}

impl IssueCategory {
    /// Stable snake_case tag, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::MissingDirectory => "missing_directory",
            IssueCategory::MissingConfig => "missing_config",
            IssueCategory::ConfigParse => "config_parse",
            IssueCategory::MissingField => "missing_field",
            IssueCategory::KptShapeFormat => "kpt_shape_format",
            IssueCategory::KptShape => "kpt_shape",
            IssueCategory::ClassCountMismatch => "class_count_mismatch",
            IssueCategory::MultiClass => "multi_class",
            IssueCategory::MissingLabels => "missing_labels",
            IssueCategory::OrphanedLabels => "orphaned_labels",
            IssueCategory::ReadError => "read_error",
            IssueCategory::Format => "format",
            IssueCategory::Class => "class",
            IssueCategory::BboxParse => "bbox_parse",
            IssueCategory::BboxCenter => "bbox_center",
            IssueCategory::BboxSize => "bbox_size",
            IssueCategory::KptParse => "kpt_parse",
            IssueCategory::KptCount => "kpt_count",
            IssueCategory::KptCoords => "kpt_coords",
            IssueCategory::KptVisibility => "kpt_visibility",
            IssueCategory::KptOrder => "kpt_order",
            IssueCategory::Overlap => "overlap",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Whether this finding blocks training.
    pub severity: Severity,
    /// Structural category tag.
    pub category: IssueCategory,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Create an error-severity diagnostic.
    pub fn error(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category,
            message: message.into(),
        }
    }

    /// Create a warning-severity diagnostic.
    pub fn warning(category: IssueCategory, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Accumulated outcome of a validation run.
///
/// Diagnostics are appended in discovery order and never removed or
/// reordered, so the rendered report reads in the order problems were
/// found.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Hard failures; any entry here fails the run.
    pub errors: Vec<Diagnostic>,
    /// Advisory findings; training can proceed.
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic to the list matching its severity.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Append an error.
    pub fn add_error(&mut self, category: IssueCategory, message: impl Into<String>) {
        self.add(Diagnostic::error(category, message));
    }

    /// Append a warning.
    pub fn add_warning(&mut self, category: IssueCategory, message: impl Into<String>) {
        self.add(Diagnostic::warning(category, message));
    }

    /// True when no errors were recorded.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// One-line human-readable verdict.
    pub fn summary(&self) -> String {
        if self.passed() {
            if self.warnings.is_empty() {
                "✅ Dataset validation passed".to_string()
            } else {
                format!("✅ Dataset valid with {} warning(s)", self.warnings.len())
            }
        } else {
            format!("❌ Validation failed with {} error(s)", self.errors.len())
        }
    }
}
