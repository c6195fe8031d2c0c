//! Pipeline orchestration.

use crate::core::error::{Diagnostic, IssueCategory, ValidationReport};
use crate::core::types::Split;
use crate::labels;
use crate::schema::{self, DatasetConfig, CONFIG_FILE};
use crate::validation::split::{check_split, SplitSummary};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Sub-directories every dataset root must contain.
pub const REQUIRED_DIRS: [&str; 4] = [
    "images/train",
    "images/val",
    "labels/train",
    "labels/val",
];

/// Multi-stage dataset validator.
///
/// One instance per dataset root. Each stage appends its diagnostic
/// batch to the owned report in discovery order; nothing is ever removed
/// or reordered. [`DatasetValidator::validate`] runs the stages in
/// dependency order and short-circuits on the two gating conditions
/// (missing directories, unreadable config).
#[derive(Debug)]
pub struct DatasetValidator {
    root: PathBuf,
    report: ValidationReport,
    splits: Vec<SplitSummary>,
}

impl DatasetValidator {
    /// Create a validator for the dataset at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            report: ValidationReport::new(),
            splits: Vec::new(),
        }
    }

    /// Dataset root this validator reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accumulated report.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Errors recorded so far, in discovery order.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.report.errors
    }

    /// Warnings recorded so far, in discovery order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.report.warnings
    }

    /// Per-split statistics gathered so far.
    pub fn split_summaries(&self) -> &[SplitSummary] {
        &self.splits
    }

    /// Stage 1: required directory layout.
    ///
    /// Returns true only if all four split directories exist. Later
    /// stages assume they do, so a failure here gates the whole run.
    pub fn check_structure(&mut self) -> bool {
        let mut ok = true;
        for rel in REQUIRED_DIRS {
            if !self.root.join(rel).is_dir() {
                self.report.add_error(
                    IssueCategory::MissingDirectory,
                    format!("Missing directory: {rel}"),
                );
                ok = false;
            }
        }
        ok
    }

    /// Stage 2: load and check `data.yaml`.
    ///
    /// `None` only for the hard gates (absent or unparsable file). A
    /// config with missing or inconsistent fields is returned for
    /// best-effort downstream use, with its problems recorded.
    pub fn load_config(&mut self) -> Option<DatasetConfig> {
        let path = self.root.join(CONFIG_FILE);
        if !path.is_file() {
            self.report
                .add_error(IssueCategory::MissingConfig, "Missing data.yaml");
            return None;
        }

        let config = match schema::read_config(&path) {
            Ok(config) => config,
            Err(err) => {
                self.report.add_error(
                    IssueCategory::ConfigParse,
                    format!("Failed to parse data.yaml: {err}"),
                );
                return None;
            }
        };

        for diagnostic in schema::check_config(&config) {
            self.report.add(diagnostic);
        }
        Some(config)
    }

    /// Stage 3: reconcile and validate one split.
    pub fn validate_split(&mut self, split: Split, config: &DatasetConfig) {
        let (summary, diagnostics) = check_split(&self.root, split, config.num_classes());
        for diagnostic in diagnostics {
            self.report.add(diagnostic);
        }
        self.splits.push(summary);
    }

    /// Validate a single label file, merging its diagnostics into the
    /// report and returning the issue categories found.
    pub fn validate_label_file(
        &mut self,
        path: &Path,
        num_classes: i64,
        split: Split,
    ) -> BTreeSet<IssueCategory> {
        let check = labels::check_label_file(path, num_classes, split);
        for diagnostic in check.diagnostics {
            self.report.add(diagnostic);
        }
        check.issues
    }

    /// Run every stage in order.
    ///
    /// Returns false as soon as a gating stage fails; otherwise both
    /// splits are validated unconditionally and the run passes only with
    /// zero errors.
    pub fn validate(&mut self) -> bool {
        log::info!("validating dataset at {}", self.root.display());

        if !self.check_structure() {
            return false;
        }
        let config = match self.load_config() {
            Some(config) => config,
            None => return false,
        };

        for split in Split::ALL {
            self.validate_split(split, &config);
        }

        log::info!("{}", self.report.summary());
        self.report.passed()
    }
}
