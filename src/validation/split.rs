//! Per-split reconciliation of images against label files.

use crate::core::error::{Diagnostic, IssueCategory};
use crate::core::types::Split;
use crate::labels;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image extensions paired with label files, matched exactly.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Label file extension.
pub const LABEL_EXTENSION: &str = "txt";

/// Statistics gathered while validating one split.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Which split these numbers describe.
    pub split: Split,
    /// Images found in the split.
    pub images: usize,
    /// Label files found in the split.
    pub labels: usize,
    /// Images with no matching label file.
    pub missing_labels: usize,
    /// Label files with no matching image.
    pub orphaned_labels: usize,
    /// Label files that passed every check.
    pub valid_labels: usize,
    /// Total annotated instances across valid label files.
    pub instances: usize,
    /// Instances carrying keypoints, across valid label files.
    pub pose_instances: usize,
}

impl SplitSummary {
    fn new(split: Split) -> Self {
        Self {
            split,
            images: 0,
            labels: 0,
            missing_labels: 0,
            orphaned_labels: 0,
            valid_labels: 0,
            instances: 0,
            pose_instances: 0,
        }
    }

    /// Share of instances carrying keypoints, in percent.
    pub fn pose_percent(&self) -> f64 {
        self.pose_instances as f64 / self.instances.max(1) as f64 * 100.0
    }
}

/// Reconcile one split's image and label trees and validate every label
/// file found.
///
/// Stems (file names without extension) pair an image with its label
/// file. Unmatched images are an error; unmatched labels are only a
/// warning, since a label may be pre-staged for an image not yet added.
/// This stage never aborts the run; splits with zero files still produce
/// a summary, and a split whose directories are absent records nothing
/// here (the structure stage already reported it).
pub fn check_split(root: &Path, split: Split, num_classes: i64) -> (SplitSummary, Vec<Diagnostic>) {
    let mut summary = SplitSummary::new(split);
    let mut diagnostics = Vec::new();

    let images_dir = root.join("images").join(split.as_str());
    let labels_dir = root.join("labels").join(split.as_str());
    if !images_dir.is_dir() || !labels_dir.is_dir() {
        return (summary, diagnostics);
    }

    let images = index_stems(&images_dir, &IMAGE_EXTENSIONS);
    let label_files = index_stems(&labels_dir, &[LABEL_EXTENSION]);
    summary.images = images.len();
    summary.labels = label_files.len();
    log::debug!(
        "{split}: {} images, {} labels",
        images.len(),
        label_files.len()
    );

    let missing: Vec<&str> = images
        .keys()
        .filter(|stem| !label_files.contains_key(*stem))
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        summary.missing_labels = missing.len();
        let examples = missing[..missing.len().min(5)].join(", ");
        diagnostics.push(Diagnostic::error(
            IssueCategory::MissingLabels,
            format!(
                "{split}: {} images without labels (e.g. {examples})",
                missing.len()
            ),
        ));
    }

    let orphaned = label_files
        .keys()
        .filter(|stem| !images.contains_key(*stem))
        .count();
    if orphaned > 0 {
        summary.orphaned_labels = orphaned;
        diagnostics.push(Diagnostic::warning(
            IssueCategory::OrphanedLabels,
            format!("{split}: {orphaned} labels without images"),
        ));
    }

    for path in label_files.values() {
        let check = labels::check_label_file(path, num_classes, split);
        let valid = check.issues.is_empty();
        diagnostics.extend(check.diagnostics);
        if valid {
            summary.valid_labels += 1;
            summary.instances += check.instances;
            summary.pose_instances += check.pose_instances;
        }
    }

    (summary, diagnostics)
}

/// Map file stems to paths for entries with one of the given extensions,
/// one directory level deep. The map is ordered, so later diagnostics
/// come out in a stable order regardless of readdir order.
fn index_stems(dir: &Path, extensions: &[&str]) -> BTreeMap<String, PathBuf> {
    let mut stems = BTreeMap::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        let path = entry.path();
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        if !extensions.contains(&extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            stems.insert(stem.to_string(), path.to_path_buf());
        }
    }
    stems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Severity;
    use std::fs;

    fn split_dirs(root: &Path, split: &str) -> (PathBuf, PathBuf) {
        let images = root.join("images").join(split);
        let labels = root.join("labels").join(split);
        fs::create_dir_all(&images).expect("create image dir");
        fs::create_dir_all(&labels).expect("create label dir");
        (images, labels)
    }

    #[test]
    fn test_missing_labels_counted_once() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (images, labels) = split_dirs(dir.path(), "train");
        fs::write(images.join("a.jpg"), "").expect("touch image");
        fs::write(images.join("b.jpg"), "").expect("touch image");
        fs::write(labels.join("a.txt"), "0 0.5 0.5 0.3 0.2\n").expect("write label");

        let (summary, diagnostics) = check_split(dir.path(), Split::Train, 1);
        assert_eq!(summary.missing_labels, 1);

        let errors: Vec<_> = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, IssueCategory::MissingLabels);
        assert!(errors[0].message.contains("1 images without labels"));
        assert!(errors[0].message.contains("b"));
    }

    #[test]
    fn test_orphaned_labels_are_warnings() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (_images, labels) = split_dirs(dir.path(), "val");
        fs::write(labels.join("extra.txt"), "0 0.5 0.5 0.3 0.2\n").expect("write label");

        let (summary, diagnostics) = check_split(dir.path(), Split::Val, 1);
        assert_eq!(summary.orphaned_labels, 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].category, IssueCategory::OrphanedLabels);
    }

    #[test]
    fn test_instance_tallies_only_count_valid_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (images, labels) = split_dirs(dir.path(), "train");
        for stem in ["a", "b"] {
            fs::write(images.join(format!("{stem}.jpg")), "").expect("touch image");
        }
        fs::write(
            labels.join("a.txt"),
            "0 0.2 0.2 0.1 0.1\n0 0.8 0.8 0.1 0.1 0.75 0.75 1 0.85 0.75 1 0.85 0.85 1 0.75 0.85 1\n",
        )
        .expect("write label");
        fs::write(labels.join("b.txt"), "7 0.5 0.5 0.3 0.2\n").expect("write label");

        let (summary, _diagnostics) = check_split(dir.path(), Split::Train, 1);
        assert_eq!(summary.labels, 2);
        assert_eq!(summary.valid_labels, 1);
        assert_eq!(summary.instances, 2);
        assert_eq!(summary.pose_instances, 1);
        assert!((summary.pose_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_pose_percent_of_empty_split_is_zero() {
        let summary = SplitSummary::new(Split::Train);
        assert_eq!(summary.pose_percent(), 0.0);
    }

    #[test]
    fn test_unrelated_extensions_ignored() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (images, labels) = split_dirs(dir.path(), "train");
        fs::write(images.join("a.bmp"), "").expect("touch image");
        fs::write(images.join("notes.md"), "").expect("touch file");
        fs::write(labels.join("a.json"), "{}").expect("write file");

        let (summary, diagnostics) = check_split(dir.path(), Split::Train, 1);
        assert_eq!(summary.images, 0);
        assert_eq!(summary.labels, 0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_absent_directories_record_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let (summary, diagnostics) = check_split(dir.path(), Split::Train, 1);
        assert_eq!(summary.images, 0);
        assert!(diagnostics.is_empty());
    }
}
