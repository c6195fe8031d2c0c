//! Whole-file label validation.

use crate::core::error::{Diagnostic, IssueCategory};
use crate::core::types::{BBox, Split, BBOX_FIELDS};
use crate::geometry;
use crate::labels::line::{check_line, LineLocation};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Outcome of checking one label file.
///
/// An empty issue set means the file is fully valid.
#[derive(Debug, Default)]
pub struct FileCheck {
    /// Categories of every issue found in the file.
    pub issues: BTreeSet<IssueCategory>,
    /// Diagnostics in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    /// Annotated instances (non-empty lines).
    pub instances: usize,
    /// Instances using the 17-field pose form.
    pub pose_instances: usize,
}

/// Validate one label file.
///
/// An unreadable file yields a single `read_error` issue and aborts only
/// this file's checks. An empty file is valid and contributes zero
/// instances. Lines are evaluated independently; after all lines, files
/// holding more than one instance get a pairwise overlap pass.
pub fn check_label_file(path: &Path, num_classes: i64, split: Split) -> FileCheck {
    let mut check = FileCheck::default();
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("<label file>");

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            check.issues.insert(IssueCategory::ReadError);
            check.diagnostics.push(Diagnostic::error(
                IssueCategory::ReadError,
                format!("{split}/{file_name}: Failed to read file: {err}"),
            ));
            return check;
        }
    };

    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return check;
    }

    for (index, line) in lines.iter().enumerate() {
        let at = LineLocation {
            split,
            file_name,
            line: index + 1,
        };
        let line_check = check_line(line, num_classes, at);
        if line_check.pose {
            check.pose_instances += 1;
        }
        check.issues.extend(line_check.issues);
        check.diagnostics.extend(line_check.diagnostics);
    }
    check.instances = lines.len();

    if lines.len() > 1 {
        for overlap in geometry::find_overlaps(&collect_boxes(&lines)) {
            check.issues.insert(IssueCategory::Overlap);
            check.diagnostics.push(Diagnostic::warning(
                IssueCategory::Overlap,
                format!(
                    "{split}/{file_name} - High overlap ({:.0}%) between instances {} and {} - verify not duplicate",
                    overlap.iou * 100.0,
                    overlap.first + 1,
                    overlap.second + 1,
                ),
            ));
        }
    }

    check
}

/// Boxes for the overlap pass: any line carrying at least the bbox
/// fields, when all four coordinates parse. Lines that fail are
/// excluded; their errors are already recorded.
fn collect_boxes(lines: &[&str]) -> Vec<BBox> {
    lines
        .iter()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < BBOX_FIELDS {
                return None;
            }
            let cx = fields[1].parse().ok()?;
            let cy = fields[2].parse().ok()?;
            let w = fields[3].parse().ok()?;
            let h = fields[4].parse().ok()?;
            Some(BBox::new(cx, cy, w, h))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Severity;

    fn write_label(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("img1.txt");
        fs::write(&path, contents).expect("write label file");
        (dir, path)
    }

    #[test]
    fn test_empty_file_is_valid() {
        let (_dir, path) = write_label("");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(check.issues.is_empty());
        assert_eq!(check.instances, 0);
    }

    #[test]
    fn test_blank_lines_do_not_count() {
        let (_dir, path) = write_label("\n   \n\n");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(check.issues.is_empty());
        assert_eq!(check.instances, 0);
    }

    #[test]
    fn test_valid_file_tallies_instances() {
        let (_dir, path) = write_label(
            "0 0.2 0.2 0.1 0.1\n0 0.8 0.8 0.1 0.1 0.75 0.75 1 0.85 0.75 1 0.85 0.85 1 0.75 0.85 0\n",
        );
        let check = check_label_file(&path, 1, Split::Val);
        assert!(check.issues.is_empty());
        assert_eq!(check.instances, 2);
        assert_eq!(check.pose_instances, 1);
    }

    #[test]
    fn test_unreadable_file_short_circuits() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent.txt");
        let check = check_label_file(&path, 1, Split::Train);
        assert_eq!(
            check.issues.iter().copied().collect::<Vec<_>>(),
            vec![IssueCategory::ReadError]
        );
        assert_eq!(check.diagnostics.len(), 1);
        assert_eq!(check.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_overlapping_instances_flagged() {
        let (_dir, path) = write_label("0 0.5 0.5 0.2 0.2\n0 0.52 0.52 0.2 0.2\n");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(check.issues.contains(&IssueCategory::Overlap));
        let overlap = check
            .diagnostics
            .iter()
            .find(|d| d.category == IssueCategory::Overlap)
            .expect("overlap diagnostic");
        assert_eq!(overlap.severity, Severity::Warning);
        assert!(overlap.message.contains("instances 1 and 2"));
    }

    #[test]
    fn test_single_instance_never_overlaps() {
        let (_dir, path) = write_label("0 0.5 0.5 0.2 0.2\n");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(!check.issues.contains(&IssueCategory::Overlap));
    }

    #[test]
    fn test_line_issues_accumulate_per_file() {
        let (_dir, path) = write_label("0 0.5 0.5 0.2 0.2\n0 0.5 0.5 0.3\n");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(check.issues.contains(&IssueCategory::Format));
        assert_eq!(check.instances, 2);
    }

    #[test]
    fn test_overlap_pass_sees_boxes_from_malformed_lines() {
        // The 6-field line is a format error, but its bbox fields parse,
        // so the overlap pass still considers it.
        let (_dir, path) = write_label("0 0.5 0.5 0.2 0.2 9\n0 0.52 0.52 0.2 0.2\n");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(check.issues.contains(&IssueCategory::Format));
        assert!(check.issues.contains(&IssueCategory::Overlap));
    }

    #[test]
    fn test_unparsable_boxes_excluded_from_overlap() {
        let (_dir, path) = write_label("0 x 0.5 0.2 0.2\n0 0.52 0.52 0.2 0.2\n");
        let check = check_label_file(&path, 1, Split::Train);
        assert!(check.issues.contains(&IssueCategory::BboxParse));
        assert!(!check.issues.contains(&IssueCategory::Overlap));
    }
}
