//! Single-line semantic checks.
//!
//! Each line is evaluated independently: every applicable issue is
//! recorded before moving on, and a failed check never hides a later
//! one. Only an unusable field count stops a line early.

use crate::core::error::{Diagnostic, IssueCategory};
use crate::core::types::{Keypoint, Split, BBOX_FIELDS, KEYPOINT_COUNT, KEYPOINT_VALUES, POSE_FIELDS};
use std::collections::BTreeSet;
use std::fmt;

/// Where a line lives, for diagnostic message prefixes.
#[derive(Debug, Clone, Copy)]
pub struct LineLocation<'a> {
    /// Split the label file belongs to.
    pub split: Split,
    /// Label file name, without its directory.
    pub file_name: &'a str,
    /// 1-based index among the file's non-empty lines.
    pub line: usize,
}

impl fmt::Display for LineLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.split, self.file_name, self.line)
    }
}

/// Outcome of checking one label line.
#[derive(Debug, Default)]
pub struct LineCheck {
    /// Categories of every issue found on the line.
    pub issues: BTreeSet<IssueCategory>,
    /// Diagnostics in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the line uses the 17-field pose form.
    pub pose: bool,
}

impl LineCheck {
    fn error(&mut self, category: IssueCategory, message: String) {
        self.issues.insert(category);
        self.diagnostics.push(Diagnostic::error(category, message));
    }
}

/// Validate one non-empty label line.
pub fn check_line(raw: &str, num_classes: i64, at: LineLocation<'_>) -> LineCheck {
    let mut check = LineCheck::default();
    let fields: Vec<&str> = raw.split_whitespace().collect();

    if fields.len() != BBOX_FIELDS && fields.len() != POSE_FIELDS {
        check.error(
            IssueCategory::Format,
            format!(
                "{at} - Invalid format: expected 5 (bbox) or 17 (bbox+pose) values, got {}",
                fields.len()
            ),
        );
        return check;
    }
    check.pose = fields.len() == POSE_FIELDS;

    // Class id: a non-negative integer below the declared class count.
    match fields[0].parse::<i64>() {
        Ok(class_id) if class_id < 0 || class_id >= num_classes => {
            check.error(
                IssueCategory::Class,
                format!(
                    "{at} - Invalid class ID: {class_id} (must be 0-{})",
                    num_classes - 1
                ),
            );
        }
        Ok(_) => {}
        Err(_) => {
            check.error(
                IssueCategory::Class,
                format!("{at} - Class ID must be integer, got: {}", fields[0]),
            );
        }
    }

    // Bbox: centers in [0, 1], sizes in (0, 1]. Both range checks run
    // independently so one line can report both problems.
    match parse_floats(&fields[1..BBOX_FIELDS]) {
        Ok(bbox) => {
            let (cx, cy, w, h) = (bbox[0], bbox[1], bbox[2], bbox[3]);
            if !(0.0..=1.0).contains(&cx) || !(0.0..=1.0).contains(&cy) {
                check.error(
                    IssueCategory::BboxCenter,
                    format!("{at} - Bbox center out of range: x={cx:.3}, y={cy:.3} (must be 0-1)"),
                );
            }
            if w <= 0.0 || w > 1.0 || h <= 0.0 || h > 1.0 {
                check.error(
                    IssueCategory::BboxSize,
                    format!("{at} - Bbox size invalid: w={w:.3}, h={h:.3} (must be 0-1, >0)"),
                );
            }
        }
        Err(bad) => {
            check.error(
                IssueCategory::BboxParse,
                format!("{at} - Invalid bbox coordinates: {bad}"),
            );
        }
    }

    // Keypoints: the twelve trailing fields on pose lines.
    if check.pose {
        match parse_floats(&fields[BBOX_FIELDS..]) {
            Ok(values) => {
                let (issues, diagnostics) = check_keypoints(&values, at);
                check.issues.extend(issues);
                check.diagnostics.extend(diagnostics);
            }
            Err(bad) => {
                check.error(
                    IssueCategory::KptParse,
                    format!("{at} - Invalid keypoint data: {bad}"),
                );
            }
        }
    }

    check
}

/// Check a parsed keypoint value slice: coordinate ranges, visibility
/// flags, and the ordering heuristic.
///
/// The slice must hold exactly `4 * 3` values; any other length is a
/// `kpt_count` issue and skips the per-keypoint checks.
pub fn check_keypoints(
    values: &[f64],
    at: LineLocation<'_>,
) -> (BTreeSet<IssueCategory>, Vec<Diagnostic>) {
    let mut issues = BTreeSet::new();
    let mut diagnostics = Vec::new();
    let expected = KEYPOINT_COUNT * KEYPOINT_VALUES;

    if values.len() != expected {
        issues.insert(IssueCategory::KptCount);
        diagnostics.push(Diagnostic::error(
            IssueCategory::KptCount,
            format!(
                "{at} - Invalid keypoint count: {} values (expected {expected})",
                values.len()
            ),
        ));
        return (issues, diagnostics);
    }

    for i in 0..KEYPOINT_COUNT {
        let kpt = Keypoint {
            x: values[i * KEYPOINT_VALUES],
            y: values[i * KEYPOINT_VALUES + 1],
            visibility: values[i * KEYPOINT_VALUES + 2],
        };

        if !(0.0..=1.0).contains(&kpt.x) || !(0.0..=1.0).contains(&kpt.y) {
            issues.insert(IssueCategory::KptCoords);
            diagnostics.push(Diagnostic::error(
                IssueCategory::KptCoords,
                format!(
                    "{at} - Keypoint {i} out of range: ({:.3}, {:.3})",
                    kpt.x, kpt.y
                ),
            ));
        }

        if kpt.visibility != 0.0 && kpt.visibility != 1.0 {
            issues.insert(IssueCategory::KptVisibility);
            diagnostics.push(Diagnostic::error(
                IssueCategory::KptVisibility,
                format!(
                    "{at} - Keypoint {i} invalid visibility: {} (must be 0 or 1)",
                    kpt.visibility
                ),
            ));
        }
    }

    // Ordering heuristic: top-right should not sit left of top-left.
    // Deliberately weak; it only inspects this one corner pair.
    let tl_x = values[0];
    let tr_x = values[KEYPOINT_VALUES];
    if tr_x < tl_x {
        issues.insert(IssueCategory::KptOrder);
        diagnostics.push(Diagnostic::warning(
            IssueCategory::KptOrder,
            format!("{at} - Keypoint order suspicious: TR not right of TL"),
        ));
    }

    (issues, diagnostics)
}

fn parse_floats(fields: &[&str]) -> Result<Vec<f64>, String> {
    fields
        .iter()
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("'{field}' is not a number"))
        })
        .collect()
}
