//! Terminal and JSON rendering of a validation run.
//!
//! Rendering is the only place diagnostics turn into human-facing text;
//! the library itself never prints.

use crate::core::error::ValidationReport;
use crate::validation::split::SplitSummary;
use serde::Serialize;

/// Maximum diagnostics of each severity shown in the textual report.
pub const MAX_SHOWN: usize = 20;

/// Render the final report block.
///
/// Errors first, then warnings, each capped at [`MAX_SHOWN`] with a
/// remainder count, then a one-paragraph verdict.
pub fn format_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    out.push_str(&format!("{rule}\n"));
    out.push_str("VALIDATION REPORT\n");
    out.push_str(&format!("{rule}\n"));

    if !report.errors.is_empty() {
        out.push_str(&format!("\n❌ {} ERRORS:\n", report.errors.len()));
        for (index, diagnostic) in report.errors.iter().take(MAX_SHOWN).enumerate() {
            out.push_str(&format!("  {}. {diagnostic}\n", index + 1));
        }
        if report.errors.len() > MAX_SHOWN {
            out.push_str(&format!(
                "  ... and {} more errors\n",
                report.errors.len() - MAX_SHOWN
            ));
        }
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!("\n⚠️  {} WARNINGS:\n", report.warnings.len()));
        for (index, diagnostic) in report.warnings.iter().take(MAX_SHOWN).enumerate() {
            out.push_str(&format!("  {}. {diagnostic}\n", index + 1));
        }
        if report.warnings.len() > MAX_SHOWN {
            out.push_str(&format!(
                "  ... and {} more warnings\n",
                report.warnings.len() - MAX_SHOWN
            ));
        }
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        out.push_str("\n✅ Dataset validation passed!\n");
        out.push_str("   No errors or warnings found.\n");
        out.push_str("   Dataset is ready for training!\n");
    } else if report.errors.is_empty() {
        out.push_str("\n✅ No errors found!\n");
        out.push_str("   Warnings can usually be ignored or are informational.\n");
        out.push_str("   Dataset is ready for training.\n");
    } else {
        out.push_str("\n❌ Validation failed!\n");
        out.push_str("   Fix errors before training.\n");
        out.push_str("   Training on invalid data will fail or produce poor results.\n");
    }

    out.push_str(&format!("{rule}\n"));
    out
}

/// Render one split's statistics block.
pub fn format_split_summary(summary: &SplitSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n🔍 {} split:\n", summary.split));
    out.push_str(&format!("  Images: {}\n", summary.images));
    out.push_str(&format!("  Labels: {}\n", summary.labels));
    if summary.missing_labels > 0 {
        out.push_str(&format!(
            "  ❌ {} images without labels\n",
            summary.missing_labels
        ));
    }
    if summary.orphaned_labels > 0 {
        out.push_str(&format!(
            "  ⚠️  {} labels without images\n",
            summary.orphaned_labels
        ));
    }
    out.push_str(&format!(
        "  ✓ Valid labels: {}/{}\n",
        summary.valid_labels, summary.labels
    ));
    out.push_str(&format!("  ✓ Total instances: {}\n", summary.instances));
    out.push_str(&format!(
        "  ✓ Instances with pose: {} ({:.1}%)\n",
        summary.pose_instances,
        summary.pose_percent()
    ));
    out
}

/// Machine-readable report document for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// True when no errors were recorded.
    pub passed: bool,
    /// The accumulated diagnostics.
    #[serde(flatten)]
    pub report: &'a ValidationReport,
    /// Per-split statistics.
    pub splits: &'a [SplitSummary],
}

impl<'a> JsonReport<'a> {
    /// Build the document from a finished run.
    pub fn new(report: &'a ValidationReport, splits: &'a [SplitSummary]) -> Self {
        Self {
            passed: report.passed(),
            report,
            splits,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{Diagnostic, IssueCategory};
    use crate::core::types::Split;

    #[test]
    fn test_clean_pass_verdict() {
        let report = ValidationReport::new();
        let text = format_report(&report);
        assert!(text.contains("VALIDATION REPORT"));
        assert!(text.contains("Dataset validation passed!"));
        assert!(!text.contains("ERRORS"));
    }

    #[test]
    fn test_pass_with_warnings_verdict() {
        let mut report = ValidationReport::new();
        report.add(Diagnostic::warning(IssueCategory::Overlap, "close boxes"));
        let text = format_report(&report);
        assert!(text.contains("1 WARNINGS:"));
        assert!(text.contains("No errors found!"));
    }

    #[test]
    fn test_failure_verdict() {
        let mut report = ValidationReport::new();
        report.add(Diagnostic::error(IssueCategory::Format, "bad line"));
        let text = format_report(&report);
        assert!(text.contains("1 ERRORS:"));
        assert!(text.contains("Validation failed!"));
    }

    #[test]
    fn test_errors_capped_with_remainder() {
        let mut report = ValidationReport::new();
        for index in 0..25 {
            report.add(Diagnostic::error(
                IssueCategory::Format,
                format!("bad line {index}"),
            ));
        }
        let text = format_report(&report);
        assert!(text.contains("25 ERRORS:"));
        assert!(text.contains("  20. "));
        assert!(!text.contains("  21. "));
        assert!(text.contains("... and 5 more errors"));
    }

    #[test]
    fn test_split_summary_block() {
        let summary = SplitSummary {
            split: Split::Train,
            images: 4,
            labels: 4,
            missing_labels: 0,
            orphaned_labels: 1,
            valid_labels: 4,
            instances: 6,
            pose_instances: 3,
        };
        let text = format_split_summary(&summary);
        assert!(text.contains("train split:"));
        assert!(text.contains("Valid labels: 4/4"));
        assert!(text.contains("(50.0%)"));
        assert!(text.contains("1 labels without images"));
    }

    #[test]
    fn test_json_document_shape() {
        let mut report = ValidationReport::new();
        report.add(Diagnostic::error(IssueCategory::Class, "bad class"));
        let document = JsonReport::new(&report, &[]);
        let rendered = document.to_json().expect("serialize report");

        let value: serde_json::Value = serde_json::from_str(&rendered).expect("parse json");
        assert_eq!(value["passed"], false);
        assert_eq!(value["errors"][0]["category"], "class");
        assert!(value["splits"].as_array().expect("splits array").is_empty());
    }
}
