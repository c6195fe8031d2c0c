//! # Pariksha - YOLO-Pose Dataset Validation
//!
//! Pariksha is a pre-flight validator for object-detection-with-keypoints
//! ("pose") training datasets in the Ultralytics YOLO on-disk layout. It
//! catches structural, schema, and per-annotation problems before an
//! expensive training run consumes malformed data.
//!
//! ## What gets checked
//!
//! - **Structure**: the four split directories (`images/{train,val}`,
//!   `labels/{train,val}`) exist
//! - **Schema**: `data.yaml` parses and declares consistent classes and
//!   the expected `[4, 3]` keypoint layout
//! - **Splits**: every image has a label file; label lines are
//!   well-formed bbox or bbox+keypoints records with in-range values
//! - **Geometry**: instance pairs with suspiciously high overlap are
//!   flagged as probable duplicate annotations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pariksha::prelude::*;
//!
//! let mut validator = DatasetValidator::new("backend/yolo_dataset");
//! let passed = validator.validate();
//!
//! println!("{}", format_report(validator.report()));
//! assert!(passed);
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: shared value types, errors, and the diagnostic model
//! - [`schema`]: `data.yaml` loading and schema checks
//! - [`labels`]: per-line and per-file label validation
//! - [`geometry`]: pairwise IoU and overlap detection
//! - [`validation`]: the staged pipeline, split reconciliation, and
//!   report rendering
//!
//! Every diagnostic carries a closed [`core::error::IssueCategory`] tag,
//! so callers assert on the *kind* of a failure instead of matching
//! message prose. Errors fail the run; warnings are advisory.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod geometry;
pub mod labels;
pub mod schema;
pub mod validation;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use pariksha::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{BBox, Corners, Keypoint, Split};

    // Errors and diagnostics
    pub use crate::core::error::{
        Diagnostic, IssueCategory, ParikshaError, ParikshaResult, Severity, ValidationReport,
    };

    // Schema
    pub use crate::schema::{
        check_config, read_config, DatasetConfig, CONFIG_FILE, EXPECTED_KPT_SHAPE,
    };

    // Labels
    pub use crate::labels::{
        check_keypoints, check_label_file, check_line, FileCheck, LineCheck, LineLocation,
    };

    // Geometry
    pub use crate::geometry::{calculate_iou, find_overlaps, Overlap, OVERLAP_THRESHOLD};

    // Validation
    pub use crate::validation::pipeline::{DatasetValidator, REQUIRED_DIRS};
    pub use crate::validation::report::{
        format_report, format_split_summary, JsonReport, MAX_SHOWN,
    };
    pub use crate::validation::split::{
        check_split, SplitSummary, IMAGE_EXTENSIONS, LABEL_EXTENSION,
    };
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
