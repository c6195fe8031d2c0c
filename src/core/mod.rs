//! Shared foundation: value types, errors, and the diagnostic model.

pub mod error;
pub mod types;

pub use error::{
    Diagnostic, IssueCategory, ParikshaError, ParikshaResult, Severity, ValidationReport,
};
pub use types::{BBox, Corners, Keypoint, Split};
