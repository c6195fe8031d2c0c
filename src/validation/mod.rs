//! The validation pipeline: structure, schema, splits, report.
//!
//! Stages run in strict dependency order and append diagnostics to a
//! single report. The first two stages gate the rest: every later check
//! assumes the directory layout exists and the config parsed.

pub mod pipeline;
pub mod report;
pub mod split;

pub use pipeline::{DatasetValidator, REQUIRED_DIRS};
pub use report::{format_report, format_split_summary, JsonReport};
pub use split::{check_split, SplitSummary};
