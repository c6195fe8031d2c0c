//! Label file parsing and per-annotation validation.
//!
//! YOLO-pose label lines are whitespace-separated ASCII decimal fields,
//! one annotated instance per non-empty row: 5 fields for a bbox-only
//! instance (`class cx cy w h`), 17 for bbox plus four `(x, y,
//! visibility)` keypoints in top-left, top-right, bottom-right,
//! bottom-left order. An empty file is a valid zero-instance image.

pub mod file;
pub mod line;

pub use file::{check_label_file, FileCheck};
pub use line::{check_keypoints, check_line, LineCheck, LineLocation};
