//! Core value types shared across the validation pipeline.
//!
//! Everything here lives in normalized image space: coordinates are
//! fractions of image width/height in `[0, 1]`, matching the YOLO label
//! wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field count of a bbox-only label line (`class cx cy w h`).
pub const BBOX_FIELDS: usize = 5;

/// Field count of a bbox + keypoints (pose) label line.
pub const POSE_FIELDS: usize = 17;

/// Keypoints a pose instance carries, in top-left, top-right,
/// bottom-right, bottom-left order.
pub const KEYPOINT_COUNT: usize = 4;

/// Values per keypoint (x, y, visibility).
pub const KEYPOINT_VALUES: usize = 3;

/// One partition of the dataset with parallel image/label sub-trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// Training partition (`images/train` + `labels/train`).
    Train,
    /// Validation partition (`images/val` + `labels/val`).
    Val,
}

impl Split {
    /// Both splits, in the order the pipeline visits them.
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    /// Directory name of this split.
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned bounding box in normalized center+size form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Center x, as a fraction of image width.
    pub cx: f64,
    /// Center y, as a fraction of image height.
    pub cy: f64,
    /// Width; must be positive for a valid instance.
    pub w: f64,
    /// Height; must be positive for a valid instance.
    pub h: f64,
}

impl BBox {
    /// Create a box from center+size components.
    pub fn new(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self { cx, cy, w, h }
    }

    /// Convert to corner form.
    pub fn to_corners(&self) -> Corners {
        Corners {
            x1: self.cx - self.w / 2.0,
            y1: self.cy - self.h / 2.0,
            x2: self.cx + self.w / 2.0,
            y2: self.cy + self.h / 2.0,
        }
    }

    /// Box area in normalized units.
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Corner form of a bounding box (min corner, max corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    /// Left edge.
    pub x1: f64,
    /// Top edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Bottom edge.
    pub y2: f64,
}

/// A single annotated keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// X coordinate, as a fraction of image width.
    pub x: f64,
    /// Y coordinate, as a fraction of image height.
    pub y: f64,
    /// Visibility flag, restricted to exactly 0 or 1.
    pub visibility: f64,
}
