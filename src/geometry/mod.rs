//! Pairwise geometry between annotated instances.
//!
//! IoU is computed on axis-aligned boxes in normalized center+size form,
//! the only geometry the label format can express. Everything here is
//! plain `f64` math on small copies; no allocation beyond the overlap
//! list itself.

use crate::core::types::BBox;

/// IoU above which a pair of instances is flagged as a probable
/// duplicate annotation.
pub const OVERLAP_THRESHOLD: f64 = 0.5;

/// A pair of instances whose boxes overlap beyond [`OVERLAP_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlap {
    /// Zero-based index of the first box.
    pub first: usize,
    /// Zero-based index of the second box.
    pub second: usize,
    /// The pair's intersection-over-union.
    pub iou: f64,
}

/// Intersection-over-union of two normalized center+size boxes.
///
/// Boxes are converted to corner form; the intersection extent is
/// clamped at zero, so disjoint pairs yield exactly 0.0. Identical boxes
/// yield 1.0. The union cannot be zero for positive-size boxes, but a
/// degenerate pair returns 0.0 rather than dividing by zero.
pub fn calculate_iou(a: &BBox, b: &BBox) -> f64 {
    let ca = a.to_corners();
    let cb = b.to_corners();

    let iw = (ca.x2.min(cb.x2) - ca.x1.max(cb.x1)).max(0.0);
    let ih = (ca.y2.min(cb.y2) - ca.y1.max(cb.y1)).max(0.0);
    let intersection = iw * ih;

    let union = a.area() + b.area() - intersection;
    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

/// Scan every unordered pair of boxes for high overlap.
///
/// O(n²), which is fine at per-image instance counts (single digits to
/// low tens).
pub fn find_overlaps(boxes: &[BBox]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for i in 0..boxes.len() {
        for j in (i + 1)..boxes.len() {
            let iou = calculate_iou(&boxes[i], &boxes[j]);
            if iou > OVERLAP_THRESHOLD {
                overlaps.push(Overlap {
                    first: i,
                    second: j,
                    iou,
                });
            }
        }
    }
    overlaps
}
