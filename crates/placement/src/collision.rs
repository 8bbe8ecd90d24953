//! Box intersection and clearance between module bounding boxes.

use crate::bounds::BoundingBox;
use crate::vector::distance_3d;

/// True when the boxes overlap on all three axes. Touching boxes intersect.
pub fn bounding_boxes_intersect(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.min.x <= b.max.x
        && a.max.x >= b.min.x
        && a.min.y <= b.max.y
        && a.max.y >= b.min.y
        && a.min.z <= b.max.z
        && a.max.z >= b.min.z
}

/// Conservative separation estimate between two boxes.
///
/// Each box is treated as the sphere around its half-diagonal, so the result
/// underestimates the true gap. It only feeds threshold comparisons.
pub fn minimum_distance(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let center_distance = distance_3d(a.center(), b.center());
    (center_distance - a.extent() - b.extent()).max(0.0)
}

/// True when the estimated gap is at least `min_clearance`.
pub fn check_clearance(a: &BoundingBox, b: &BoundingBox, min_clearance: f64) -> bool {
    minimum_distance(a, b) >= min_clearance
}

/// Corridor width between two modules, as reported to walkway dashboards.
pub fn calculate_walkway_width(a: &BoundingBox, b: &BoundingBox) -> f64 {
    minimum_distance(a, b)
}
