//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use crate::vector::{Vector3D, serde_xyz};

/// Axis-aligned bounding box with `min <= max` on every axis.
///
/// Degenerate boxes (`min == max` on some axis) are legal and have zero volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(with = "serde_xyz")]
    pub min: Vector3D,
    #[serde(with = "serde_xyz")]
    pub max: Vector3D,
}

impl BoundingBox {
    pub fn new(min: Vector3D, max: Vector3D) -> Self {
        Self { min, max }
    }

    /// Box of `size` centered on `center`.
    pub fn from_center(center: Vector3D, size: Vector3D) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inverted box that any `include_point` call replaces.
    pub fn empty() -> Self {
        Self {
            min: Vector3D::splat(f64::MAX),
            max: Vector3D::splat(f64::MIN),
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vector3D>) -> Option<Self> {
        let mut bounds = Self::empty();
        let mut any = false;
        for point in points {
            bounds.include_point(point);
            any = true;
        }
        any.then_some(bounds)
    }

    pub fn include_point(&mut self, point: Vector3D) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vector3D {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3D {
        self.max - self.min
    }

    /// Half of the box diagonal, `|max - min| / 2`.
    pub fn extent(&self) -> f64 {
        self.size().length() * 0.5
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    pub fn contains_point(&self, point: Vector3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// The eight corners. Bit 0 picks max x, bit 1 max y, bit 2 max z.
    pub fn corners(&self) -> [Vector3D; 8] {
        std::array::from_fn(|i| {
            Vector3D::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }
}

pub fn create_bounding_box(min: Vector3D, max: Vector3D) -> BoundingBox {
    BoundingBox::new(min, max)
}

pub fn create_bounding_box_from_center(center: Vector3D, size: Vector3D) -> BoundingBox {
    BoundingBox::from_center(center, size)
}

pub fn bounding_box_volume(bounds: &BoundingBox) -> f64 {
    bounds.volume()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let bounds = create_bounding_box_from_center(
            Vector3D::new(1.0, 2.0, 3.0),
            Vector3D::new(2.0, 4.0, 6.0),
        );
        assert_eq!(bounds.min, Vector3D::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vector3D::new(2.0, 4.0, 6.0));
        assert_eq!(bounds.center(), Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(bounding_box_volume(&bounds), 48.0);
    }

    #[test]
    fn test_degenerate_box_has_zero_volume() {
        let point = Vector3D::splat(1.0);
        let bounds = create_bounding_box(point, point);
        assert_eq!(bounds.volume(), 0.0);
        assert_eq!(bounds.extent(), 0.0);
        assert!(bounds.contains_point(point));

        let flat = create_bounding_box(Vector3D::ZERO, Vector3D::new(2.0, 0.0, 2.0));
        assert_eq!(flat.volume(), 0.0);
    }

    #[test]
    fn test_from_points() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());

        let bounds = BoundingBox::from_points([
            Vector3D::new(-1.0, 0.0, 2.0),
            Vector3D::new(3.0, -2.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vector3D::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vector3D::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_corners_cover_every_combination() {
        let bounds = create_bounding_box(Vector3D::ZERO, Vector3D::ONE);
        let corners = bounds.corners();
        assert_eq!(corners[0], Vector3D::ZERO);
        assert_eq!(corners[7], Vector3D::ONE);
        assert_eq!(corners[5], Vector3D::new(1.0, 0.0, 1.0));
        for corner in corners {
            assert!(bounds.contains_point(corner));
        }
    }

    #[test]
    fn test_union() {
        let a = create_bounding_box(Vector3D::ZERO, Vector3D::ONE);
        let b = create_bounding_box(Vector3D::splat(2.0), Vector3D::splat(3.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vector3D::ZERO);
        assert_eq!(u.max, Vector3D::splat(3.0));
    }

    #[test]
    fn test_json_shape() {
        let bounds = create_bounding_box(Vector3D::ZERO, Vector3D::new(1.0, 2.0, 3.0));
        let json = serde_json::to_value(bounds).unwrap();
        assert_eq!(json["max"]["y"], 2.0);
        let back: BoundingBox = serde_json::from_value(json).unwrap();
        assert_eq!(back, bounds);
    }
}
