//! Habitat module catalog and placements.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::error::{PlacementError, PlacementResult};
use crate::vector::{Vector3D, serde_xyz};

/// Kind of habitat module. Dimensions come from [`ModuleType::dimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    Sleep,
    Galley,
    Hygiene,
    Exercise,
    Medical,
    Storage,
    Workstation,
    Airlock,
    Eclss,
    Maintenance,
    Recreation,
}

impl ModuleType {
    pub const ALL: [ModuleType; 11] = [
        ModuleType::Sleep,
        ModuleType::Galley,
        ModuleType::Hygiene,
        ModuleType::Exercise,
        ModuleType::Medical,
        ModuleType::Storage,
        ModuleType::Workstation,
        ModuleType::Airlock,
        ModuleType::Eclss,
        ModuleType::Maintenance,
        ModuleType::Recreation,
    ];

    /// Unrotated size in meters: width (X), height (Y), depth (Z).
    pub fn dimensions(&self) -> Vector3D {
        let (w, h, d) = match self {
            ModuleType::Sleep => (2.0, 2.2, 1.0),
            ModuleType::Galley => (3.0, 2.2, 2.0),
            ModuleType::Hygiene => (1.5, 2.2, 1.5),
            ModuleType::Exercise => (3.0, 2.4, 2.0),
            ModuleType::Medical => (2.5, 2.2, 2.0),
            ModuleType::Storage => (2.0, 2.0, 1.5),
            ModuleType::Workstation => (2.0, 2.0, 1.5),
            ModuleType::Airlock => (2.0, 2.4, 2.0),
            ModuleType::Eclss => (2.0, 2.2, 1.5),
            ModuleType::Maintenance => (2.5, 2.2, 2.0),
            ModuleType::Recreation => (3.5, 2.4, 3.0),
        };
        Vector3D::new(w, h, d)
    }

    pub fn volume(&self) -> f64 {
        let size = self.dimensions();
        size.x * size.y * size.z
    }
}

/// One module instance inside the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulePlacement {
    pub id: String,
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    /// Box center
    #[serde(with = "serde_xyz")]
    pub position: Vector3D,
    /// Yaw about the vertical (Y) axis, degrees
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub connections: BTreeSet<String>,
}

impl ModulePlacement {
    pub fn new(id: impl Into<String>, module_type: ModuleType, position: Vector3D) -> Self {
        Self {
            id: id.into(),
            module_type,
            position,
            rotation_deg: 0.0,
            connections: BTreeSet::new(),
        }
    }

    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn with_connection(mut self, other: impl Into<String>) -> Self {
        self.connections.insert(other.into());
        self
    }

    /// World-space bounding box of the rotated module.
    ///
    /// The footprint is rotated about Y, so the X/Z extents grow to enclose
    /// the turned rectangle while the height is unchanged.
    pub fn bounding_box(&self) -> BoundingBox {
        let size = self.module_type.dimensions();
        let (sin, cos) = self.rotation_deg.to_radians().sin_cos();
        let rotated = Vector3D::new(
            (size.x * cos).abs() + (size.z * sin).abs(),
            size.y,
            (size.x * sin).abs() + (size.z * cos).abs(),
        );
        BoundingBox::from_center(self.position, rotated)
    }

    /// Reject placements whose numbers would poison the geometry.
    pub fn validate(&self) -> PlacementResult<()> {
        if !self.position.is_finite() || !self.rotation_deg.is_finite() {
            return Err(PlacementError::NonFinitePlacement {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_dimensions_are_positive() {
        for module_type in ModuleType::ALL {
            let size = module_type.dimensions();
            assert!(size.min_element() > 0.0, "{module_type:?}");
            assert!(module_type.volume() > 0.0);
        }
    }

    #[test]
    fn test_unrotated_bounding_box() {
        let module = ModulePlacement::new("galley-1", ModuleType::Galley, Vector3D::new(1.0, 0.0, 0.0));
        let bounds = module.bounding_box();
        assert_eq!(bounds.center(), Vector3D::new(1.0, 0.0, 0.0));
        assert_eq!(bounds.size(), Vector3D::new(3.0, 2.2, 2.0));
    }

    #[test]
    fn test_quarter_turn_swaps_footprint() {
        let module = ModulePlacement::new("galley-1", ModuleType::Galley, Vector3D::ZERO)
            .with_rotation(90.0);
        let size = module.bounding_box().size();
        assert!((size.x - 2.0).abs() < 1e-9);
        assert!((size.y - 2.2).abs() < 1e-9);
        assert!((size.z - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_rotation_grows_box() {
        let module = ModulePlacement::new("rec", ModuleType::Recreation, Vector3D::ZERO)
            .with_rotation(45.0);
        let size = module.bounding_box().size();
        let expected = (3.5 + 3.0) * std::f64::consts::FRAC_1_SQRT_2;
        assert!((size.x - expected).abs() < 1e-9);
        assert!((size.z - expected).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let ok = ModulePlacement::new("a", ModuleType::Sleep, Vector3D::ZERO);
        assert!(ok.validate().is_ok());

        let bad = ModulePlacement::new("b", ModuleType::Sleep, Vector3D::new(f64::NAN, 0.0, 0.0));
        assert_eq!(
            bad.validate(),
            Err(PlacementError::NonFinitePlacement { id: "b".into() })
        );

        let spun = ok.clone().with_rotation(f64::INFINITY);
        assert!(spun.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let module = ModulePlacement::new("eclss-2", ModuleType::Eclss, Vector3D::new(1.5, -0.25, 3.0))
            .with_rotation(30.0)
            .with_connection("galley-1")
            .with_connection("airlock-1");
        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["type"], "eclss");
        assert_eq!(json["rotationDeg"], 30.0);
        assert_eq!(json["position"]["y"], -0.25);

        let back: ModulePlacement = serde_json::from_value(json).unwrap();
        assert_eq!(back, module);
    }
}
