//! Envelope shapes: containment predicates, volume and surface area.
//!
//! All shapes are centered on the origin. The cylinder runs along Z, the box
//! maps width/height/depth to X/Y/Z, and the torus ring lies in the XY plane.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::bounds::BoundingBox;
use crate::error::{PlacementError, PlacementResult};
use crate::vector::Vector3D;

pub const PARAM_RADIUS: &str = "radius";
pub const PARAM_LENGTH: &str = "length";
pub const PARAM_WIDTH: &str = "width";
pub const PARAM_HEIGHT: &str = "height";
pub const PARAM_DEPTH: &str = "depth";
pub const PARAM_MAJOR_RADIUS: &str = "majorRadius";
pub const PARAM_MINOR_RADIUS: &str = "minorRadius";

/// Envelope primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeKind {
    Cylinder,
    Box,
    Torus,
    Freeform,
    /// Any type string this engine does not know. Treated permissively.
    #[serde(other)]
    Unknown,
}

impl EnvelopeKind {
    /// Parameters the closed-form predicates read.
    pub fn required_params(&self) -> &'static [&'static str] {
        match self {
            EnvelopeKind::Cylinder => &[PARAM_RADIUS, PARAM_LENGTH],
            EnvelopeKind::Box => &[PARAM_WIDTH, PARAM_HEIGHT, PARAM_DEPTH],
            EnvelopeKind::Torus => &[PARAM_MAJOR_RADIUS, PARAM_MINOR_RADIUS],
            EnvelopeKind::Freeform | EnvelopeKind::Unknown => &[],
        }
    }
}

/// Outer hull bounding the habitat's usable volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeSpec {
    #[serde(rename = "type")]
    pub kind: EnvelopeKind,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl EnvelopeSpec {
    pub fn new(kind: EnvelopeKind, params: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            kind,
            params: params.into_iter().collect(),
        }
    }

    pub fn cylinder(radius: f64, length: f64) -> Self {
        Self::from_pairs(
            EnvelopeKind::Cylinder,
            &[(PARAM_RADIUS, radius), (PARAM_LENGTH, length)],
        )
    }

    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        Self::from_pairs(
            EnvelopeKind::Box,
            &[(PARAM_WIDTH, width), (PARAM_HEIGHT, height), (PARAM_DEPTH, depth)],
        )
    }

    pub fn torus(major_radius: f64, minor_radius: f64) -> Self {
        Self::from_pairs(
            EnvelopeKind::Torus,
            &[
                (PARAM_MAJOR_RADIUS, major_radius),
                (PARAM_MINOR_RADIUS, minor_radius),
            ],
        )
    }

    /// Freeform hull whose sculpting starts from a sphere of `radius`.
    pub fn freeform(radius: f64) -> Self {
        Self::from_pairs(EnvelopeKind::Freeform, &[(PARAM_RADIUS, radius)])
    }

    fn from_pairs(kind: EnvelopeKind, pairs: &[(&str, f64)]) -> Self {
        Self::new(kind, pairs.iter().map(|(k, v)| (k.to_string(), *v)))
    }

    /// Parameter value, NaN when absent so missing data propagates.
    pub fn param(&self, name: &str) -> f64 {
        self.params.get(name).copied().unwrap_or(f64::NAN)
    }

    pub fn get_param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// Reject envelopes the predicates cannot meaningfully evaluate.
    pub fn validate(&self) -> PlacementResult<()> {
        for &name in self.kind.required_params() {
            if !self.params.contains_key(name) {
                return Err(PlacementError::MissingParam {
                    kind: self.kind,
                    name,
                });
            }
        }

        for (name, &value) in &self.params {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlacementError::InvalidParam {
                    name: name.clone(),
                    value,
                });
            }
        }

        if self.kind == EnvelopeKind::Torus {
            let major = self.param(PARAM_MAJOR_RADIUS);
            let minor = self.param(PARAM_MINOR_RADIUS);
            if minor >= major {
                return Err(PlacementError::InvalidTorus { major, minor });
            }
        }

        Ok(())
    }
}

/// Whether `point` lies inside (or on the surface of) the envelope.
///
/// Freeform and unknown envelopes have no closed-form predicate and always
/// report contained.
pub fn point_in_envelope(point: Vector3D, envelope: &EnvelopeSpec) -> bool {
    match envelope.kind {
        EnvelopeKind::Cylinder => {
            let radius = envelope.param(PARAM_RADIUS);
            let length = envelope.param(PARAM_LENGTH);
            let radial = (point.x * point.x + point.y * point.y).sqrt();
            radial <= radius && point.z.abs() <= length / 2.0
        }
        EnvelopeKind::Box => {
            let width = envelope.param(PARAM_WIDTH);
            let height = envelope.param(PARAM_HEIGHT);
            let depth = envelope.param(PARAM_DEPTH);
            point.x.abs() <= width / 2.0
                && point.y.abs() <= height / 2.0
                && point.z.abs() <= depth / 2.0
        }
        EnvelopeKind::Torus => {
            let major = envelope.param(PARAM_MAJOR_RADIUS);
            let minor = envelope.param(PARAM_MINOR_RADIUS);
            let d = (point.x * point.x + point.y * point.y).sqrt();
            let ring_offset = d - major;
            (ring_offset * ring_offset + point.z * point.z).sqrt() <= minor
        }
        EnvelopeKind::Freeform | EnvelopeKind::Unknown => true,
    }
}

/// Whether all eight corners of `bounds` lie inside the envelope.
pub fn box_in_envelope(bounds: &BoundingBox, envelope: &EnvelopeSpec) -> bool {
    bounds
        .corners()
        .iter()
        .all(|&corner| point_in_envelope(corner, envelope))
}

pub fn calculate_cylinder_volume(radius: f64, length: f64) -> f64 {
    PI * radius * radius * length
}

pub fn calculate_box_volume(width: f64, height: f64, depth: f64) -> f64 {
    width * height * depth
}

pub fn calculate_torus_volume(major_radius: f64, minor_radius: f64) -> f64 {
    2.0 * PI * PI * major_radius * minor_radius * minor_radius
}

pub fn calculate_cylinder_surface_area(radius: f64, length: f64) -> f64 {
    2.0 * PI * radius * (radius + length)
}

pub fn calculate_box_surface_area(width: f64, height: f64, depth: f64) -> f64 {
    2.0 * (width * height + height * depth + width * depth)
}

pub fn calculate_torus_surface_area(major_radius: f64, minor_radius: f64) -> f64 {
    4.0 * PI * PI * major_radius * minor_radius
}

/// Enclosed volume, `None` for shapes without a closed form.
pub fn envelope_volume(envelope: &EnvelopeSpec) -> Option<f64> {
    match envelope.kind {
        EnvelopeKind::Cylinder => Some(calculate_cylinder_volume(
            envelope.param(PARAM_RADIUS),
            envelope.param(PARAM_LENGTH),
        )),
        EnvelopeKind::Box => Some(calculate_box_volume(
            envelope.param(PARAM_WIDTH),
            envelope.param(PARAM_HEIGHT),
            envelope.param(PARAM_DEPTH),
        )),
        EnvelopeKind::Torus => Some(calculate_torus_volume(
            envelope.param(PARAM_MAJOR_RADIUS),
            envelope.param(PARAM_MINOR_RADIUS),
        )),
        EnvelopeKind::Freeform | EnvelopeKind::Unknown => None,
    }
}

/// Hull surface area, `None` for shapes without a closed form.
pub fn envelope_surface_area(envelope: &EnvelopeSpec) -> Option<f64> {
    match envelope.kind {
        EnvelopeKind::Cylinder => Some(calculate_cylinder_surface_area(
            envelope.param(PARAM_RADIUS),
            envelope.param(PARAM_LENGTH),
        )),
        EnvelopeKind::Box => Some(calculate_box_surface_area(
            envelope.param(PARAM_WIDTH),
            envelope.param(PARAM_HEIGHT),
            envelope.param(PARAM_DEPTH),
        )),
        EnvelopeKind::Torus => Some(calculate_torus_surface_area(
            envelope.param(PARAM_MAJOR_RADIUS),
            envelope.param(PARAM_MINOR_RADIUS),
        )),
        EnvelopeKind::Freeform | EnvelopeKind::Unknown => None,
    }
}
