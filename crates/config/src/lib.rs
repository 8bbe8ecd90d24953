//! Shared configuration for the habitat geometry engine
//!
//! This crate provides the single source of truth for the tunables used by
//! the placement validator and the envelope sculpting engine. Every struct
//! deserializes with `#[serde(default)]`, so a settings file only needs the
//! fields it overrides.

use serde::{Deserialize, Serialize};

/// Minimum clearance between two module bounding boxes, in meters
pub const DEFAULT_MIN_CLEARANCE: f64 = 0.8;

/// Slack allowed when comparing a module gap against the minimum clearance
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Radial segments used when tessellating cylinders, tori and spheres
pub const DEFAULT_RADIAL_SEGMENTS: u32 = 32;

/// Segments around the tube of a torus
pub const DEFAULT_TUBULAR_SEGMENTS: u32 = 16;

/// Latitude rings of a freeform sphere
pub const DEFAULT_SPHERE_RINGS: u32 = 16;

/// How a module's bounding box is tested against the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvelopeCheck {
    /// Test only the box center. Cheap enough to run on every pointer-move.
    #[default]
    Center,
    /// Test all eight box corners. Used for export validation.
    Corners,
}

/// Placement validator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidatorConfig {
    /// Required gap between non-intersecting modules (meters)
    pub min_clearance: f64,
    /// Envelope containment strategy
    pub envelope_check: EnvelopeCheck,
    /// Report each symmetric module pair once in batch layout validation
    pub dedupe_pairs: bool,
    /// Slack on the clearance comparison, so float noise at the threshold
    /// does not raise a warning (meters)
    pub tolerance: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_clearance: DEFAULT_MIN_CLEARANCE,
            envelope_check: EnvelopeCheck::Center,
            dedupe_pairs: false,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ValidatorConfig {
    /// Config for export validation: corner-accurate envelope checks.
    pub fn for_export() -> Self {
        Self {
            envelope_check: EnvelopeCheck::Corners,
            ..Default::default()
        }
    }
}

/// Base geometry tessellation settings for envelope sculpting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SculptConfig {
    /// Segments around the main axis (cylinder, torus ring, sphere longitude)
    pub radial_segments: u32,
    /// Segments around the torus tube
    pub tubular_segments: u32,
    /// Latitude rings for freeform spheres
    pub sphere_rings: u32,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            radial_segments: DEFAULT_RADIAL_SEGMENTS,
            tubular_segments: DEFAULT_TUBULAR_SEGMENTS,
            sphere_rings: DEFAULT_SPHERE_RINGS,
        }
    }
}

impl SculptConfig {
    /// Radial segments, floored at 3 so every ring encloses area
    pub fn radial(&self) -> u32 {
        self.radial_segments.max(3)
    }

    /// Tubular segments, floored at 3
    pub fn tubular(&self) -> u32 {
        self.tubular_segments.max(3)
    }

    /// Sphere rings, floored at 2 so the sphere has a body between its poles
    pub fn rings(&self) -> u32 {
        self.sphere_rings.max(2)
    }
}
