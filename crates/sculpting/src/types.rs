//! Core sculpting types.
//!
//! Operations are immutable value objects. The engine replays them in order
//! against the base geometry, so an operation's fields are the whole of its
//! effect.

use placement::Vector3D;
use placement::vector::{normalize, serde_xyz};
use serde::{Deserialize, Serialize};

use crate::brush::FalloffCurve;
use crate::error::{SculptError, SculptResult};

/// Type of sculpting deformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum DeformationType {
    /// Move vertices along the operation direction
    #[default]
    Push = 0,
    /// Move vertices against the operation direction
    Pull = 1,
    /// Recognized tool with no vertex rule yet; replays as a no-op
    Smooth = 2,
    /// Recognized tool with no vertex rule yet; replays as a no-op
    Inflate = 3,
    /// Recognized tool with no vertex rule yet; replays as a no-op
    Pinch = 4,
}

impl DeformationType {
    /// Whether replaying this kind moves any vertex.
    pub fn displaces_vertices(&self) -> bool {
        matches!(self, DeformationType::Push | DeformationType::Pull)
    }
}

/// Default brush radius in meters
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Default brush strength
pub const DEFAULT_STRENGTH: f64 = 0.5;

/// A single committed sculpting operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SculptOperation {
    pub id: String,
    pub kind: DeformationType,
    /// Brush center
    #[serde(with = "serde_xyz")]
    pub position: Vector3D,
    /// Unit displacement direction (usually the surface normal under the brush)
    #[serde(with = "serde_xyz")]
    pub direction: Vector3D,
    /// Peak displacement in meters, in (0, 1]
    pub strength: f64,
    /// Influence radius in meters
    pub radius: f64,
    #[serde(rename = "falloffType")]
    pub falloff: FalloffCurve,
    /// Creation time in milliseconds
    pub timestamp: u64,
}

impl SculptOperation {
    /// Create an operation with default strength, radius and falloff.
    ///
    /// `direction` is normalized here; a zero direction stays zero and is
    /// reported by [`SculptOperation::validate`].
    pub fn new(
        id: impl Into<String>,
        kind: DeformationType,
        position: Vector3D,
        direction: Vector3D,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            direction: normalize(direction),
            strength: DEFAULT_STRENGTH,
            radius: DEFAULT_RADIUS,
            falloff: FalloffCurve::default(),
            timestamp: 0,
        }
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_falloff(mut self, falloff: FalloffCurve) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp = timestamp_ms;
        self
    }

    /// Reject operations the engine should never be handed.
    ///
    /// The engine itself does not call this; a malformed operation replays
    /// with NaN propagating into the mesh, which the validity flags surface.
    pub fn validate(&self) -> SculptResult<()> {
        if !(self.strength > 0.0 && self.strength <= 1.0) {
            return Err(SculptError::InvalidStrength(self.strength));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SculptError::InvalidRadius(self.radius));
        }
        if !self.position.is_finite() {
            return Err(SculptError::InvalidPosition);
        }
        if !self.direction.is_finite() || self.direction == Vector3D::ZERO {
            return Err(SculptError::InvalidDirection);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push() -> SculptOperation {
        SculptOperation::new("op-1", DeformationType::Push, Vector3D::ZERO, Vector3D::Y)
    }

    #[test]
    fn test_defaults() {
        let op = push();
        assert_eq!(op.strength, DEFAULT_STRENGTH);
        assert_eq!(op.radius, DEFAULT_RADIUS);
        assert_eq!(op.falloff, FalloffCurve::Smooth);
        assert!(op.validate().is_ok());
    }

    #[test]
    fn test_direction_is_normalized() {
        let op = SculptOperation::new(
            "op",
            DeformationType::Pull,
            Vector3D::ZERO,
            Vector3D::new(0.0, 0.0, 4.0),
        );
        assert_eq!(op.direction, Vector3D::Z);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert_eq!(
            push().with_strength(0.0).validate(),
            Err(SculptError::InvalidStrength(0.0))
        );
        assert_eq!(
            push().with_strength(1.5).validate(),
            Err(SculptError::InvalidStrength(1.5))
        );
        assert!(push().with_strength(1.0).validate().is_ok());
        assert_eq!(
            push().with_radius(0.0).validate(),
            Err(SculptError::InvalidRadius(0.0))
        );
        assert!(matches!(
            push().with_strength(f64::NAN).validate(),
            Err(SculptError::InvalidStrength(_))
        ));

        let flat = SculptOperation::new("op", DeformationType::Push, Vector3D::ZERO, Vector3D::ZERO);
        assert_eq!(flat.validate(), Err(SculptError::InvalidDirection));

        let lost = SculptOperation::new(
            "op",
            DeformationType::Push,
            Vector3D::splat(f64::INFINITY),
            Vector3D::Y,
        );
        assert_eq!(lost.validate(), Err(SculptError::InvalidPosition));
    }

    #[test]
    fn test_inert_kinds() {
        assert!(DeformationType::Push.displaces_vertices());
        assert!(DeformationType::Pull.displaces_vertices());
        assert!(!DeformationType::Smooth.displaces_vertices());
        assert!(!DeformationType::Inflate.displaces_vertices());
        assert!(!DeformationType::Pinch.displaces_vertices());
    }

    #[test]
    fn test_json_round_trip() {
        let op = push()
            .with_falloff(FalloffCurve::Sharp)
            .with_radius(2.5)
            .with_timestamp(1_705_847_123_456);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "push");
        assert_eq!(json["falloffType"], "sharp");
        assert_eq!(json["direction"]["y"], 1.0);

        let back: SculptOperation = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
