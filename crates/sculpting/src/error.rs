//! Sculpting errors.

use placement::{EnvelopeKind, PlacementError};
use thiserror::Error;

/// Result type alias for sculpting setup and operation construction.
pub type SculptResult<T> = Result<T, SculptError>;

/// Errors raised before anything touches the mesh.
///
/// Once an engine is initialized, apply/undo/redo never fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SculptError {
    #[error("Invalid envelope: {0}")]
    Envelope(#[from] PlacementError),
    #[error("Envelope type {0:?} has no parametric base geometry")]
    UnsupportedEnvelope(EnvelopeKind),
    #[error("{kind:?} envelope is missing parameter `{name}`")]
    MissingParam { kind: EnvelopeKind, name: &'static str },
    #[error("Operation strength must be in (0, 1], got {0}")]
    InvalidStrength(f64),
    #[error("Operation radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
    #[error("Operation position must be finite")]
    InvalidPosition,
    #[error("Operation direction must be finite and non-zero")]
    InvalidDirection,
}
