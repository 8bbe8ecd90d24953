//! Input rejection errors.
//!
//! The geometry functions themselves never fail. These errors come from the
//! `validate()` layer that screens envelopes and placements before they reach
//! the math.

use thiserror::Error;

use crate::envelope::EnvelopeKind;

/// Result type alias for placement input validation.
pub type PlacementResult<T> = Result<T, PlacementError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("{kind:?} envelope is missing parameter `{name}`")]
    MissingParam { kind: EnvelopeKind, name: &'static str },
    #[error("Envelope parameter `{name}` must be finite and positive, got {value}")]
    InvalidParam { name: String, value: f64 },
    #[error("Torus minor radius {minor} must be smaller than major radius {major}")]
    InvalidTorus { major: f64, minor: f64 },
    #[error("Module `{id}` has a non-finite position or rotation")]
    NonFinitePlacement { id: String },
}
