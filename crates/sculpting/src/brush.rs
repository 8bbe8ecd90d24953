//! Brush falloff kernels.
//!
//! A kernel maps the normalized distance from the brush center
//! (0.0 = center, 1.0 = edge of the radius) to a displacement weight in
//! `[0, 1]`.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Falloff curve for brush influence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum FalloffCurve {
    /// strength = 1 - t
    Linear = 0,
    /// strength = cos(t * pi / 2)
    #[default]
    Smooth = 1,
    /// Full strength inside half the radius, nothing beyond
    Sharp = 2,
}

impl FalloffCurve {
    /// Weight at normalized distance `t`.
    ///
    /// `t` is clamped to `[0, 1]`. A NaN distance gets weight 0.
    pub fn evaluate(&self, normalized_distance: f64) -> f64 {
        if normalized_distance.is_nan() {
            return 0.0;
        }
        let t = normalized_distance.clamp(0.0, 1.0);
        match self {
            FalloffCurve::Linear => 1.0 - t,
            FalloffCurve::Smooth => (t * FRAC_PI_2).cos().max(0.0),
            FalloffCurve::Sharp => {
                if t < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// Weight of a vertex `distance` away from a brush of `radius`.
pub fn falloff(distance: f64, radius: f64, curve: FalloffCurve) -> f64 {
    curve.evaluate(distance / radius)
}
