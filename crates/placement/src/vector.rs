//! 3D vector algebra on `glam::DVec3`.
//!
//! Every function here is total. NaN and infinity propagate through the math
//! instead of being rejected; callers that need clean input reject it before
//! reaching the geometry layer (see [`crate::EnvelopeSpec::validate`] and
//! [`crate::ModulePlacement::validate`]).

use glam::DVec3;

/// A point or direction in habitat space (meters).
pub type Vector3D = DVec3;

pub fn add(a: Vector3D, b: Vector3D) -> Vector3D {
    a + b
}

pub fn subtract(a: Vector3D, b: Vector3D) -> Vector3D {
    a - b
}

pub fn scale(v: Vector3D, factor: f64) -> Vector3D {
    v * factor
}

pub fn dot(a: Vector3D, b: Vector3D) -> f64 {
    a.dot(b)
}

pub fn cross(a: Vector3D, b: Vector3D) -> Vector3D {
    a.cross(b)
}

pub fn magnitude(v: Vector3D) -> f64 {
    v.length()
}

/// Scale `v` to unit length.
///
/// The zero vector maps to the zero vector. Unlike `DVec3::normalize_or_zero`
/// a NaN or infinite input is not swallowed: it comes back as NaN.
pub fn normalize(v: Vector3D) -> Vector3D {
    let length = magnitude(v);
    if length == 0.0 {
        Vector3D::ZERO
    } else {
        v / length
    }
}

pub fn distance_3d(a: Vector3D, b: Vector3D) -> f64 {
    magnitude(a - b)
}

/// Distance projected onto the XY plane (Z ignored).
pub fn distance_2d(a: Vector3D, b: Vector3D) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Linear interpolation, `t = 0` gives `a` and `t = 1` gives `b`. `t` is not clamped.
pub fn lerp(a: Vector3D, b: Vector3D, t: f64) -> Vector3D {
    a + (b - a) * t
}

/// Clamp a scalar into `[min, max]`.
///
/// Written with comparisons rather than `f64::clamp` so inverted bounds and
/// NaN never panic.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Component-wise clamp of a vector into the box `[min, max]`.
pub fn clamp_vector(v: Vector3D, min: Vector3D, max: Vector3D) -> Vector3D {
    Vector3D::new(
        clamp(v.x, min.x, max.x),
        clamp(v.y, min.y, max.y),
        clamp(v.z, min.z, max.z),
    )
}

/// Round to `decimals` places (half away from zero).
///
/// `decimals` is capped at 308, the largest finite power of ten.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(308) as i32);
    (value * factor).round() / factor
}

pub fn round_vector(v: Vector3D, decimals: u32) -> Vector3D {
    Vector3D::new(
        round_to(v.x, decimals),
        round_to(v.y, decimals),
        round_to(v.z, decimals),
    )
}

pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Per-component approximate equality.
pub fn vectors_approx_eq(a: Vector3D, b: Vector3D, tolerance: f64) -> bool {
    approx_eq(a.x, b.x, tolerance) && approx_eq(a.y, b.y, tolerance) && approx_eq(a.z, b.z, tolerance)
}

/// Serde adapter writing a vector as `{ "x": .., "y": .., "z": .. }`.
///
/// Use with `#[serde(with = "crate::vector::serde_xyz")]`.
pub mod serde_xyz {
    use super::Vector3D;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f64,
        y: f64,
        z: f64,
    }

    pub fn serialize<S: Serializer>(v: &Vector3D, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vector3D, D::Error> {
        let xyz = Xyz::deserialize(deserializer)?;
        Ok(Vector3D::new(xyz.x, xyz.y, xyz.z))
    }
}
