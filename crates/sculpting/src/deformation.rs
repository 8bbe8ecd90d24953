//! Vertex deformation for a single sculpt operation.
//!
//! Each function takes a flat xyz buffer and rewrites the positions inside
//! the operation's radius. Displacement math runs in f64 and is stored back
//! as f32; the result is a pure function of the buffer and the operation,
//! which is what makes full replay deterministic.

use placement::vector::distance_3d;
use tracing::trace;

use crate::brush::falloff;
use crate::gpu::vertex_at;
use crate::types::{DeformationType, SculptOperation};

/// Move vertices along the operation direction, returning how many moved.
pub fn apply_push(vertices: &mut [f32], op: &SculptOperation) -> usize {
    displace(vertices, op, 1.0)
}

/// Move vertices against the operation direction, returning how many moved.
pub fn apply_pull(vertices: &mut [f32], op: &SculptOperation) -> usize {
    displace(vertices, op, -1.0)
}

fn displace(vertices: &mut [f32], op: &SculptOperation, sign: f64) -> usize {
    let mut modified = 0;

    for index in 0..vertices.len() / 3 {
        let position = vertex_at(vertices, index);
        let distance = distance_3d(position, op.position);
        if distance >= op.radius {
            continue;
        }

        let displacement = op.strength * falloff(distance, op.radius, op.falloff);
        if displacement == 0.0 {
            continue;
        }
        let moved = position + op.direction * (sign * displacement);

        let i = index * 3;
        vertices[i] = moved.x as f32;
        vertices[i + 1] = moved.y as f32;
        vertices[i + 2] = moved.z as f32;
        modified += 1;
    }

    modified
}

/// Apply deformation based on type.
///
/// Smooth, Inflate and Pinch have no vertex rule and leave the buffer as is.
pub fn apply_deformation(vertices: &mut [f32], op: &SculptOperation) -> usize {
    match op.kind {
        DeformationType::Push => apply_push(vertices, op),
        DeformationType::Pull => apply_pull(vertices, op),
        DeformationType::Smooth | DeformationType::Inflate | DeformationType::Pinch => {
            trace!(op = %op.id, kind = ?op.kind, "inert deformation type, skipping");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::FalloffCurve;
    use placement::Vector3D;

    fn push_at_origin(falloff: FalloffCurve) -> SculptOperation {
        SculptOperation::new("op", DeformationType::Push, Vector3D::ZERO, Vector3D::Y)
            .with_radius(2.0)
            .with_strength(0.5)
            .with_falloff(falloff)
    }

    #[test]
    fn test_push_linear_scenario() {
        // Vertex one unit from the brush center moves 0.5 * (1 - 1/2) along +Y
        let mut vertices = vec![1.0, 0.0, 0.0];
        let moved = apply_deformation(&mut vertices, &push_at_origin(FalloffCurve::Linear));
        assert_eq!(moved, 1);
        assert_eq!(vertices, vec![1.0, 0.25, 0.0]);
    }

    #[test]
    fn test_pull_moves_against_direction() {
        let mut vertices = vec![1.0, 0.0, 0.0];
        let mut op = push_at_origin(FalloffCurve::Linear);
        op.kind = DeformationType::Pull;
        apply_deformation(&mut vertices, &op);
        assert_eq!(vertices, vec![1.0, -0.25, 0.0]);
    }

    #[test]
    fn test_vertices_outside_radius_are_untouched() {
        // Second vertex sits exactly on the radius
        let mut vertices = vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 5.0];
        let moved = apply_deformation(&mut vertices, &push_at_origin(FalloffCurve::Smooth));
        assert_eq!(moved, 1);
        assert_eq!(vertices, vec![0.0, 0.5, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_sharp_falloff_cutoff() {
        let mut vertices = vec![0.9, 0.0, 0.0, 1.5, 0.0, 0.0];
        let moved = apply_deformation(&mut vertices, &push_at_origin(FalloffCurve::Sharp));
        // Both are inside the radius; only the first is inside half of it
        // and the zero-weight vertex is not counted
        assert_eq!(moved, 1);
        assert_eq!(vertices[1], 0.5);
        assert_eq!(vertices[4], 0.0);
    }

    #[test]
    fn test_inert_kinds_leave_buffer() {
        let original = vec![0.5, 0.0, 0.0, 0.0, 0.5, 0.0];
        for kind in [
            DeformationType::Smooth,
            DeformationType::Inflate,
            DeformationType::Pinch,
        ] {
            let mut vertices = original.clone();
            let mut op = push_at_origin(FalloffCurve::Linear);
            op.kind = kind;
            assert_eq!(apply_deformation(&mut vertices, &op), 0);
            assert_eq!(vertices, original);
        }
    }

    #[test]
    fn test_deformation_is_deterministic() {
        let op = push_at_origin(FalloffCurve::Smooth);
        let mut a = vec![0.3, 0.1, -0.7, 1.1, 0.2, 0.4];
        let mut b = a.clone();
        apply_deformation(&mut a, &op);
        apply_deformation(&mut b, &op);
        assert_eq!(
            a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }
}
