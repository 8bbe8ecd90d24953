//! Mesh health checks run after every sculpt replay.
//!
//! Manifoldness is checked on the index buffer: every undirected edge must
//! border exactly two triangles, which also rules out holes. Volume validity
//! asks whether the surface still encloses a finite, non-zero volume.

use std::collections::HashMap;

use crate::gpu::vertex_at;

/// Health flags surfaced to the caller after each mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshValidity {
    pub is_manifold: bool,
    pub volume_valid: bool,
}

/// Check a triangle mesh.
pub fn check_mesh(vertices: &[f32], faces: &[u32]) -> MeshValidity {
    let is_manifold = is_closed_manifold(vertices, faces);
    let volume = signed_volume(vertices, faces);
    let volume_valid = !vertices.is_empty()
        && !faces.is_empty()
        && volume.is_finite()
        && volume.abs() > f64::EPSILON;

    MeshValidity {
        is_manifold,
        volume_valid,
    }
}

/// True when the mesh is non-empty, well indexed, has finite coordinates and
/// every edge is shared by exactly two faces.
pub fn is_closed_manifold(vertices: &[f32], faces: &[u32]) -> bool {
    if vertices.is_empty() || faces.is_empty() || vertices.len() % 3 != 0 || faces.len() % 3 != 0
    {
        return false;
    }
    if !vertices.iter().all(|v| v.is_finite()) {
        return false;
    }

    let vertex_count = (vertices.len() / 3) as u32;
    let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::new();

    for face in faces.chunks_exact(3) {
        let [a, b, c] = [face[0], face[1], face[2]];
        if a >= vertex_count || b >= vertex_count || c >= vertex_count {
            return false;
        }
        if a == b || b == c || a == c {
            return false;
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edge_faces.entry((u.min(v), u.max(v))).or_insert(0) += 1;
        }
    }

    edge_faces.values().all(|&count| count == 2)
}

/// Signed enclosed volume by the divergence theorem.
///
/// Positive for outward (counter-clockwise) winding. Faces with
/// out-of-range indices are skipped.
pub fn signed_volume(vertices: &[f32], faces: &[u32]) -> f64 {
    let vertex_count = vertices.len() / 3;
    faces
        .chunks_exact(3)
        .filter(|f| f.iter().all(|&i| (i as usize) < vertex_count))
        .map(|f| {
            let v0 = vertex_at(vertices, f[0] as usize);
            let v1 = vertex_at(vertices, f[1] as usize);
            let v2 = vertex_at(vertices, f[2] as usize);
            v0.dot(v1.cross(v2))
        })
        .sum::<f64>()
        / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit tetrahedron, outward winding
    const TETRA_VERTICES: [f32; 12] = [
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    ];
    const TETRA_FACES: [u32; 12] = [0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];

    #[test]
    fn test_tetrahedron_is_valid() {
        let validity = check_mesh(&TETRA_VERTICES, &TETRA_FACES);
        assert!(validity.is_manifold);
        assert!(validity.volume_valid);
        assert!((signed_volume(&TETRA_VERTICES, &TETRA_FACES) - 1.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_mesh_is_not_manifold() {
        // Drop one face to leave a hole
        let validity = check_mesh(&TETRA_VERTICES, &TETRA_FACES[..9]);
        assert!(!validity.is_manifold);
    }

    #[test]
    fn test_non_manifold_edge() {
        // A fifth face reusing edge 0-1 gives it three neighbours
        let mut vertices = TETRA_VERTICES.to_vec();
        vertices.extend_from_slice(&[0.5, -1.0, 0.0]);
        let mut faces = TETRA_FACES.to_vec();
        faces.extend_from_slice(&[0, 4, 1]);
        assert!(!is_closed_manifold(&vertices, &faces));
    }

    #[test]
    fn test_bad_indices_and_degenerate_faces() {
        let mut faces = TETRA_FACES.to_vec();
        faces[0] = 42;
        assert!(!is_closed_manifold(&TETRA_VERTICES, &faces));

        let mut faces = TETRA_FACES.to_vec();
        faces[1] = faces[0];
        assert!(!is_closed_manifold(&TETRA_VERTICES, &faces));
    }

    #[test]
    fn test_nan_vertex_invalidates_both_flags() {
        let mut vertices = TETRA_VERTICES;
        vertices[3] = f32::NAN;
        let validity = check_mesh(&vertices, &TETRA_FACES);
        assert!(!validity.is_manifold);
        assert!(!validity.volume_valid);
    }

    #[test]
    fn test_empty_mesh() {
        let validity = check_mesh(&[], &[]);
        assert!(!validity.is_manifold);
        assert!(!validity.volume_valid);
    }

    #[test]
    fn test_flattened_mesh_has_no_volume() {
        // Collapse the apex onto the base plane
        let mut vertices = TETRA_VERTICES;
        vertices[11] = 0.0;
        let validity = check_mesh(&vertices, &TETRA_FACES);
        assert!(validity.is_manifold);
        assert!(!validity.volume_valid);
    }
}
