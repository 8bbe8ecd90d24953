//! Render-side buffer helpers for sculpted meshes.
//!
//! The renderer uploads the flat `f32` vertex and normal buffers directly.
//! After a replay, [`DirtyVertices`] records which vertices moved so the
//! renderer can patch only those ranges instead of re-uploading the mesh.

use std::collections::BTreeSet;

use glam::DVec3;

/// Tracks which vertices changed between two versions of a vertex buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyVertices {
    /// Indices of modified vertices, ascending
    pub modified: BTreeSet<u32>,
}

impl DirtyVertices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare two xyz buffers of the same mesh, bit for bit.
    pub fn between(before: &[f32], after: &[f32]) -> Self {
        let modified = before
            .chunks_exact(3)
            .zip(after.chunks_exact(3))
            .enumerate()
            .filter(|(_, (a, b))| a.iter().zip(b.iter()).any(|(x, y)| x.to_bits() != y.to_bits()))
            .map(|(i, _)| i as u32)
            .collect();
        Self { modified }
    }

    pub fn clear(&mut self) {
        self.modified.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.modified.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modified.len()
    }
}

/// View a flat buffer as bytes for GPU upload.
pub fn as_bytes(buffer: &[f32]) -> &[u8] {
    bytemuck::cast_slice(buffer)
}

/// View a face index buffer as bytes for GPU upload.
pub fn index_bytes(faces: &[u32]) -> &[u8] {
    bytemuck::cast_slice(faces)
}

/// Position of vertex `index` widened to f64.
pub(crate) fn vertex_at(vertices: &[f32], index: usize) -> DVec3 {
    let i = index * 3;
    DVec3::new(
        vertices[i] as f64,
        vertices[i + 1] as f64,
        vertices[i + 2] as f64,
    )
}

/// Area-weighted vertex normals.
///
/// Each face adds its unnormalized cross product to its three vertices, so
/// larger faces weigh more. Vertices with no faces, or whose contributions
/// cancel, get a zero normal. Faces referencing out-of-range vertices are
/// skipped.
pub fn compute_vertex_normals(vertices: &[f32], faces: &[u32]) -> Vec<f32> {
    let vertex_count = vertices.len() / 3;
    let mut sums = vec![DVec3::ZERO; vertex_count];

    for face in faces.chunks_exact(3) {
        let [a, b, c] = [face[0] as usize, face[1] as usize, face[2] as usize];
        if a >= vertex_count || b >= vertex_count || c >= vertex_count {
            continue;
        }
        let v0 = vertex_at(vertices, a);
        let edge1 = vertex_at(vertices, b) - v0;
        let edge2 = vertex_at(vertices, c) - v0;
        let normal = edge1.cross(edge2);
        sums[a] += normal;
        sums[b] += normal;
        sums[c] += normal;
    }

    sums.into_iter()
        .flat_map(|n| {
            let n = n.normalize_or_zero();
            [n.x as f32, n.y as f32, n.z as f32]
        })
        .collect()
}
