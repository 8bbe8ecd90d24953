//! Base geometry tessellated from the envelope primitive.
//!
//! The base geometry is the immutable template every sculpt replay starts
//! from. All primitives are closed, edge-manifold triangle meshes wound
//! counter-clockwise when viewed from outside, centered on the origin with
//! the same axes as the containment predicates.

use std::f64::consts::{PI, TAU};

use habitat_config::SculptConfig;
use placement::envelope::{
    PARAM_DEPTH, PARAM_HEIGHT, PARAM_LENGTH, PARAM_MAJOR_RADIUS, PARAM_MINOR_RADIUS, PARAM_RADIUS,
    PARAM_WIDTH,
};
use placement::{EnvelopeKind, EnvelopeSpec, Vector3D};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{SculptError, SculptResult};
use crate::gpu::compute_vertex_normals;

/// Flat triangle-mesh buffers for one envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseGeometryData {
    pub kind: EnvelopeKind,
    pub params: BTreeMap<String, f64>,
    /// xyz per vertex
    pub vertices: Vec<f32>,
    /// Three vertex indices per triangle
    pub faces: Vec<u32>,
    /// xyz per vertex
    pub normals: Vec<f32>,
}

impl BaseGeometryData {
    /// Tessellate the envelope's primitive.
    ///
    /// Freeform envelopes start from a sphere of their `radius` parameter.
    pub fn from_envelope(envelope: &EnvelopeSpec, config: &SculptConfig) -> SculptResult<Self> {
        envelope.validate()?;

        let mesh = match envelope.kind {
            EnvelopeKind::Cylinder => cylinder(
                envelope.param(PARAM_RADIUS),
                envelope.param(PARAM_LENGTH),
                config.radial(),
            ),
            EnvelopeKind::Box => cuboid(
                envelope.param(PARAM_WIDTH),
                envelope.param(PARAM_HEIGHT),
                envelope.param(PARAM_DEPTH),
            ),
            EnvelopeKind::Torus => torus(
                envelope.param(PARAM_MAJOR_RADIUS),
                envelope.param(PARAM_MINOR_RADIUS),
                config.radial(),
                config.tubular(),
            ),
            EnvelopeKind::Freeform => {
                let radius = envelope
                    .get_param(PARAM_RADIUS)
                    .ok_or(SculptError::MissingParam {
                        kind: EnvelopeKind::Freeform,
                        name: PARAM_RADIUS,
                    })?;
                sphere(radius, config.radial(), config.rings())
            }
            EnvelopeKind::Unknown => return Err(SculptError::UnsupportedEnvelope(envelope.kind)),
        };

        let vertices = mesh.flat_positions();
        let normals = compute_vertex_normals(&vertices, &mesh.faces);

        Ok(Self {
            kind: envelope.kind,
            params: envelope.params.clone(),
            vertices,
            faces: mesh.faces,
            normals,
        })
    }

    /// Build directly from buffers (imported or test meshes).
    pub fn from_buffers(kind: EnvelopeKind, vertices: Vec<f32>, faces: Vec<u32>) -> Self {
        let normals = compute_vertex_normals(&vertices, &faces);
        Self {
            kind,
            params: BTreeMap::new(),
            vertices,
            faces,
            normals,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.faces.len() / 3
    }
}

/// Mesh under construction, positions kept in f64 until flattened.
#[derive(Debug, Default)]
struct MeshBuilder {
    positions: Vec<Vector3D>,
    faces: Vec<u32>,
}

impl MeshBuilder {
    fn push_vertex(&mut self, position: Vector3D) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.faces.extend_from_slice(&[a, b, c]);
    }

    /// Two triangles for the quad `a b c d`, counter-clockwise.
    fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.push_triangle(a, b, c);
        self.push_triangle(a, c, d);
    }

    fn flat_positions(&self) -> Vec<f32> {
        self.positions
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }
}

/// Capped cylinder along Z.
fn cylinder(radius: f64, length: f64, segments: u32) -> MeshBuilder {
    let mut mesh = MeshBuilder::default();
    let half = length / 2.0;

    for z in [-half, half] {
        for i in 0..segments {
            let theta = TAU * i as f64 / segments as f64;
            let (sin, cos) = theta.sin_cos();
            mesh.push_vertex(Vector3D::new(radius * cos, radius * sin, z));
        }
    }
    let bottom_center = mesh.push_vertex(Vector3D::new(0.0, 0.0, -half));
    let top_center = mesh.push_vertex(Vector3D::new(0.0, 0.0, half));

    for i in 0..segments {
        let j = (i + 1) % segments;
        let (b_i, b_j) = (i, j);
        let (t_i, t_j) = (segments + i, segments + j);

        mesh.push_quad(b_i, b_j, t_j, t_i);
        mesh.push_triangle(bottom_center, b_j, b_i);
        mesh.push_triangle(top_center, t_i, t_j);
    }

    mesh
}

/// Eight-corner box, width/height/depth along X/Y/Z.
fn cuboid(width: f64, height: f64, depth: f64) -> MeshBuilder {
    let mut mesh = MeshBuilder::default();
    let half = Vector3D::new(width, height, depth) / 2.0;

    // Corner index bits: 1 = +X, 2 = +Y, 4 = +Z
    for i in 0..8u32 {
        mesh.push_vertex(Vector3D::new(
            if i & 1 != 0 { half.x } else { -half.x },
            if i & 2 != 0 { half.y } else { -half.y },
            if i & 4 != 0 { half.z } else { -half.z },
        ));
    }

    mesh.push_quad(0, 4, 6, 2); // -X
    mesh.push_quad(1, 3, 7, 5); // +X
    mesh.push_quad(0, 1, 5, 4); // -Y
    mesh.push_quad(2, 6, 7, 3); // +Y
    mesh.push_quad(0, 2, 3, 1); // -Z
    mesh.push_quad(4, 5, 7, 6); // +Z

    mesh
}

/// Torus with its ring in the XY plane.
fn torus(major_radius: f64, minor_radius: f64, radial: u32, tubular: u32) -> MeshBuilder {
    let mut mesh = MeshBuilder::default();

    for i in 0..radial {
        let theta = TAU * i as f64 / radial as f64;
        let (sin_t, cos_t) = theta.sin_cos();
        for j in 0..tubular {
            let phi = TAU * j as f64 / tubular as f64;
            let (sin_p, cos_p) = phi.sin_cos();
            let ring = major_radius + minor_radius * cos_p;
            mesh.push_vertex(Vector3D::new(ring * cos_t, ring * sin_t, minor_radius * sin_p));
        }
    }

    let index = |i: u32, j: u32| (i % radial) * tubular + (j % tubular);
    for i in 0..radial {
        for j in 0..tubular {
            mesh.push_quad(
                index(i, j),
                index(i + 1, j),
                index(i + 1, j + 1),
                index(i, j + 1),
            );
        }
    }

    mesh
}

/// UV sphere with poles on the Z axis.
fn sphere(radius: f64, segments: u32, rings: u32) -> MeshBuilder {
    let mut mesh = MeshBuilder::default();

    let north = mesh.push_vertex(Vector3D::new(0.0, 0.0, radius));
    for r in 1..rings {
        let phi = PI * r as f64 / rings as f64;
        let (sin_p, cos_p) = phi.sin_cos();
        for i in 0..segments {
            let theta = TAU * i as f64 / segments as f64;
            let (sin_t, cos_t) = theta.sin_cos();
            mesh.push_vertex(Vector3D::new(
                radius * sin_p * cos_t,
                radius * sin_p * sin_t,
                radius * cos_p,
            ));
        }
    }
    let south = mesh.push_vertex(Vector3D::new(0.0, 0.0, -radius));

    let ring_index = |r: u32, i: u32| 1 + (r - 1) * segments + (i % segments);

    for i in 0..segments {
        mesh.push_triangle(north, ring_index(1, i), ring_index(1, i + 1));
    }
    for r in 1..rings - 1 {
        for i in 0..segments {
            mesh.push_quad(
                ring_index(r, i),
                ring_index(r + 1, i),
                ring_index(r + 1, i + 1),
                ring_index(r, i + 1),
            );
        }
    }
    let last = rings - 1;
    for i in 0..segments {
        mesh.push_triangle(south, ring_index(last, i + 1), ring_index(last, i));
    }

    mesh
}
