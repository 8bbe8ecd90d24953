//! Freeform sculpting for habitat envelopes.
//!
//! This crate turns an envelope primitive into an editable triangle mesh with:
//! - Brush-based deformation (Push, Pull; Smooth, Inflate and Pinch reserved)
//! - Configurable falloff kernels
//! - Linear undo/redo by full replay from the base geometry
//! - Manifold and volume validity flags after every mutation
//!
//! # Architecture
//!
//! The mesh is never edited in place across operations. Every apply, undo and
//! redo rebuilds the vertex buffer from the immutable base geometry by
//! replaying the undo stack, so the mesh is a pure function of the operation
//! order and persisted history reloads to an identical mesh.
//!
//! ## Key Components
//!
//! - **Types**: Sculpt operations and deformation kinds
//! - **Brush**: Falloff kernels
//! - **Deformation**: Vertex displacement algorithms
//! - **Geometry**: Base meshes tessellated from envelope primitives
//! - **Validation**: Manifold and enclosed-volume checks
//! - **GPU**: Normals, dirty tracking and byte views for upload
//! - **Pipeline**: Orchestrates apply/undo/redo → replay → validate

pub mod brush;
pub mod deformation;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod pipeline;
pub mod types;
pub mod validation;

pub use brush::{FalloffCurve, falloff};
pub use deformation::{apply_deformation, apply_pull, apply_push};
pub use error::{SculptError, SculptResult};
pub use geometry::BaseGeometryData;
pub use gpu::{DirtyVertices, as_bytes, compute_vertex_normals, index_bytes};
pub use pipeline::{
    FreeformSculptingData, SculptSession, SculptingHistory, apply_operation,
    initialize_sculpting, redo, undo,
};
pub use types::{DEFAULT_RADIUS, DEFAULT_STRENGTH, DeformationType, SculptOperation};
pub use validation::{MeshValidity, check_mesh, is_closed_manifold, signed_volume};
