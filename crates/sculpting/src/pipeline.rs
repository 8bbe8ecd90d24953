//! Sculpting pipeline orchestration.
//!
//! This module owns the per-envelope sculpting state and coordinates:
//! 1. Operation commit → undo stack (redo history invalidated)
//! 2. Full replay of the undo stack against the base geometry
//! 3. Normal recalculation and dirty tracking for the renderer
//! 4. Manifold and volume validity flags
//!
//! Replay always starts from the base geometry rather than patching the
//! previous mesh. Operation order is the only state that matters, so undo
//! and redo reproduce earlier meshes bit for bit.

use habitat_config::SculptConfig;
use placement::EnvelopeSpec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::deformation::apply_deformation;
use crate::error::SculptResult;
use crate::geometry::BaseGeometryData;
use crate::gpu::{DirtyVertices, as_bytes, compute_vertex_normals};
use crate::types::SculptOperation;
use crate::validation::check_mesh;

/// Persisted form of the sculpting state: everything except derived buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SculptingHistory {
    pub base_geometry: BaseGeometryData,
    #[serde(default)]
    pub operation_log: Vec<SculptOperation>,
    #[serde(default)]
    pub undo_stack: Vec<SculptOperation>,
    #[serde(default)]
    pub redo_stack: Vec<SculptOperation>,
}

/// Sculpting state for one envelope.
///
/// `undo_stack` holds exactly the operations reflected in the current mesh,
/// in application order; `redo_stack` holds undone operations with the most
/// recently undone last. `operation_log` records every committed operation
/// and is never rewound.
///
/// Serializes as a [`SculptingHistory`]; the mesh buffers are rebuilt by
/// replay on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SculptingHistory", into = "SculptingHistory")]
pub struct FreeformSculptingData {
    base_geometry: BaseGeometryData,
    operation_log: Vec<SculptOperation>,
    undo_stack: Vec<SculptOperation>,
    redo_stack: Vec<SculptOperation>,
    vertices: Vec<f32>,
    normals: Vec<f32>,
    dirty: DirtyVertices,
    is_manifold: bool,
    volume_valid: bool,
}

impl FreeformSculptingData {
    /// Tessellate the envelope and start with empty history.
    pub fn initialize(envelope: &EnvelopeSpec, config: &SculptConfig) -> SculptResult<Self> {
        let base_geometry = BaseGeometryData::from_envelope(envelope, config)?;
        debug!(
            kind = ?base_geometry.kind,
            vertices = base_geometry.vertex_count(),
            faces = base_geometry.face_count(),
            "initialized sculpting base geometry"
        );
        Ok(Self::from_base(base_geometry))
    }

    /// Start sculpting from prebuilt base geometry.
    pub fn from_base(base_geometry: BaseGeometryData) -> Self {
        Self {
            vertices: base_geometry.vertices.clone(),
            normals: base_geometry.normals.clone(),
            base_geometry,
            operation_log: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            dirty: DirtyVertices::new(),
            is_manifold: true,
            volume_valid: true,
        }
    }

    /// Commit an operation. Clears the redo history.
    ///
    /// The operation is not validated here; see [`SculptOperation::validate`].
    pub fn apply(&mut self, op: SculptOperation) {
        debug!(
            op = %op.id,
            kind = ?op.kind,
            dropped_redo = self.redo_stack.len(),
            "applying sculpt operation"
        );
        self.redo_stack.clear();
        self.operation_log.push(op.clone());
        self.undo_stack.push(op);
        self.replay();
    }

    /// Undo the last operation.
    ///
    /// Returns true if an undo was performed, false if no undo available.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo_stack.pop() else {
            warn!("Undo: no operations available");
            return false;
        };

        debug!(op = %op.id, "undoing sculpt operation");
        self.redo_stack.push(op);
        self.replay();
        true
    }

    /// Redo the most recently undone operation.
    ///
    /// Returns true if a redo was performed, false if no redo available.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.redo_stack.pop() else {
            warn!("Redo: no operations available");
            return false;
        };

        debug!(op = %op.id, "redoing sculpt operation");
        self.undo_stack.push(op);
        self.replay();
        true
    }

    /// Rebuild the mesh from the base geometry and the undo stack.
    fn replay(&mut self) {
        let mut vertices = self.base_geometry.vertices.clone();
        let mut touched = 0;
        for op in &self.undo_stack {
            touched += apply_deformation(&mut vertices, op);
        }
        trace!(
            operations = self.undo_stack.len(),
            vertex_updates = touched,
            "replayed sculpt history"
        );

        self.dirty = DirtyVertices::between(&self.vertices, &vertices);
        self.normals = compute_vertex_normals(&vertices, &self.base_geometry.faces);
        self.vertices = vertices;
        self.refresh_validity();
    }

    fn refresh_validity(&mut self) {
        let validity = check_mesh(&self.vertices, &self.base_geometry.faces);
        if !validity.is_manifold || !validity.volume_valid {
            warn!(
                is_manifold = validity.is_manifold,
                volume_valid = validity.volume_valid,
                operations = self.undo_stack.len(),
                "sculpted mesh failed validity checks"
            );
        }
        self.is_manifold = validity.is_manifold;
        self.volume_valid = validity.volume_valid;
    }

    pub fn base_geometry(&self) -> &BaseGeometryData {
        &self.base_geometry
    }

    /// Current vertex positions, xyz per vertex.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Current vertex normals, xyz per vertex.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Triangle indices, shared with the base geometry.
    pub fn faces(&self) -> &[u32] {
        &self.base_geometry.faces
    }

    /// Vertices changed by the last apply, undo or redo.
    pub fn dirty_vertices(&self) -> &DirtyVertices {
        &self.dirty
    }

    /// Current positions as bytes for GPU upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        as_bytes(&self.vertices)
    }

    pub fn operation_log(&self) -> &[SculptOperation] {
        &self.operation_log
    }

    pub fn undo_stack(&self) -> &[SculptOperation] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[SculptOperation] {
        &self.redo_stack
    }

    pub fn is_manifold(&self) -> bool {
        self.is_manifold
    }

    pub fn volume_valid(&self) -> bool {
        self.volume_valid
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl From<SculptingHistory> for FreeformSculptingData {
    fn from(history: SculptingHistory) -> Self {
        let mut data = Self::from_base(history.base_geometry);
        data.operation_log = history.operation_log;
        data.undo_stack = history.undo_stack;
        data.redo_stack = history.redo_stack;
        data.replay();
        data.dirty.clear();
        data
    }
}

impl From<FreeformSculptingData> for SculptingHistory {
    fn from(data: FreeformSculptingData) -> Self {
        Self {
            base_geometry: data.base_geometry,
            operation_log: data.operation_log,
            undo_stack: data.undo_stack,
            redo_stack: data.redo_stack,
        }
    }
}

/// Initialize sculpting for an envelope with default tessellation.
pub fn initialize_sculpting(envelope: &EnvelopeSpec) -> SculptResult<FreeformSculptingData> {
    FreeformSculptingData::initialize(envelope, &SculptConfig::default())
}

/// Commit `op` and return the updated state.
pub fn apply_operation(mut data: FreeformSculptingData, op: SculptOperation) -> FreeformSculptingData {
    data.apply(op);
    data
}

/// Undo the last operation. An empty undo stack returns `data` unchanged.
pub fn undo(mut data: FreeformSculptingData) -> FreeformSculptingData {
    data.undo();
    data
}

/// Redo the last undone operation. An empty redo stack returns `data` unchanged.
pub fn redo(mut data: FreeformSculptingData) -> FreeformSculptingData {
    data.redo();
    data
}

/// Sculpting lifecycle for one envelope: uninitialized until first activated.
#[derive(Debug, Clone)]
pub struct SculptSession {
    envelope: EnvelopeSpec,
    config: SculptConfig,
    data: Option<FreeformSculptingData>,
}

impl SculptSession {
    pub fn new(envelope: EnvelopeSpec) -> Self {
        Self::with_config(envelope, SculptConfig::default())
    }

    pub fn with_config(envelope: EnvelopeSpec, config: SculptConfig) -> Self {
        Self {
            envelope,
            config,
            data: None,
        }
    }

    pub fn envelope(&self) -> &EnvelopeSpec {
        &self.envelope
    }

    pub fn is_initialized(&self) -> bool {
        self.data.is_some()
    }

    /// Sculpting state, tessellating the envelope on first call.
    pub fn activate(&mut self) -> SculptResult<&mut FreeformSculptingData> {
        let data = match self.data.take() {
            Some(data) => data,
            None => FreeformSculptingData::initialize(&self.envelope, &self.config)?,
        };
        Ok(self.data.insert(data))
    }

    pub fn data(&self) -> Option<&FreeformSculptingData> {
        self.data.as_ref()
    }

    /// Drop the sculpting state, returning the envelope to its primitive.
    pub fn reset(&mut self) {
        self.data = None;
    }
}
