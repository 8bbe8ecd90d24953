//! Spatial constraint checks for habitat module placement.
//!
//! This crate answers one question, called on every drag frame: is this
//! module allowed where it is? It provides:
//! - [`vector`] - `DVec3` algebra with NaN-propagating, total functions
//! - [`bounds`] - Axis-aligned bounding boxes
//! - [`envelope`] - Cylinder, box and torus containment, volume and area
//! - [`collision`] - Box intersection and clearance estimates
//! - [`module`] - Module catalog dimensions and placements
//! - [`validator`] - Per-module and whole-layout violation reports
//!
//! Everything is a pure function of its inputs. Malformed numbers are not
//! rejected by the geometry; use the `validate()` methods first.

pub mod bounds;
pub mod collision;
pub mod envelope;
pub mod error;
pub mod module;
pub mod validator;
pub mod vector;

pub use bounds::{
    BoundingBox, bounding_box_volume, create_bounding_box, create_bounding_box_from_center,
};
pub use collision::{
    bounding_boxes_intersect, calculate_walkway_width, check_clearance, minimum_distance,
};
pub use envelope::{
    EnvelopeKind, EnvelopeSpec, box_in_envelope, envelope_surface_area, envelope_volume,
    point_in_envelope,
};
pub use error::{PlacementError, PlacementResult};
pub use module::{ModulePlacement, ModuleType};
pub use validator::{
    ConstraintViolation, LayoutReport, PlacementReport, Severity, ViolationKind, layout_density,
    validate_layout, validate_placement, validate_placement_with_config,
};
pub use vector::Vector3D;
