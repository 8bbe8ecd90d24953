//! Placement validation against the envelope and sibling modules.
//!
//! The validator runs on every pointer-move while a module is dragged, so a
//! call is O(n) in the sibling count, allocates one violation list and keeps
//! no state between calls.

use std::collections::HashSet;

use habitat_config::{EnvelopeCheck, ValidatorConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::bounds::BoundingBox;
use crate::collision::{bounding_boxes_intersect, minimum_distance};
use crate::envelope::{EnvelopeSpec, box_in_envelope, envelope_volume, point_in_envelope};
use crate::module::ModulePlacement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViolationKind {
    Collision,
    Clearance,
    Envelope,
    Connectivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintViolation {
    pub kind: ViolationKind,
    pub message: String,
    pub module_ids: Vec<String>,
    pub severity: Severity,
}

impl ConstraintViolation {
    fn envelope(module: &ModulePlacement) -> Self {
        Self {
            kind: ViolationKind::Envelope,
            message: format!("Module {} extends outside the habitat envelope", module.id),
            module_ids: vec![module.id.clone()],
            severity: Severity::Error,
        }
    }

    fn collision(module: &ModulePlacement, other: &ModulePlacement) -> Self {
        Self {
            kind: ViolationKind::Collision,
            message: format!("Module {} collides with module {}", module.id, other.id),
            module_ids: vec![module.id.clone(), other.id.clone()],
            severity: Severity::Error,
        }
    }

    fn clearance(
        module: &ModulePlacement,
        other: &ModulePlacement,
        distance: f64,
        min_clearance: f64,
    ) -> Self {
        Self {
            kind: ViolationKind::Clearance,
            message: format!(
                "Modules {} and {} are {:.2} m apart, {:.2} m clearance required",
                module.id, other.id, distance, min_clearance
            ),
            module_ids: vec![module.id.clone(), other.id.clone()],
            severity: Severity::Warning,
        }
    }

    fn connectivity(module: &ModulePlacement, target: &str) -> Self {
        let message = if target == module.id {
            format!("Module {} lists a connection to itself", module.id)
        } else {
            format!("Module {} connects to unknown module {}", module.id, target)
        };
        Self {
            kind: ViolationKind::Connectivity,
            message,
            module_ids: vec![module.id.clone(), target.to_string()],
            severity: Severity::Warning,
        }
    }

    /// Order-independent key for the module pair this violation names.
    fn pair_key(&self) -> Option<(ViolationKind, &str, &str)> {
        match (self.kind, self.module_ids.as_slice()) {
            (ViolationKind::Collision | ViolationKind::Clearance, [a, b]) => {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                Some((self.kind, lo.as_str(), hi.as_str()))
            }
            _ => None,
        }
    }
}

/// Outcome of validating one module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    /// No error-severity violations
    pub is_valid: bool,
    pub violations: Vec<ConstraintViolation>,
}

impl PlacementReport {
    fn from_violations(violations: Vec<ConstraintViolation>) -> Self {
        let is_valid = !violations.iter().any(|v| v.severity == Severity::Error);
        Self {
            is_valid,
            violations,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }

    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }
}

/// Validate `module` with the default settings.
pub fn validate_placement(
    module: &ModulePlacement,
    all_modules: &[ModulePlacement],
    envelope: &EnvelopeSpec,
) -> PlacementReport {
    validate_placement_with_config(module, all_modules, envelope, &ValidatorConfig::default())
}

/// Validate `module` against the envelope and every other module.
///
/// `all_modules` may include `module` itself; entries sharing its id are
/// skipped. Violations follow the iteration order of `all_modules`.
pub fn validate_placement_with_config(
    module: &ModulePlacement,
    all_modules: &[ModulePlacement],
    envelope: &EnvelopeSpec,
    config: &ValidatorConfig,
) -> PlacementReport {
    let bounds = module.bounding_box();
    let mut violations = Vec::new();

    if !envelope_contains(&bounds, envelope, config.envelope_check) {
        violations.push(ConstraintViolation::envelope(module));
    }

    for other in all_modules {
        if other.id == module.id {
            continue;
        }

        let other_bounds = other.bounding_box();
        if bounding_boxes_intersect(&bounds, &other_bounds) {
            violations.push(ConstraintViolation::collision(module, other));
            continue;
        }

        // Gaps within `tolerance` of the minimum still pass
        let distance = minimum_distance(&bounds, &other_bounds);
        if distance + config.tolerance < config.min_clearance {
            violations.push(ConstraintViolation::clearance(
                module,
                other,
                distance,
                config.min_clearance,
            ));
        }
    }

    for target in &module.connections {
        let known = target != &module.id && all_modules.iter().any(|m| &m.id == target);
        if !known {
            violations.push(ConstraintViolation::connectivity(module, target));
        }
    }

    trace!(
        module = %module.id,
        siblings = all_modules.len(),
        violations = violations.len(),
        "validated placement"
    );

    PlacementReport::from_violations(violations)
}

fn envelope_contains(bounds: &BoundingBox, envelope: &EnvelopeSpec, check: EnvelopeCheck) -> bool {
    match check {
        EnvelopeCheck::Center => point_in_envelope(bounds.center(), envelope),
        EnvelopeCheck::Corners => box_in_envelope(bounds, envelope),
    }
}

/// Outcome of validating every module of a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub is_valid: bool,
    pub violations: Vec<ConstraintViolation>,
    /// Ids of modules whose own report is invalid, in layout order
    pub invalid_modules: Vec<String>,
}

/// Validate every module in `modules`.
///
/// Without `config.dedupe_pairs` a collision between A and B is reported by
/// both A and B. With it, the first report of each pair wins.
pub fn validate_layout(
    modules: &[ModulePlacement],
    envelope: &EnvelopeSpec,
    config: &ValidatorConfig,
) -> LayoutReport {
    let mut violations = Vec::new();
    let mut invalid_modules = Vec::new();

    for module in modules {
        let report = validate_placement_with_config(module, modules, envelope, config);
        if !report.is_valid {
            invalid_modules.push(module.id.clone());
        }
        violations.extend(report.violations);
    }

    if config.dedupe_pairs {
        let mut seen = HashSet::new();
        violations.retain(|v| match v.pair_key() {
            Some((kind, a, b)) => seen.insert((kind, a.to_string(), b.to_string())),
            None => true,
        });
    }

    debug!(
        modules = modules.len(),
        violations = violations.len(),
        invalid = invalid_modules.len(),
        "validated layout"
    );

    LayoutReport {
        is_valid: invalid_modules.is_empty(),
        violations,
        invalid_modules,
    }
}

/// Share of the envelope volume occupied by module catalog volumes.
///
/// `None` when the envelope has no closed-form volume or it is not positive.
pub fn layout_density(modules: &[ModulePlacement], envelope: &EnvelopeSpec) -> Option<f64> {
    let envelope_volume = envelope_volume(envelope).filter(|v| *v > 0.0)?;
    let occupied: f64 = modules.iter().map(|m| m.module_type.volume()).sum();
    Some(occupied / envelope_volume)
}
