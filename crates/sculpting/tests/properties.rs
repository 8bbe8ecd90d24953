//! Property-based tests for sculpting replay.
//!
//! Run with: cargo test -p sculpting -- proptest

use habitat_config::SculptConfig;
use placement::{EnvelopeSpec, Vector3D};
use proptest::prelude::*;
use sculpting::{
    DeformationType, FalloffCurve, FreeformSculptingData, SculptOperation, apply_operation,
    falloff, initialize_sculpting, redo, undo,
};

fn coarse_cylinder() -> FreeformSculptingData {
    let config = SculptConfig {
        radial_segments: 12,
        ..Default::default()
    };
    FreeformSculptingData::initialize(&EnvelopeSpec::cylinder(2.0, 3.0), &config).unwrap()
}

fn arb_curve() -> impl Strategy<Value = FalloffCurve> {
    prop::sample::select(vec![FalloffCurve::Linear, FalloffCurve::Smooth, FalloffCurve::Sharp])
}

fn arb_operation() -> impl Strategy<Value = SculptOperation> {
    (
        prop::array::uniform3(-3.0..3.0f64),
        prop::array::uniform3(-1.0..1.0f64),
        0.01..1.0f64,
        0.1..3.0f64,
        arb_curve(),
        prop::bool::ANY,
    )
        .prop_map(|([px, py, pz], [dx, dy, dz], strength, radius, curve, pull)| {
            let kind = if pull {
                DeformationType::Pull
            } else {
                DeformationType::Push
            };
            SculptOperation::new(
                "op",
                kind,
                Vector3D::new(px, py, pz),
                Vector3D::new(dx, dy, dz + 2.0),
            )
            .with_strength(strength)
            .with_radius(radius)
            .with_falloff(curve)
        })
}

fn bits(buffer: &[f32]) -> Vec<u32> {
    buffer.iter().map(|v| v.to_bits()).collect()
}

proptest! {
    #[test]
    fn proptest_falloff_in_unit_range(
        distance in -10.0..10.0f64,
        radius in 0.001..10.0f64,
        curve in arb_curve(),
    ) {
        let weight = falloff(distance, radius, curve);
        prop_assert!((0.0..=1.0).contains(&weight));
    }

    #[test]
    fn proptest_undo_restores_mesh(
        history in prop::collection::vec(arb_operation(), 0..4),
        op in arb_operation(),
    ) {
        let before = history.into_iter().fold(coarse_cylinder(), apply_operation);
        let after = undo(apply_operation(before.clone(), op));

        prop_assert_eq!(after.undo_stack(), before.undo_stack());
        prop_assert_eq!(bits(after.vertices()), bits(before.vertices()));
    }

    #[test]
    fn proptest_apply_clears_redo(
        first in arb_operation(),
        second in arb_operation(),
    ) {
        let data = apply_operation(undo(apply_operation(coarse_cylinder(), first)), second);
        prop_assert!(data.redo_stack().is_empty());
        prop_assert_eq!(data.undo_count(), 1);
    }

    #[test]
    fn proptest_redo_after_undo_is_identity(
        ops in prop::collection::vec(arb_operation(), 1..4),
    ) {
        let applied = ops.into_iter().fold(coarse_cylinder(), apply_operation);
        let redone = redo(undo(applied.clone()));
        prop_assert_eq!(redone.undo_stack(), applied.undo_stack());
        prop_assert_eq!(bits(redone.vertices()), bits(applied.vertices()));
    }
}

#[test]
fn test_push_scenario_on_single_vertex() {
    let mut vertices = vec![1.0f32, 0.0, 0.0];
    let op = SculptOperation::new("push", DeformationType::Push, Vector3D::ZERO, Vector3D::Y)
        .with_radius(2.0)
        .with_strength(0.5)
        .with_falloff(FalloffCurve::Linear);
    sculpting::apply_deformation(&mut vertices, &op);
    assert_eq!(vertices, vec![1.0, 0.25, 0.0]);
}

#[test]
fn test_default_engine_for_every_parametric_envelope() {
    for envelope in [
        EnvelopeSpec::cylinder(5.0, 20.0),
        EnvelopeSpec::cuboid(4.0, 3.0, 10.0),
        EnvelopeSpec::torus(10.0, 3.0),
        EnvelopeSpec::freeform(6.0),
    ] {
        let data = initialize_sculpting(&envelope).unwrap();
        assert!(data.is_manifold());
        assert!(data.volume_valid());
        assert!(!data.vertex_bytes().is_empty());
    }
}
