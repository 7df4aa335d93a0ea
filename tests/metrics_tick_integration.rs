//! Metric tick integration tests for the coverage and noise systems.

use bevy_ecs::prelude::*;

use scenemetrics::components::agent::Agent;
use scenemetrics::components::camera::{BlindSpot, Camera};
use scenemetrics::components::mapposition::MapPosition;
use scenemetrics::components::metric::{CentroidQuality, NoisePerceived};
use scenemetrics::components::noisesource::NoiseSource;
use scenemetrics::components::rotation::Rotation;
use scenemetrics::components::target::Target;
use scenemetrics::error::MetricsError;
use scenemetrics::evaluation::{metrics_schedule, new_world};
use scenemetrics::events::metricfailure::MetricKind;
use scenemetrics::metrics::acoustics::SILENCE;
use scenemetrics::metrics::coverage::CoveragePolicy;
use scenemetrics::resources::failures::MetricFailures;
use scenemetrics::resources::metricsconfig::MetricsConfig;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Square blind spot of half-size 1 around the camera pivot.
const UNIT_SQUARE: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

fn make_world() -> World {
    let mut config = MetricsConfig::new();
    config.decibel_emitted = 80.0;
    config.reference_distance = 1.0;
    config.source_height = 10.0;
    config.hearing_threshold = 25.0;
    new_world(config)
}

fn tick(world: &mut World) {
    let mut schedule = metrics_schedule();
    schedule.run(world);
}

fn spawn_target(world: &mut World, x: f64, y: f64, active: bool) -> Entity {
    world
        .spawn((
            MapPosition::new(x, y),
            Target::new(active),
            CentroidQuality::default(),
        ))
        .id()
}

fn spawn_camera(world: &mut World, x: f64, y: f64, sees: &[Entity], shape: &[(f64, f64)]) -> Entity {
    world
        .spawn((
            MapPosition::new(x, y),
            Camera::new(sees.iter().copied()),
            BlindSpot::from_vertices(shape),
        ))
        .id()
}

fn quality(world: &World, entity: Entity) -> f64 {
    world.get::<CentroidQuality>(entity).unwrap().0
}

fn noise(world: &World, entity: Entity) -> f64 {
    world.get::<NoisePerceived>(entity).unwrap().0
}

// ==================== COVERAGE ====================

#[test]
fn observed_target_gets_quality_from_blind_spot() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 10.0, true);
    spawn_camera(&mut world, 0.0, 0.0, &[target], &UNIT_SQUARE);

    tick(&mut world);

    // centroid (0,0), worst vertex (-1,-1), d = 10
    let expected = 1.0 - 2f64.sqrt() / 10.0;
    assert!(approx_eq(quality(&world, target), expected));
}

#[test]
fn inactive_target_is_nan_even_when_seen() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 10.0, false);
    spawn_camera(&mut world, 0.0, 0.0, &[target], &UNIT_SQUARE);

    tick(&mut world);

    assert!(quality(&world, target).is_nan());
}

#[test]
fn entity_without_target_flag_is_nan() {
    let mut world = make_world();
    let node = world
        .spawn((MapPosition::new(0.0, 10.0), CentroidQuality(0.5)))
        .id();
    spawn_camera(&mut world, 0.0, 0.0, &[node], &UNIT_SQUARE);

    tick(&mut world);

    assert!(quality(&world, node).is_nan());
}

#[test]
fn unobserved_target_is_nan() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 10.0, true);
    let other = spawn_target(&mut world, 5.0, 5.0, true);
    spawn_camera(&mut world, 0.0, 0.0, &[other], &UNIT_SQUARE);

    tick(&mut world);

    assert!(quality(&world, target).is_nan());
    assert!(!quality(&world, other).is_nan());
}

#[test]
fn camera_rotation_moves_the_blind_spot() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 10.0, true);
    // Blind spot ahead of the camera, centred at local (2, 0).
    let ahead = [(1.0, -1.0), (3.0, -1.0), (3.0, 1.0), (1.0, 1.0)];
    let camera = spawn_camera(&mut world, 0.0, 0.0, &[target], &ahead);
    world.entity_mut(camera).insert(Rotation { degrees: 90.0 });

    tick(&mut world);

    // Rotated centroid sits at (0, 2): d = 8, r = sqrt(2).
    let expected = 1.0 - 2f64.sqrt() / 8.0;
    assert!((quality(&world, target) - expected).abs() < 1e-9);
}

#[test]
fn worst_camera_decides_by_default() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 0.0, true);
    spawn_camera(&mut world, 10.0, 0.0, &[target], &UNIT_SQUARE);
    spawn_camera(&mut world, -4.0, 0.0, &[target], &UNIT_SQUARE);

    tick(&mut world);

    let near = 1.0 - 2f64.sqrt() / 4.0;
    assert!(approx_eq(quality(&world, target), near));
}

#[test]
fn policy_change_applies_on_next_tick() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 0.0, true);
    spawn_camera(&mut world, 10.0, 0.0, &[target], &UNIT_SQUARE);
    spawn_camera(&mut world, -4.0, 0.0, &[target], &UNIT_SQUARE);

    world.resource_mut::<MetricsConfig>().coverage_policy = CoveragePolicy::BestCase;
    tick(&mut world);

    let far = 1.0 - 2f64.sqrt() / 10.0;
    assert!(approx_eq(quality(&world, target), far));
}

#[test]
fn camera_without_blind_spot_fails_the_target() {
    let mut world = make_world();
    let target = world
        .spawn((
            Agent::new("zebra"),
            MapPosition::new(0.0, 10.0),
            Target::default(),
            CentroidQuality(0.9),
        ))
        .id();
    world.spawn((
        Agent::new("drone"),
        MapPosition::new(0.0, 0.0),
        Camera::new([target]),
    ));

    tick(&mut world);

    assert!(quality(&world, target).is_nan());
    let failures = world.resource::<MetricFailures>();
    assert_eq!(failures.len(), 1);
    let failure = &failures.failures[0];
    assert_eq!(failure.entity, target);
    assert_eq!(failure.agent.as_deref(), Some("zebra"));
    assert_eq!(failure.metric, MetricKind::CentroidQuality);
    assert_eq!(
        failure.error,
        MetricsError::MissingBlindSpot {
            camera: "drone".into()
        }
    );
}

#[test]
fn camera_without_blind_spot_is_harmless_when_it_sees_no_target() {
    let mut world = make_world();
    let bystander = world.spawn(MapPosition::new(3.0, 3.0)).id();
    world.spawn((MapPosition::new(0.0, 0.0), Camera::new([bystander])));

    tick(&mut world);

    assert!(world.resource::<MetricFailures>().is_empty());
}

#[test]
fn degenerate_blind_spot_fails_the_target() {
    let mut world = make_world();
    let target = spawn_target(&mut world, 0.0, 10.0, true);
    spawn_camera(
        &mut world,
        0.0,
        0.0,
        &[target],
        &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)],
    );

    tick(&mut world);

    assert!(quality(&world, target).is_nan());
    let failures = world.resource::<MetricFailures>();
    assert_eq!(failures.len(), 1);
    assert!(matches!(
        failures.failures[0].error,
        MetricsError::DegenerateShape { vertices: 3 }
    ));
}

// ==================== NOISE ====================

#[test]
fn no_sources_is_silence() {
    let mut world = make_world();
    let listener = world
        .spawn((MapPosition::new(0.0, 0.0), NoisePerceived(50.0)))
        .id();

    tick(&mut world);

    assert_eq!(noise(&world, listener), SILENCE);
}

#[test]
fn source_overhead_is_heard_from_its_height() {
    let mut world = make_world();
    let listener = world
        .spawn((MapPosition::new(0.0, 0.0), NoisePerceived::default()))
        .id();
    world.spawn((MapPosition::new(0.0, 0.0), NoiseSource));

    tick(&mut world);

    // 80 dB at 1 m, heard from 10 m: 60 dB.
    assert!(approx_eq(noise(&world, listener), 60.0));
}

#[test]
fn two_sources_add_as_pressures() {
    let mut world = make_world();
    let listener = world
        .spawn((MapPosition::new(0.0, 0.0), NoisePerceived::default()))
        .id();
    world.spawn((MapPosition::new(0.0, 0.0), NoiseSource));
    world.spawn((MapPosition::new(0.0, 0.0), NoiseSource));

    tick(&mut world);

    assert!(approx_eq(noise(&world, listener), 60.0 + 20.0 * 2f64.log10()));
}

#[test]
fn distant_source_is_below_threshold() {
    let mut world = make_world();
    let listener = world
        .spawn((MapPosition::new(0.0, 0.0), NoisePerceived::default()))
        .id();
    // hypot(600, 10) > 562 m, where 80 dB falls under 25 dB.
    world.spawn((MapPosition::new(600.0, 0.0), NoiseSource));

    tick(&mut world);

    assert!(world.get::<NoisePerceived>(listener).unwrap().is_silent());
}

#[test]
fn grounded_source_on_listener_fails() {
    let mut world = make_world();
    world.resource_mut::<MetricsConfig>().source_height = 0.0;
    let listener = world
        .spawn((MapPosition::new(1.0, 1.0), NoisePerceived(70.0), NoiseSource))
        .id();

    tick(&mut world);

    assert_eq!(noise(&world, listener), SILENCE);
    let failures = world.resource::<MetricFailures>();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures.failures[0].metric, MetricKind::NoisePerceived);
    assert!(matches!(
        failures.failures[0].error,
        MetricsError::InvalidDistance { .. }
    ));
}

#[test]
fn only_entities_with_outputs_are_evaluated() {
    let mut world = make_world();
    let target = world
        .spawn((MapPosition::new(0.0, 10.0), Target::default()))
        .id();
    spawn_camera(&mut world, 0.0, 0.0, &[target], &UNIT_SQUARE);
    world.spawn((MapPosition::new(0.0, 0.0), NoiseSource));

    tick(&mut world);

    assert!(world.get::<CentroidQuality>(target).is_none());
    assert!(world.get::<NoisePerceived>(target).is_none());
}
