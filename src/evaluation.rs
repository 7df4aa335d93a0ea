//! World setup and per-snapshot evaluation.
//!
//! Builds an ECS world holding the metric resources and observers, the
//! schedule running both evaluator systems, and drives one snapshot through
//! them.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::error::MetricsResult;
use crate::events::metricfailure::metric_failure_observer;
use crate::resources::agentindex::AgentIndex;
use crate::resources::failures::MetricFailures;
use crate::resources::metricsconfig::MetricsConfig;
use crate::resources::worldtime::WorldTime;
use crate::scene::{SceneReport, SceneSnapshot};
use crate::systems::acoustics::noise_perceived_system;
use crate::systems::coverage::centroid_quality_system;
use crate::systems::time::update_world_time;

/// Create a world with every resource and observer the metric systems need.
pub fn new_world(config: MetricsConfig) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(WorldTime::default());
    world.insert_resource(AgentIndex::default());
    world.insert_resource(MetricFailures::default());
    world.spawn(Observer::new(metric_failure_observer));
    // Ensure the observer is registered before any system triggers failures.
    world.flush();
    world
}

/// Schedule evaluating both metrics. The two systems share no mutable data
/// and may run in parallel.
pub fn metrics_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((centroid_quality_system, noise_perceived_system));
    schedule
}

/// Spawn `snapshot`, run the metric systems once and collect the results.
pub fn evaluate_snapshot(
    world: &mut World,
    schedule: &mut Schedule,
    snapshot: &SceneSnapshot,
) -> MetricsResult<SceneReport> {
    snapshot.spawn(world)?;
    update_world_time(world, snapshot.step, snapshot.time);
    world.resource_mut::<MetricFailures>().begin_evaluation();

    schedule.run(world);

    let report = SceneReport::collect(world);
    let delta = world.resource::<WorldTime>().delta;
    info!(
        "step {} (t={}, dt={}): evaluated {} agent(s), {} failure(s)",
        report.step,
        report.time,
        delta,
        report.agents.len(),
        report.failures.len()
    );
    Ok(report)
}
