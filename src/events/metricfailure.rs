//! Metric failure event and the observer that records it.
//!
//! The evaluator systems never panic and never substitute a default for
//! malformed input. When an engine rejects its input the system leaves the
//! entity's output at its not-applicable sentinel and triggers a
//! [`MetricFailureEvent`]. [`metric_failure_observer`] logs the failure and
//! appends it to [`MetricFailures`], where callers pick it up.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::error;
use std::fmt;

use crate::components::agent::Agent;
use crate::error::MetricsError;
use crate::resources::failures::{MetricFailure, MetricFailures};
use crate::resources::worldtime::WorldTime;

/// Which metric failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    CentroidQuality,
    NoisePerceived,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::CentroidQuality => f.write_str("CentroidQuality"),
            MetricKind::NoisePerceived => f.write_str("NoisePerceived"),
        }
    }
}

/// Event fired when a metric cannot be computed for an entity.
#[derive(Event, Debug, Clone)]
pub struct MetricFailureEvent {
    pub entity: Entity,
    pub metric: MetricKind,
    pub error: MetricsError,
}

/// Global observer that logs a [`MetricFailureEvent`] and stores it in [`MetricFailures`].
pub fn metric_failure_observer(
    trigger: On<MetricFailureEvent>,
    time: Res<WorldTime>,
    agents: Query<&Agent>,
    mut failures: ResMut<MetricFailures>,
) {
    let event = trigger.event();
    let agent = agents.get(event.entity).ok().map(|a| a.id().to_string());
    error!(
        "step {}: {} failed for {}: {}",
        time.step,
        event.metric,
        agent.as_deref().unwrap_or("<unnamed entity>"),
        event.error
    );
    let evaluation = failures.evaluation;
    failures.push(MetricFailure {
        evaluation,
        step: time.step,
        entity: event.entity,
        agent,
        metric: event.metric,
        error: event.error.clone(),
    });
}
