//! Metric failure log.
//!
//! The [`MetricFailures`] resource collects every invariant violation hit by
//! the evaluator systems. It is filled by
//! [`metric_failure_observer`](crate::events::metricfailure::metric_failure_observer)
//! and never cleared, so it keeps the whole history of a run. Each failure is
//! stamped with the evaluation it happened in; reports select theirs with
//! [`MetricFailures::for_evaluation`].

use bevy_ecs::prelude::{Entity, Resource};

use crate::error::MetricsError;
use crate::events::metricfailure::MetricKind;

/// One metric that could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFailure {
    /// Evaluation counter value when the failure was recorded.
    pub evaluation: u64,
    /// Step of the snapshot being evaluated.
    pub step: u64,
    /// Entity whose metric failed.
    pub entity: Entity,
    /// Scene id of that entity, when it has one.
    pub agent: Option<String>,
    pub metric: MetricKind,
    pub error: MetricsError,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct MetricFailures {
    pub failures: Vec<MetricFailure>,
    /// Number of evaluations started so far.
    pub evaluation: u64,
}

impl MetricFailures {
    /// Start a new evaluation and return its number. Failures pushed from
    /// now on belong to it.
    pub fn begin_evaluation(&mut self) -> u64 {
        self.evaluation += 1;
        self.evaluation
    }

    pub fn push(&mut self, failure: MetricFailure) {
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Failures recorded during evaluation number `evaluation`.
    pub fn for_evaluation(&self, evaluation: u64) -> impl Iterator<Item = &MetricFailure> {
        self.failures
            .iter()
            .filter(move |f| f.evaluation == evaluation)
    }

    /// Failures of the evaluation in progress (or the last one finished).
    pub fn current(&self) -> impl Iterator<Item = &MetricFailure> {
        self.for_evaluation(self.evaluation)
    }
}
