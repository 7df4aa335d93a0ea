//! Error type shared by the metric engines and the evaluator systems.
//!
//! Every variant names the precondition that broke. Results that are merely
//! "not applicable" (a node that is not a target, a listener with no noise
//! sources) are never errors; they are reported with sentinel values instead.

use thiserror::Error;

/// Invariant violations detected while computing a metric.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("blind-spot shape has no vertices")]
    EmptyShape,
    #[error("blind-spot shape with {vertices} vertices encloses no area")]
    DegenerateShape { vertices: usize },
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },
    #[error("{what} distance must be finite and positive, got {value}")]
    InvalidDistance { what: &'static str, value: f64 },
    #[error("camera {camera} has no blind-spot shape")]
    MissingBlindSpot { camera: String },
    #[error("scene defines agent '{id}' more than once")]
    DuplicateAgent { id: String },
    #[error("scene references unknown agent '{id}'")]
    UnknownAgent { id: String },
}

pub type MetricsResult<T> = Result<T, MetricsError>;
