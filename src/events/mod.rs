//! Event types and observers used by the metric systems.
//!
//! Submodules:
//! - [`metricfailure`] – invariant violations raised while computing a metric
pub mod metricfailure;
