//! Metric systems.
//!
//! Submodules overview
//! - [`acoustics`] – perceived noise level at every listening entity
//! - [`coverage`] – coverage quality of every tracked target
//! - [`time`] – update the snapshot step and time
pub mod acoustics;
pub mod coverage;
pub mod time;
