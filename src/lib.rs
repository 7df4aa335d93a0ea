//! Scene metrics library.
//!
//! Computes two per-agent quality metrics over a snapshot of a spatial
//! multi-agent scene:
//!
//! - **coverage quality** of a tracked target, from the blind spots of the
//!   cameras observing it
//! - **perceived noise** at a point, from the pressure sum of every airborne
//!   noise source
//!
//! The calculators in [`metrics`] are pure functions. The ECS components,
//! resources, systems and events around them load a snapshot into a
//! `bevy_ecs` world and evaluate it.

pub mod components;
pub mod error;
pub mod evaluation;
pub mod events;
pub mod metrics;
pub mod resources;
pub mod scene;
pub mod systems;
