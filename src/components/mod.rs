//! ECS components for scene agents.
//!
//! Agent roles are expressed as optional components rather than a type
//! hierarchy; a system queries exactly the capabilities it needs.
//!
//! Submodules overview:
//! - [`agent`] – scene identifier of an agent
//! - [`camera`] – visible-node list and blind-spot polygon of a camera
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`metric`] – output components written by the metric systems
//! - [`noisesource`] – marker for airborne noise emitters
//! - [`rotation`] – heading in degrees
//! - [`target`] – tracked-target flag

pub mod agent;
pub mod camera;
pub mod mapposition;
pub mod metric;
pub mod noisesource;
pub mod rotation;
pub mod target;
