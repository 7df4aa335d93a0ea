//! Stateless metric engines.
//!
//! - [`geometry`] – points, blind-spot polygons and their centroid/worst-case reduction
//! - [`coverage`] – visual coverage quality of a target seen by several cameras
//! - [`acoustics`] – perceived level of several noise sources at a listening point
//!
//! The engines hold no state and touch no ECS data; the systems in
//! [`crate::systems`] feed them from the world.

pub mod acoustics;
pub mod coverage;
pub mod geometry;
