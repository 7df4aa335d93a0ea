//! World-space position component.
//!
//! Every agent of a scene snapshot carries a [`MapPosition`] in the shared
//! planar frame that cameras, targets and noise sources all use.

use bevy_ecs::prelude::Component;

use crate::metrics::geometry::Point2D;

/// World-space position (pivot) for an entity.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub pos: Point2D,
}

impl MapPosition {
    /// Create a MapPosition from x and y.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            pos: Point2D::new(x, y),
        }
    }

    /// Ground distance to another position.
    pub fn distance(&self, other: &MapPosition) -> f64 {
        self.pos.distance(other.pos)
    }
}
