//! Camera role: visibility list and blind spot.
//!
//! A camera is split in two components so that each system only borrows the
//! capability it needs:
//!
//! - [`Camera`] – the entities the camera currently reports as visible, as
//!   produced by an external visibility computation
//! - [`BlindSpot`] – the region around the camera it cannot observe, in the
//!   camera's local frame
//!
//! # Frames
//!
//! The blind-spot polygon is stored relative to the camera pivot with the
//! camera facing 0°. [`BlindSpot::world_shape`] rotates it by the camera's
//! [`Rotation`](super::rotation::Rotation) and moves it to its
//! [`MapPosition`](super::mapposition::MapPosition).

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

use crate::metrics::geometry::{BlindSpotShape, Point2D};

/// Visible-node list of a camera for the current timestep.
#[derive(Component, Clone, Debug, Default)]
pub struct Camera {
    pub visible: SmallVec<[Entity; 8]>,
}

impl Camera {
    pub fn new(visible: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            visible: visible.into_iter().collect(),
        }
    }

    /// Whether `entity` is in the visible-node list.
    pub fn sees(&self, entity: Entity) -> bool {
        self.visible.contains(&entity)
    }
}

/// Blind-spot polygon in the camera's local frame.
#[derive(Component, Clone, Debug, Default, PartialEq)]
pub struct BlindSpot {
    pub local: BlindSpotShape,
}

impl BlindSpot {
    pub fn new(local: BlindSpotShape) -> Self {
        Self { local }
    }

    /// Build from local `(x, y)` vertex pairs.
    pub fn from_vertices(vertices: &[(f64, f64)]) -> Self {
        Self {
            local: BlindSpotShape::new(vertices.iter().copied().map(Point2D::from).collect()),
        }
    }

    /// The polygon in the scene frame for a camera at `position` heading `degrees`.
    pub fn world_shape(&self, position: Point2D, degrees: f64) -> BlindSpotShape {
        self.local.placed_at(position, degrees)
    }
}
