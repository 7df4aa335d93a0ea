use bevy_ecs::prelude::Component;

/// Heading of an agent in degrees, counter-clockwise.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
}
