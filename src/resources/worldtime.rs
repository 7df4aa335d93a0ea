use bevy_ecs::prelude::Resource;

/// Timestep of the snapshot currently loaded in the world.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldTime {
    /// Simulation step number of the snapshot.
    pub step: u64,
    /// Simulation time of the snapshot, in seconds.
    pub elapsed: f64,
    /// Time since the previously evaluated snapshot.
    pub delta: f64,
}
