//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource before a snapshot is evaluated.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Set step and elapsed time on the `WorldTime` resource.
///
/// `delta` is computed against the previously evaluated snapshot and clamped
/// to zero when snapshots arrive out of order.
pub fn update_world_time(world: &mut World, step: u64, elapsed: f64) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.delta = (elapsed - wt.elapsed).max(0.0);
    wt.step = step;
    wt.elapsed = elapsed;
}
