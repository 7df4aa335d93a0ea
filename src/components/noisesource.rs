use bevy_ecs::prelude::Component;

/// Marker for airborne noise emitters (drones). All sources share the
/// emission parameters of [`MetricsConfig`](crate::resources::metricsconfig::MetricsConfig).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct NoiseSource;
