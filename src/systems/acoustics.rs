//! Perceived noise system.
//!
//! This module provides [`noise_perceived_system`], which evaluates
//! [`NoisePerceived`] for every entity carrying that component from the ground
//! distance to every [`NoiseSource`] in the world.
//!
//! Sources fly at the configured height, so a source directly above the
//! listener is still `source_height` away. A listener that is itself a source
//! hears itself from that distance too.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::mapposition::MapPosition;
use crate::components::metric::NoisePerceived;
use crate::components::noisesource::NoiseSource;
use crate::events::metricfailure::{MetricFailureEvent, MetricKind};
use crate::metrics::acoustics::SILENCE;
use crate::resources::metricsconfig::MetricsConfig;

/// Computes [`NoisePerceived`] for every entity that carries it.
pub fn noise_perceived_system(
    config: Res<MetricsConfig>,
    mut listeners: Query<(Entity, &MapPosition, &mut NoisePerceived)>,
    sources: Query<&MapPosition, With<NoiseSource>>,
    mut commands: Commands,
) {
    let engine = config.acoustic_engine();
    let mut horizontal: Vec<f64> = Vec::new();

    for (entity, position, mut perceived) in listeners.iter_mut() {
        horizontal.clear();
        horizontal.extend(sources.iter().map(|source| position.distance(source)));

        match engine.perceived_level_from_ground(&horizontal) {
            Ok(level) => {
                perceived.0 = level;
                debug!(
                    "{:?}: perceived {} dB from {} source(s)",
                    entity,
                    level,
                    horizontal.len()
                );
            }
            Err(error) => {
                perceived.0 = SILENCE;
                commands.trigger(MetricFailureEvent {
                    entity,
                    metric: MetricKind::NoisePerceived,
                    error,
                });
            }
        }
    }
}
