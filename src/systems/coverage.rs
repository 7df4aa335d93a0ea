//! Coverage quality system.
//!
//! This module provides [`centroid_quality_system`], which evaluates the
//! [`CentroidQuality`] of every entity carrying that component.
//!
//! # System Flow
//!
//! Each tick:
//!
//! 1. Every [`Camera`] is reduced to the targets it currently sees: entries of
//!    its visible-node list that are themselves active [`Target`]s
//! 2. For each evaluated entity that is not an active target, the output is
//!    set to `NaN`
//! 3. Otherwise the cameras seeing it are collected, their [`BlindSpot`] is
//!    placed in the scene frame and reduced to a
//!    [`CameraQualityInformation`], and the
//!    [`CoverageQualityEngine`](crate::metrics::coverage::CoverageQualityEngine)
//!    folds them into one score
//!
//! A camera that sees a target but has no blind spot, or whose blind spot is
//! malformed, fails the target's metric with a
//! [`MetricFailureEvent`]; the output stays `NaN`.

use bevy_ecs::prelude::*;
use log::debug;
use smallvec::SmallVec;

use crate::components::agent::Agent;
use crate::components::camera::{BlindSpot, Camera};
use crate::components::mapposition::MapPosition;
use crate::components::metric::CentroidQuality;
use crate::components::rotation::Rotation;
use crate::components::target::{Target, is_active_target};
use crate::error::{MetricsError, MetricsResult};
use crate::events::metricfailure::{MetricFailureEvent, MetricKind};
use crate::metrics::geometry::CameraQualityInformation;
use crate::resources::metricsconfig::MetricsConfig;

/// A camera reduced to what the coverage metric needs.
struct CameraView {
    visible_targets: SmallVec<[Entity; 8]>,
    quality: MetricsResult<CameraQualityInformation>,
}

/// Computes [`CentroidQuality`] for every entity that carries it.
pub fn centroid_quality_system(
    config: Res<MetricsConfig>,
    mut evaluated: Query<(Entity, &MapPosition, Option<&Target>, &mut CentroidQuality)>,
    cameras: Query<(
        Entity,
        &Camera,
        Option<&BlindSpot>,
        &MapPosition,
        Option<&Rotation>,
        Option<&Agent>,
    )>,
    targets: Query<&Target>,
    mut commands: Commands,
) {
    let engine = config.coverage_engine();

    let views: Vec<CameraView> = cameras
        .iter()
        .map(|(entity, camera, blind_spot, position, rotation, agent)| {
            let visible_targets = camera
                .visible
                .iter()
                .copied()
                .filter(|&seen| is_active_target(targets.get(seen).ok()))
                .collect();
            let quality = match blind_spot {
                Some(blind_spot) => {
                    let degrees = rotation.map(|r| r.degrees).unwrap_or(0.0);
                    CameraQualityInformation::from_shape(
                        &blind_spot.world_shape(position.pos, degrees),
                    )
                }
                None => Err(MetricsError::MissingBlindSpot {
                    camera: agent
                        .map(|a| a.id.clone())
                        .unwrap_or_else(|| format!("{:?}", entity)),
                }),
            };
            CameraView {
                visible_targets,
                quality,
            }
        })
        .collect();

    for (entity, position, target, mut quality) in evaluated.iter_mut() {
        if !is_active_target(target) {
            quality.0 = f64::NAN;
            continue;
        }

        let observers: MetricsResult<Vec<CameraQualityInformation>> = views
            .iter()
            .filter(|view| view.visible_targets.contains(&entity))
            .map(|view| view.quality.clone())
            .collect();

        match observers {
            Ok(observers) => {
                quality.0 = engine.compute_quality(position.pos, &observers);
                debug!(
                    "{:?}: coverage {} from {} camera(s)",
                    entity,
                    quality.0,
                    observers.len()
                );
            }
            Err(error) => {
                quality.0 = f64::NAN;
                commands.trigger(MetricFailureEvent {
                    entity,
                    metric: MetricKind::CentroidQuality,
                    error,
                });
            }
        }
    }
}
