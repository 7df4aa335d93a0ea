//! Scene snapshots and per-snapshot reports.
//!
//! A [`SceneSnapshot`] is the state of every agent at one timestep, as
//! exported by the surrounding simulation. It is loaded from JSON, spawned into
//! the ECS world as components, and after the metric systems have run the
//! results are collected into a [`SceneReport`].
//!
//! # File Format
//!
//! ```json
//! {
//!   "step": 12,
//!   "time": 6.0,
//!   "agents": [
//!     { "id": "zebra-1", "x": 4.0, "y": 2.0, "target": true },
//!     { "id": "drone-1", "x": 0.0, "y": 0.0, "rotation": 90.0, "noise_source": true,
//!       "camera": { "visible": ["zebra-1"],
//!                   "blind_spot": [[-1, -1], [1, -1], [1, 1], [-1, 1]] } }
//!   ]
//! }
//! ```
//!
//! A file may also hold a JSON array of snapshots (a trace); they are
//! evaluated in order.

use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::agent::Agent;
use crate::components::camera::{BlindSpot, Camera};
use crate::components::mapposition::MapPosition;
use crate::components::metric::{CentroidQuality, NoisePerceived};
use crate::components::noisesource::NoiseSource;
use crate::components::rotation::Rotation;
use crate::components::target::Target;
use crate::error::{MetricsError, MetricsResult};
use crate::resources::agentindex::AgentIndex;
use crate::resources::failures::MetricFailures;
use crate::resources::worldtime::WorldTime;

fn default_true() -> bool {
    true
}

/// Camera capability of an agent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CameraSpec {
    /// Ids of the agents the camera currently reports as visible.
    #[serde(default)]
    pub visible: Vec<String>,
    /// Blind-spot polygon in the camera's local frame.
    #[serde(default)]
    pub blind_spot: Option<Vec<(f64, f64)>>,
}

/// One agent of a snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AgentSpec {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Heading in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Target flag; absent means the agent has no target role.
    #[serde(default)]
    pub target: Option<bool>,
    #[serde(default)]
    pub camera: Option<CameraSpec>,
    #[serde(default)]
    pub noise_source: bool,
    /// Evaluate coverage quality for this agent.
    #[serde(default = "default_true")]
    pub tracked: bool,
    /// Evaluate perceived noise for this agent.
    #[serde(default = "default_true")]
    pub listener: bool,
}

impl AgentSpec {
    /// A plain agent at `(x, y)` with no role, evaluated for both metrics.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            rotation: 0.0,
            target: None,
            camera: None,
            noise_source: false,
            tracked: true,
            listener: true,
        }
    }

    pub fn with_target(mut self, active: bool) -> Self {
        self.target = Some(active);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_camera(mut self, visible: &[&str], blind_spot: Option<&[(f64, f64)]>) -> Self {
        self.camera = Some(CameraSpec {
            visible: visible.iter().map(|id| id.to_string()).collect(),
            blind_spot: blind_spot.map(|v| v.to_vec()),
        });
        self
    }

    pub fn with_noise_source(mut self) -> Self {
        self.noise_source = true;
        self
    }
}

/// State of every agent at one timestep.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub step: u64,
    #[serde(default)]
    pub time: f64,
    pub agents: Vec<AgentSpec>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SceneFile {
    Trace(Vec<SceneSnapshot>),
    Single(SceneSnapshot),
}

impl SceneSnapshot {
    /// Loads one snapshot or a trace of snapshots from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Vec<Self>, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json_str(&file_content)
    }

    /// Parses one snapshot or a trace of snapshots from JSON text.
    pub fn from_json_str(content: &str) -> Result<Vec<Self>, Box<dyn std::error::Error>> {
        let scene: SceneFile = serde_json::from_str(content)?;
        Ok(match scene {
            SceneFile::Trace(snapshots) => snapshots,
            SceneFile::Single(snapshot) => vec![snapshot],
        })
    }

    /// Checks that ids are unique and every visible-node reference resolves.
    pub fn validate(&self) -> MetricsResult<()> {
        let mut ids: FxHashSet<&str> = FxHashSet::default();
        for agent in &self.agents {
            if !ids.insert(agent.id.as_str()) {
                return Err(MetricsError::DuplicateAgent {
                    id: agent.id.clone(),
                });
            }
        }
        for camera in self.agents.iter().filter_map(|a| a.camera.as_ref()) {
            if let Some(id) = camera.visible.iter().find(|id| !ids.contains(id.as_str())) {
                return Err(MetricsError::UnknownAgent { id: id.clone() });
            }
        }
        Ok(())
    }

    /// Replaces the agents of the previous snapshot with this one's.
    ///
    /// Entities without an [`Agent`] component are left alone. The world is
    /// untouched when validation fails.
    pub fn spawn(&self, world: &mut World) -> MetricsResult<()> {
        self.validate()?;

        let mut previous = world.query_filtered::<Entity, With<Agent>>();
        let stale: Vec<Entity> = previous.iter(world).collect();
        for entity in stale {
            world.despawn(entity);
        }

        let mut index = AgentIndex::default();
        for agent in &self.agents {
            let mut entity = world.spawn((
                Agent::new(agent.id.clone()),
                MapPosition::new(agent.x, agent.y),
                Rotation {
                    degrees: agent.rotation,
                },
            ));
            if let Some(active) = agent.target {
                entity.insert(Target::new(active));
            }
            if agent.noise_source {
                entity.insert(NoiseSource);
            }
            if agent.tracked {
                entity.insert(CentroidQuality::default());
            }
            if agent.listener {
                entity.insert(NoisePerceived::default());
            }
            if let Some(vertices) = agent.camera.as_ref().and_then(|c| c.blind_spot.as_ref()) {
                entity.insert(BlindSpot::from_vertices(vertices));
            }
            index.insert(agent.id.clone(), entity.id());
        }

        // Visible lists may point at agents spawned after the camera.
        for agent in &self.agents {
            let (Some(camera), Some(entity)) = (&agent.camera, index.get(&agent.id)) else {
                continue;
            };
            let visible = camera
                .visible
                .iter()
                .filter_map(|id| index.get(id))
                .collect::<Vec<Entity>>();
            world.entity_mut(entity).insert(Camera::new(visible));
        }

        world.insert_resource(index);
        Ok(())
    }
}

/// Metric values of one agent after evaluation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AgentReport {
    pub id: String,
    /// Coverage quality; `null` when not applicable.
    pub centroid_quality: Option<f64>,
    /// Perceived level in dB; `null` when silent.
    pub noise_perceived: Option<f64>,
}

/// Metric values of every agent for one snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneReport {
    pub step: u64,
    pub time: f64,
    pub agents: Vec<AgentReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

impl SceneReport {
    /// Reads the metric outputs currently in the world, sorted by agent id.
    pub fn collect(world: &mut World) -> Self {
        let time = *world.resource::<WorldTime>();

        let mut query =
            world.query::<(&Agent, Option<&CentroidQuality>, Option<&NoisePerceived>)>();
        let mut agents: Vec<AgentReport> = query
            .iter(world)
            .map(|(agent, quality, noise)| AgentReport {
                id: agent.id().to_string(),
                centroid_quality: quality.and_then(CentroidQuality::value),
                noise_perceived: noise.and_then(NoisePerceived::value),
            })
            .collect();
        agents.sort_by(|a, b| a.id.cmp(&b.id));

        let failures = world
            .get_resource::<MetricFailures>()
            .map(|failures| {
                failures
                    .current()
                    .map(|f| {
                        format!(
                            "{}: {}: {}",
                            f.agent.as_deref().unwrap_or("<unnamed entity>"),
                            f.metric,
                            f.error
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            step: time.step,
            time: time.elapsed,
            agents,
            failures,
        }
    }

    /// Report line for `id`, if the agent exists.
    pub fn agent(&self, id: &str) -> Option<&AgentReport> {
        self.agents.iter().find(|a| a.id == id)
    }
}
