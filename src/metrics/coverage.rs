//! Visual coverage quality of a tracked point.
//!
//! Each observing camera contributes a quality in `[0, 1]` derived from how far
//! the target sits from the camera's blind spot, measured in units of the
//! blind spot's worst-case radius:
//!
//! ```text
//! r = |worst_case - centroid|
//! d = |target - centroid|
//! q = clamp(1 - r / d, 0, 1)
//! ```
//!
//! `q` is zero while the target is inside the circle that encloses the blind
//! spot and approaches one as the target moves away from it. The per-camera
//! values are folded with a [`CoveragePolicy`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::metrics::geometry::{CameraQualityInformation, Point2D};

/// Rule used to fold per-camera qualities into a single score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// The weakest observing camera decides the score.
    #[default]
    WorstCase,
    /// Arithmetic mean over the observing cameras.
    Mean,
    /// The strongest observing camera decides the score.
    BestCase,
}

impl CoveragePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoveragePolicy::WorstCase => "worst_case",
            CoveragePolicy::Mean => "mean",
            CoveragePolicy::BestCase => "best_case",
        }
    }
}

impl fmt::Display for CoveragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoveragePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "worst_case" | "worst" | "min" => Ok(CoveragePolicy::WorstCase),
            "mean" | "average" => Ok(CoveragePolicy::Mean),
            "best_case" | "best" | "max" => Ok(CoveragePolicy::BestCase),
            other => Err(format!("Unknown coverage policy: {}", other)),
        }
    }
}

/// Stateless calculator for the coverage quality of a point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoverageQualityEngine {
    pub policy: CoveragePolicy,
}

impl CoverageQualityEngine {
    pub fn new(policy: CoveragePolicy) -> Self {
        Self { policy }
    }

    /// Quality contributed by one camera.
    pub fn camera_quality(target: Point2D, camera: &CameraQualityInformation) -> f64 {
        let distance = target.distance(camera.centroid);
        if distance <= 0.0 {
            return 0.0;
        }
        (1.0 - camera.radius() / distance).clamp(0.0, 1.0)
    }

    /// Coverage quality of `target` as seen by `cameras`.
    ///
    /// Returns `NaN` when no camera observes the target: no observer means no
    /// information, not perfect coverage.
    pub fn compute_quality(&self, target: Point2D, cameras: &[CameraQualityInformation]) -> f64 {
        if cameras.is_empty() {
            return f64::NAN;
        }
        let qualities = cameras
            .iter()
            .map(|camera| Self::camera_quality(target, camera));
        match self.policy {
            CoveragePolicy::WorstCase => qualities.fold(f64::INFINITY, f64::min),
            CoveragePolicy::BestCase => qualities.fold(f64::NEG_INFINITY, f64::max),
            CoveragePolicy::Mean => qualities.sum::<f64>() / cameras.len() as f64,
        }
    }

    /// Coverage quality for a node that may or may not be an active target.
    ///
    /// Non-targets yield `NaN` whatever the cameras say.
    pub fn node_quality(
        &self,
        is_target: bool,
        target: Point2D,
        cameras: &[CameraQualityInformation],
    ) -> f64 {
        if !is_target {
            return f64::NAN;
        }
        self.compute_quality(target, cameras)
    }
}
