//! Metrics configuration resource.
//!
//! Holds the per-deployment parameters of both metric engines, loaded from an
//! INI configuration file. Provides defaults for a safe start and methods to
//! load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [acoustics]
//! decibel_emitted = 80.0
//! reference_distance = 1.0
//! source_height = 10.0
//! hearing_threshold = 25.0
//!
//! [coverage]
//! policy = worst_case
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::metrics::acoustics::AcousticLevelEngine;
use crate::metrics::coverage::{CoverageQualityEngine, CoveragePolicy};

/// Default safe values for startup
const DEFAULT_DECIBEL_EMITTED: f64 = 80.0;
const DEFAULT_REFERENCE_DISTANCE: f64 = 1.0;
const DEFAULT_SOURCE_HEIGHT: f64 = 10.0;
const DEFAULT_HEARING_THRESHOLD: f64 = 25.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Metrics configuration resource.
///
/// The evaluator systems read it every tick and build their engines from it,
/// so changes take effect on the next snapshot.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Level emitted by each noise source, in dB.
    pub decibel_emitted: f64,
    /// Distance at which `decibel_emitted` is measured.
    pub reference_distance: f64,
    /// Height of the noise sources above the ground plane.
    pub source_height: f64,
    /// Minimum perceptible level, in dB.
    pub hearing_threshold: f64,
    /// How per-camera qualities are folded into one score.
    pub coverage_policy: CoveragePolicy,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            decibel_emitted: DEFAULT_DECIBEL_EMITTED,
            reference_distance: DEFAULT_REFERENCE_DISTANCE,
            source_height: DEFAULT_SOURCE_HEIGHT,
            hearing_threshold: DEFAULT_HEARING_THRESHOLD,
            coverage_policy: CoveragePolicy::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or a value cannot be parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config)
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, content: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config)
    }

    fn apply_ini(&mut self, config: &Ini) -> Result<(), String> {
        // [acoustics] section
        if let Some(db) = config.getfloat("acoustics", "decibel_emitted")? {
            self.decibel_emitted = db;
        }
        if let Some(distance) = config.getfloat("acoustics", "reference_distance")? {
            self.reference_distance = distance;
        }
        if let Some(height) = config.getfloat("acoustics", "source_height")? {
            self.source_height = height;
        }
        if let Some(threshold) = config.getfloat("acoustics", "hearing_threshold")? {
            self.hearing_threshold = threshold;
        }

        // [coverage] section
        if let Some(policy) = config.get("coverage", "policy") {
            self.coverage_policy = policy.parse()?;
        }

        info!(
            "Loaded config: {} dB at {} m, source height {} m, threshold {} dB, coverage policy {}",
            self.decibel_emitted,
            self.reference_distance,
            self.source_height,
            self.hearing_threshold,
            self.coverage_policy
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [acoustics] section
        config.set("acoustics", "decibel_emitted", Some(self.decibel_emitted.to_string()));
        config.set(
            "acoustics",
            "reference_distance",
            Some(self.reference_distance.to_string()),
        );
        config.set("acoustics", "source_height", Some(self.source_height.to_string()));
        config.set(
            "acoustics",
            "hearing_threshold",
            Some(self.hearing_threshold.to_string()),
        );

        // [coverage] section
        config.set("coverage", "policy", Some(self.coverage_policy.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Coverage engine for the configured policy.
    pub fn coverage_engine(&self) -> CoverageQualityEngine {
        CoverageQualityEngine::new(self.coverage_policy)
    }

    /// Acoustic engine for the configured emission parameters.
    pub fn acoustic_engine(&self) -> AcousticLevelEngine {
        AcousticLevelEngine::new(
            self.decibel_emitted,
            self.reference_distance,
            self.source_height,
            self.hearing_threshold,
        )
    }
}
