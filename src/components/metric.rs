//! Metric output components.
//!
//! An entity is evaluated for a metric when it carries the matching output
//! component. The evaluator systems overwrite the value every tick; values are
//! never carried over between snapshots.
//!
//! - [`CentroidQuality`] – coverage quality, `NaN` when not applicable
//! - [`NoisePerceived`] – perceived level in dB, [`SILENCE`] when inaudible
//!
//! [`SILENCE`]: crate::metrics::acoustics::SILENCE

use bevy_ecs::prelude::Component;

use crate::metrics::acoustics::SILENCE;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CentroidQuality(pub f64);

impl Default for CentroidQuality {
    fn default() -> Self {
        Self(f64::NAN)
    }
}

impl CentroidQuality {
    /// The score, or `None` when the entity is not an observed target.
    pub fn value(&self) -> Option<f64> {
        self.0.is_finite().then_some(self.0)
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct NoisePerceived(pub f64);

impl Default for NoisePerceived {
    fn default() -> Self {
        Self(SILENCE)
    }
}

impl NoisePerceived {
    /// The level in dB, or `None` when nothing is audible.
    pub fn value(&self) -> Option<f64> {
        self.0.is_finite().then_some(self.0)
    }

    pub fn is_silent(&self) -> bool {
        self.0 == SILENCE
    }
}
