//! Perceived noise level at a listening point.
//!
//! Each source is a point emitter whose level is known at a reference
//! distance. Sound pressure falls with `1/d`, so the level at distance `d` is
//!
//! ```text
//! L(d) = L(d_ref) - 20 * log10(d / d_ref)
//! ```
//!
//! Incoherent sources add in pressure, not in decibels:
//!
//! ```text
//! L_total = 20 * log10(sum(10^(L_i / 20)))
//! ```
//!
//! A total below the hearing threshold is reported as [`SILENCE`].

use crate::error::{MetricsError, MetricsResult};

/// Level reported when nothing is audible.
pub const SILENCE: f64 = f64::NEG_INFINITY;

/// Distance from an airborne source to a listener on the ground plane.
pub fn slant_distance(horizontal: f64, height: f64) -> f64 {
    horizontal.hypot(height)
}

/// Level at `distance` of a source measured at `decibel_emitted` from `reference_distance`.
pub fn dispersion_of_sound_decibel(
    decibel_emitted: f64,
    reference_distance: f64,
    distance: f64,
) -> MetricsResult<f64> {
    check_distance("reference", reference_distance)?;
    check_distance("source", distance)?;
    Ok(decibel_emitted - 20.0 * (distance / reference_distance).log10())
}

/// Combined level of incoherent sources, summed as sound pressures.
///
/// An empty slice sums to zero pressure, which is [`SILENCE`].
pub fn sum_of_sound_pressures(levels: &[f64]) -> f64 {
    let loudest = levels.iter().copied().fold(SILENCE, f64::max);
    if !loudest.is_finite() {
        return loudest;
    }
    // Factor out the loudest source so the exponentials stay in range.
    let relative: f64 = levels
        .iter()
        .map(|level| 10f64.powf((level - loudest) / 20.0))
        .sum();
    loudest + 20.0 * relative.log10()
}

/// Apply the hearing threshold to a combined level.
pub fn perceived_sound_level(total: f64, hearing_threshold: f64) -> f64 {
    if total < hearing_threshold {
        SILENCE
    } else {
        total
    }
}

/// Perceived level at a point given the slant distance to every source.
pub fn perceived_level(
    decibel_emitted: f64,
    reference_distance: f64,
    distances: &[f64],
    hearing_threshold: f64,
) -> MetricsResult<f64> {
    let levels = distances
        .iter()
        .map(|&d| dispersion_of_sound_decibel(decibel_emitted, reference_distance, d))
        .collect::<MetricsResult<Vec<f64>>>()?;
    Ok(perceived_sound_level(
        sum_of_sound_pressures(&levels),
        hearing_threshold,
    ))
}

fn check_distance(what: &'static str, value: f64) -> MetricsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MetricsError::InvalidDistance { what, value })
    }
}

/// Stateless calculator bound to one deployment's emission parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticLevelEngine {
    /// Level emitted by every source, in dB, measured at `reference_distance`.
    pub decibel_emitted: f64,
    /// Distance at which `decibel_emitted` was measured.
    pub reference_distance: f64,
    /// Height of the sources above the listening plane.
    pub source_height: f64,
    /// Minimum audible level in dB.
    pub hearing_threshold: f64,
}

impl AcousticLevelEngine {
    pub fn new(
        decibel_emitted: f64,
        reference_distance: f64,
        source_height: f64,
        hearing_threshold: f64,
    ) -> Self {
        Self {
            decibel_emitted,
            reference_distance,
            source_height,
            hearing_threshold,
        }
    }

    /// Perceived level for already folded (3D) source distances.
    pub fn perceived_level(&self, distances: &[f64]) -> MetricsResult<f64> {
        perceived_level(
            self.decibel_emitted,
            self.reference_distance,
            distances,
            self.hearing_threshold,
        )
    }

    /// Perceived level for ground-plane separations; the source height is folded in.
    pub fn perceived_level_from_ground(&self, horizontal: &[f64]) -> MetricsResult<f64> {
        let distances = horizontal
            .iter()
            .map(|&h| {
                if h.is_finite() && h >= 0.0 {
                    Ok(slant_distance(h, self.source_height))
                } else {
                    Err(MetricsError::InvalidDistance {
                        what: "horizontal",
                        value: h,
                    })
                }
            })
            .collect::<MetricsResult<Vec<f64>>>()?;
        self.perceived_level(&distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn dispersion_follows_inverse_distance_law() {
        let level = dispersion_of_sound_decibel(80.0, 1.0, 2.0).unwrap();
        assert!(approx_eq(level, 80.0 - 20.0 * 2f64.log10()));
        assert!((level - 73.98).abs() < 0.01);
    }

    #[test]
    fn dispersion_at_reference_distance_is_unchanged() {
        assert!(approx_eq(dispersion_of_sound_decibel(65.0, 3.0, 3.0).unwrap(), 65.0));
        // Closer than the reference gets louder.
        assert!(dispersion_of_sound_decibel(65.0, 3.0, 1.0).unwrap() > 65.0);
    }

    #[test]
    fn two_equal_sources_add_six_decibels() {
        let total = sum_of_sound_pressures(&[60.0, 60.0]);
        assert!(approx_eq(total, 60.0 + 20.0 * 2f64.log10()));
        assert!((total - 66.02).abs() < 0.01);
        assert!(total < 120.0);
    }

    #[test]
    fn quiet_source_barely_moves_the_total() {
        let total = sum_of_sound_pressures(&[90.0, 30.0]);
        assert!(total > 90.0 && total < 90.01);
    }

    #[test]
    fn empty_sum_is_silence() {
        assert_eq!(sum_of_sound_pressures(&[]), SILENCE);
        assert_eq!(perceived_level(80.0, 1.0, &[], 0.0).unwrap(), SILENCE);
    }

    #[test]
    fn very_loud_sources_do_not_overflow() {
        let total = sum_of_sound_pressures(&[7000.0, 7000.0]);
        assert!(total.is_finite());
        assert!(approx_eq(total, 7000.0 + 20.0 * 2f64.log10()));
    }

    #[test]
    fn threshold_clamps_inaudible_levels() {
        assert_eq!(perceived_sound_level(19.999, 20.0), SILENCE);
        assert_eq!(perceived_sound_level(20.0, 20.0), 20.0);
        assert_eq!(perceived_sound_level(42.0, 20.0), 42.0);
    }

    #[test]
    fn single_source_at_two_metres() {
        let level = perceived_level(80.0, 1.0, &[2.0], 0.0).unwrap();
        assert!(approx_eq(level, 80.0 - 20.0 * 2f64.log10()));
    }

    #[test]
    fn far_source_is_silent() {
        // 80 dB at 1 m falls to 20 dB at 1000 m.
        let level = perceived_level(80.0, 1.0, &[1000.0], 25.0).unwrap();
        assert_eq!(level, SILENCE);
    }

    #[test]
    fn invalid_distances_fail_fast() {
        assert_eq!(
            perceived_level(80.0, 1.0, &[2.0, 0.0], 0.0),
            Err(MetricsError::InvalidDistance {
                what: "source",
                value: 0.0
            })
        );
        assert!(perceived_level(80.0, 1.0, &[-1.0], 0.0).is_err());
        assert!(perceived_level(80.0, 1.0, &[f64::NAN], 0.0).is_err());
        assert!(matches!(
            perceived_level(80.0, 0.0, &[1.0], 0.0),
            Err(MetricsError::InvalidDistance {
                what: "reference",
                ..
            })
        ));
    }

    #[test]
    fn engine_folds_source_height() {
        let engine = AcousticLevelEngine::new(80.0, 1.0, 3.0, 0.0);
        let level = engine.perceived_level_from_ground(&[4.0]).unwrap();
        // hypot(4, 3) = 5
        assert!(approx_eq(level, 80.0 - 20.0 * 5f64.log10()));
    }

    #[test]
    fn engine_rejects_listener_under_grounded_source() {
        let engine = AcousticLevelEngine::new(80.0, 1.0, 0.0, 0.0);
        assert!(engine.perceived_level_from_ground(&[0.0]).is_err());
        assert!(engine.perceived_level_from_ground(&[-2.0]).is_err());
    }
}
