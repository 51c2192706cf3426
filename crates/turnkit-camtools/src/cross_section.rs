//! Cross-section sampling and lookup
//!
//! The cross section of a turning is a table mapping stock rotation to the
//! radius at which the cutter just touches the part. It is sampled once per
//! job and then queried by angle, treating the table as circular.

use crate::cutter::CutterSilhouette;
use crate::error::{ParameterError, TurningError, TurningResult};
use crate::profile::ProfileBitmap;
use crate::simulator::{solve_depth, DepthSearch};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Cutter contact radius at one rotation angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionSample {
    /// Stock rotation in radians, in `[0, 2π)`
    pub theta: f64,
    /// Distance from the stock axis to the cutter tip, in physical units
    pub r: f64,
}

/// Circular angle → radius table, sorted by strictly increasing angle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionTable {
    samples: Vec<CrossSectionSample>,
}

impl CrossSectionTable {
    /// Build a table from samples in any order
    pub fn from_samples(mut samples: Vec<CrossSectionSample>) -> TurningResult<Self> {
        if samples.is_empty() {
            return Err(invalid_table("table has no samples"));
        }
        samples.sort_by(|a, b| a.theta.total_cmp(&b.theta));

        if samples
            .iter()
            .any(|s| !(s.theta.is_finite() && s.r.is_finite()) || s.theta < 0.0 || s.theta >= TAU)
        {
            return Err(invalid_table("sample angles must lie in [0, 2π) with finite radii"));
        }
        if samples.windows(2).any(|w| w[0].theta == w[1].theta) {
            return Err(invalid_table("duplicate sample angle"));
        }

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[CrossSectionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at the lowest angle
    pub fn first(&self) -> Option<&CrossSectionSample> {
        self.samples.first()
    }

    /// Linearly interpolated radius at `theta` radians.
    ///
    /// Any finite angle is accepted and wrapped into `[0, 2π)`. The last and
    /// first samples are neighbours across the seam. At a sampled angle the
    /// sample's radius is returned unchanged.
    pub fn depth_at(&self, theta: f64) -> TurningResult<f64> {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if theta.is_finite() => (*first, *last),
            _ => return Err(TurningError::Lookup { theta }),
        };

        let mut angle = theta.rem_euclid(TAU);
        if angle >= TAU {
            angle = 0.0;
        }

        let idx = self.samples.partition_point(|s| s.theta < angle);
        let (prev, next) = if idx == self.samples.len() {
            (
                last,
                CrossSectionSample {
                    theta: first.theta + TAU,
                    r: first.r,
                },
            )
        } else if idx == 0 {
            (
                CrossSectionSample {
                    theta: last.theta - TAU,
                    r: last.r,
                },
                first,
            )
        } else {
            (self.samples[idx - 1], self.samples[idx])
        };

        if next.theta == angle {
            return Ok(next.r);
        }
        let span = next.theta - prev.theta;
        if span <= 0.0 {
            return Err(TurningError::Lookup { theta });
        }
        Ok(prev.r + (angle - prev.theta) * (next.r - prev.r) / span)
    }
}

fn invalid_table(reason: &str) -> TurningError {
    ParameterError::InvalidValue {
        name: "cross_section".to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Sample the cross section over a full revolution.
///
/// Each angle rotates a fresh copy of the unrotated `profile` and searches for
/// the cutter contact depth; the angles are independent and run in parallel.
/// Radii are converted to physical units with `pixels_per_unit`.
pub fn sample_cross_section(
    profile: &ProfileBitmap,
    silhouette: &dyn CutterSilhouette,
    bit_diameter_px: f64,
    pixels_per_unit: f64,
    angular_step_deg: f64,
) -> TurningResult<CrossSectionTable> {
    if !(angular_step_deg > 0.0 && angular_step_deg.is_finite()) {
        return Err(ParameterError::InvalidValue {
            name: "angular_step_deg".to_string(),
            reason: format!("must be positive, got {}", angular_step_deg),
        }
        .into());
    }

    let count = (360.0 / angular_step_deg).ceil() as usize;
    let height = profile.height();
    debug!(
        "Sampling {} angles at {}° (bit {:.2}px, {:.2}px/unit)",
        count, angular_step_deg, bit_diameter_px, pixels_per_unit
    );

    let results: Vec<(CrossSectionSample, bool)> = (0..count)
        .into_par_iter()
        .map(|i| {
            let theta = (i as f64 * angular_step_deg).to_radians();
            let rotated = profile.rotated(theta);
            let search = solve_depth(&rotated, silhouette, bit_diameter_px);
            let sample = CrossSectionSample {
                theta,
                r: search.radius_px(height) / pixels_per_unit,
            };
            (sample, search == DepthSearch::NoContact)
        })
        .collect();

    let misses = results.iter().filter(|(_, miss)| *miss).count();
    if misses > 0 {
        warn!(
            "No material found at {} of {} angles; treating them as cut to the axis",
            misses, count
        );
    }

    CrossSectionTable::from_samples(results.into_iter().map(|(s, _)| s).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn table(points: &[(f64, f64)]) -> CrossSectionTable {
        CrossSectionTable::from_samples(
            points
                .iter()
                .map(|&(theta, r)| CrossSectionSample { theta, r })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_exact_at_samples() {
        let t = table(&[(0.0, 1.0), (PI / 2.0, 2.0), (PI, 3.0), (3.0 * PI / 2.0, 4.0)]);
        assert_eq!(t.depth_at(0.0).unwrap(), 1.0);
        assert_eq!(t.depth_at(PI).unwrap(), 3.0);
        assert_eq!(t.depth_at(3.0 * PI / 2.0).unwrap(), 4.0);
    }

    #[test]
    fn test_interpolates_between_samples() {
        let t = table(&[(0.0, 1.0), (PI / 2.0, 2.0), (PI, 3.0), (3.0 * PI / 2.0, 4.0)]);
        assert!((t.depth_at(PI / 4.0).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_wraps_past_last_sample() {
        let t = table(&[(0.0, 1.0), (PI / 2.0, 2.0), (PI, 3.0), (3.0 * PI / 2.0, 4.0)]);
        // Halfway between 3π/2 (4.0) and 2π (1.0)
        assert!((t.depth_at(7.0 * PI / 4.0).unwrap() - 2.5).abs() < 1e-12);
        assert!((t.depth_at(TAU - 1e-9).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalizes_angles() {
        let t = table(&[(0.0, 1.0), (PI / 2.0, 2.0), (PI, 3.0), (3.0 * PI / 2.0, 4.0)]);
        assert!((t.depth_at(TAU + PI / 4.0).unwrap() - 1.5).abs() < 1e-9);
        assert!((t.depth_at(-PI / 4.0).unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_before_first_sample_wraps_to_last() {
        let t = table(&[(0.5, 1.0), (PI, 3.0)]);
        // Predecessor of 0.25 is π shifted back a full turn
        let expected = 3.0 + (0.25 - (PI - TAU)) * (1.0 - 3.0) / (0.5 - (PI - TAU));
        assert!((t.depth_at(0.25).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_angle_is_lookup_error() {
        let t = table(&[(0.0, 1.0)]);
        assert!(matches!(
            t.depth_at(f64::NAN),
            Err(TurningError::Lookup { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(CrossSectionTable::from_samples(vec![]).is_err());
        assert!(CrossSectionTable::from_samples(vec![CrossSectionSample {
            theta: TAU,
            r: 1.0
        }])
        .is_err());
        assert!(CrossSectionTable::from_samples(vec![
            CrossSectionSample { theta: 1.0, r: 1.0 },
            CrossSectionSample { theta: 1.0, r: 2.0 },
        ])
        .is_err());
    }

    #[test]
    fn test_sorts_unordered_samples() {
        let t = table(&[(PI, 3.0), (0.0, 1.0)]);
        assert_eq!(t.samples()[0].theta, 0.0);
        assert_eq!(t.first().unwrap().r, 1.0);
    }
}
