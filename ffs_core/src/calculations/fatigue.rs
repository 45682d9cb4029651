//! # Fatigue Criteria
//!
//! Five mean-stress fatigue envelopes evaluated at the operating point
//! (σm, σa). Each factor is dimensionless: ≤ 1.0 is safe by that criterion.
//!
//! | Criterion     | Factor                          | Envelope σa(σm)          |
//! |---------------|---------------------------------|--------------------------|
//! | Goodman       | σa/Se + σm/UTS                  | Se·(1 − σm/UTS)          |
//! | Soderberg     | σa/Se + σm/Sy                   | Se·(1 − σm/Sy)           |
//! | Gerber        | σa/Se + (σm/UTS)²               | Se·(1 − (σm/UTS)²)       |
//! | Morrow        | σa/Se + σm/σf                   | Se·(1 − σm/σf)           |
//! | ASME-Elliptic | √((σa/Se)² + (σm/Sy)²)          | Se·√(1 − (σm/Sy)²)       |
//!
//! All five are always evaluated so they can be presented side by side.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::stress::StressResult;

/// Upper end of the mean-stress axis of the fatigue diagram, as a fraction of UTS
pub const ENVELOPE_SPAN_UTS: f64 = 1.1;

/// Fatigue failure criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FatigueCriterion {
    Goodman,
    Soderberg,
    Gerber,
    Morrow,
    #[serde(rename = "ASME-Elliptic")]
    AsmeElliptic,
}

impl FatigueCriterion {
    pub const ALL: [FatigueCriterion; 5] = [
        FatigueCriterion::Goodman,
        FatigueCriterion::Soderberg,
        FatigueCriterion::Gerber,
        FatigueCriterion::Morrow,
        FatigueCriterion::AsmeElliptic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FatigueCriterion::Goodman => "Goodman",
            FatigueCriterion::Soderberg => "Soderberg",
            FatigueCriterion::Gerber => "Gerber",
            FatigueCriterion::Morrow => "Morrow",
            FatigueCriterion::AsmeElliptic => "ASME-Elliptic",
        }
    }

    /// Allowable alternating stress on this criterion's envelope at mean
    /// stress `mean_mpa`. Negative values (beyond the envelope's intercept)
    /// are reported as 0.
    pub fn allowable_alternating(&self, mean_mpa: f64, strengths: &FatigueStrengths) -> f64 {
        let se = strengths.endurance_limit_mpa;
        let value = match self {
            FatigueCriterion::Goodman => se * (1.0 - mean_mpa / strengths.uts_mpa),
            FatigueCriterion::Soderberg => se * (1.0 - mean_mpa / strengths.yield_stress_mpa),
            FatigueCriterion::Gerber => se * (1.0 - (mean_mpa / strengths.uts_mpa).powi(2)),
            FatigueCriterion::Morrow => se * (1.0 - mean_mpa / strengths.fatigue_strength_coeff_mpa),
            FatigueCriterion::AsmeElliptic => {
                let radicand = 1.0 - (mean_mpa / strengths.yield_stress_mpa).powi(2);
                if radicand > 0.0 {
                    se * radicand.sqrt()
                } else {
                    0.0
                }
            }
        };
        if value.is_finite() {
            value.max(0.0)
        } else {
            0.0
        }
    }
}

impl fmt::Display for FatigueCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four strengths the criteria divide by (MPa).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueStrengths {
    pub endurance_limit_mpa: f64,
    pub uts_mpa: f64,
    pub yield_stress_mpa: f64,
    pub fatigue_strength_coeff_mpa: f64,
}

impl FatigueStrengths {
    pub fn new(stress: &StressResult, uts_mpa: f64, yield_stress_mpa: f64) -> Self {
        FatigueStrengths {
            endurance_limit_mpa: stress.endurance_limit_mpa,
            uts_mpa,
            yield_stress_mpa,
            fatigue_strength_coeff_mpa: stress.fatigue_strength_coeff_mpa,
        }
    }

    /// Every denominator is positive and finite
    pub fn is_usable(&self) -> bool {
        [
            self.endurance_limit_mpa,
            self.uts_mpa,
            self.yield_stress_mpa,
            self.fatigue_strength_coeff_mpa,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// Damage factors for the five criteria.
///
/// ## JSON Example
///
/// ```json
/// {
///   "goodman": 0.263,
///   "soderberg": 0.362,
///   "gerber": 0.143,
///   "morrow": 0.206,
///   "asme_elliptic": 0.268
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FatigueResult {
    pub goodman: f64,
    pub soderberg: f64,
    pub gerber: f64,
    pub morrow: f64,
    pub asme_elliptic: f64,
}

impl FatigueResult {
    pub fn get(&self, criterion: FatigueCriterion) -> f64 {
        match criterion {
            FatigueCriterion::Goodman => self.goodman,
            FatigueCriterion::Soderberg => self.soderberg,
            FatigueCriterion::Gerber => self.gerber,
            FatigueCriterion::Morrow => self.morrow,
            FatigueCriterion::AsmeElliptic => self.asme_elliptic,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FatigueCriterion, f64)> + '_ {
        FatigueCriterion::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Check if every criterion passes (factor ≤ 1.0)
    pub fn passes(&self) -> bool {
        self.iter().all(|(_, factor)| factor <= 1.0)
    }

    /// The criterion with the highest factor
    pub fn governing(&self) -> (FatigueCriterion, f64) {
        self.iter()
            .fold((FatigueCriterion::Goodman, self.goodman), |best, current| {
                if current.1 > best.1 {
                    current
                } else {
                    best
                }
            })
    }
}

/// Evaluate all five fatigue criteria for the operating point in `stress`.
///
/// If Se, UTS, Sy or σf is non-positive every factor is 0.0.
///
/// # Example
///
/// ```rust
/// use ffs_core::calculations::{compute_fatigue, compute_stresses};
/// use ffs_core::PipeSegmentInput;
///
/// let input = PipeSegmentInput::default();
/// let stresses = compute_stresses(&input);
/// let fatigue = compute_fatigue(&stresses, input.uts_mpa, input.yield_stress_mpa);
/// assert!(fatigue.passes());
/// ```
pub fn compute_fatigue(stress: &StressResult, uts_mpa: f64, yield_stress_mpa: f64) -> FatigueResult {
    let strengths = FatigueStrengths::new(stress, uts_mpa, yield_stress_mpa);
    if !strengths.is_usable() {
        tracing::debug!(?strengths, "degenerate fatigue denominators, returning zero factors");
        return FatigueResult::default();
    }

    let amplitude = stress.alternating_mpa / strengths.endurance_limit_mpa;
    let mean = stress.mean_mpa;

    FatigueResult {
        goodman: amplitude + mean / strengths.uts_mpa,
        soderberg: amplitude + mean / strengths.yield_stress_mpa,
        gerber: amplitude + (mean / strengths.uts_mpa).powi(2),
        morrow: amplitude + mean / strengths.fatigue_strength_coeff_mpa,
        asme_elliptic: (amplitude.powi(2) + (mean / strengths.yield_stress_mpa).powi(2)).sqrt(),
    }
}

/// One sampled envelope of the fatigue diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeCurve {
    pub criterion: FatigueCriterion,
    /// (σm, σa) pairs in MPa
    pub points: Vec<(f64, f64)>,
}

/// Sample every envelope at `samples` evenly spaced mean stresses on
/// [0, 1.1·UTS]. Returns no curves when the strengths are degenerate.
pub fn envelope_curves(stress: &StressResult, uts_mpa: f64, yield_stress_mpa: f64, samples: usize) -> Vec<EnvelopeCurve> {
    let strengths = FatigueStrengths::new(stress, uts_mpa, yield_stress_mpa);
    if !strengths.is_usable() || samples < 2 {
        return Vec::new();
    }

    let span = ENVELOPE_SPAN_UTS * uts_mpa;
    let step = span / (samples - 1) as f64;

    FatigueCriterion::ALL
        .into_iter()
        .map(|criterion| EnvelopeCurve {
            criterion,
            points: (0..samples)
                .map(|i| {
                    let mean = step * i as f64;
                    (mean, criterion.allowable_alternating(mean, &strengths))
                })
                .collect(),
        })
        .collect()
}

/// A dataset's operating point on the fatigue diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    pub dataset: String,
    pub mean_stress_mpa: f64,
    pub alternating_stress_mpa: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::stress::compute_stresses;
    use crate::segment::PipeSegmentInput;

    fn reference() -> (StressResult, f64, f64) {
        let input = PipeSegmentInput::default();
        (compute_stresses(&input), input.uts_mpa, input.yield_stress_mpa)
    }

    #[test]
    fn test_reference_factors() {
        let (stress, uts, sy) = reference();
        let f = compute_fatigue(&stress, uts, sy);
        assert!((f.goodman - 0.26341).abs() < 1e-4);
        assert!((f.soderberg - 0.36200).abs() < 1e-4);
        assert!((f.gerber - 0.14341).abs() < 1e-4);
        assert!((f.morrow - 0.20614).abs() < 1e-4);
        assert!((f.asme_elliptic - 0.26838).abs() < 1e-4);
        assert!(f.passes());
        assert_eq!(f.governing().0, FatigueCriterion::Soderberg);
    }

    #[test]
    fn test_zero_endurance_limit_returns_zero() {
        let stress = StressResult {
            alternating_mpa: 30.0,
            mean_mpa: 70.0,
            ..StressResult::default()
        };
        assert_eq!(compute_fatigue(&stress, 0.0, 290.0), FatigueResult::default());
    }

    #[test]
    fn test_zero_yield_returns_zero() {
        let (stress, uts, _) = reference();
        assert_eq!(compute_fatigue(&stress, uts, 0.0), FatigueResult::default());
    }

    #[test]
    fn test_overload_fails() {
        let stress = StressResult {
            alternating_mpa: 200.0,
            mean_mpa: 250.0,
            endurance_limit_mpa: 247.5,
            fatigue_strength_coeff_mpa: 840.0,
            ..StressResult::default()
        };
        let f = compute_fatigue(&stress, 495.0, 290.0);
        assert!(!f.passes());
        assert!(f.soderberg > 1.0);
    }

    #[test]
    fn test_envelope_intercepts() {
        let (stress, uts, sy) = reference();
        let curves = envelope_curves(&stress, uts, sy, 100);
        assert_eq!(curves.len(), 5);
        for curve in &curves {
            assert_eq!(curve.points.len(), 100);
            // Every envelope starts at the endurance limit
            assert!((curve.points[0].1 - stress.endurance_limit_mpa).abs() < 1e-9);
            assert!((curve.points[99].0 - 1.1 * uts).abs() < 1e-9);
        }
        let strengths = FatigueStrengths::new(&stress, uts, sy);
        assert_eq!(FatigueCriterion::Goodman.allowable_alternating(uts, &strengths), 0.0);
        assert_eq!(FatigueCriterion::AsmeElliptic.allowable_alternating(sy * 1.01, &strengths), 0.0);
    }

    #[test]
    fn test_operating_point_on_goodman_line_scores_one() {
        let (stress, uts, sy) = reference();
        let strengths = FatigueStrengths::new(&stress, uts, sy);
        let mean = 200.0;
        let on_line = StressResult {
            mean_mpa: mean,
            alternating_mpa: FatigueCriterion::Goodman.allowable_alternating(mean, &strengths),
            ..stress
        };
        let f = compute_fatigue(&on_line, uts, sy);
        assert!((f.goodman - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_criterion_serialization() {
        let json = serde_json::to_string(&FatigueCriterion::AsmeElliptic).unwrap();
        assert_eq!(json, "\"ASME-Elliptic\"");
    }
}
