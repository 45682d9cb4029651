//! # Operating Stress Analysis
//!
//! Thin-wall principal stresses at both ends of the operating pressure range,
//! reduced to von Mises equivalents and then to the alternating/mean pair
//! used by the fatigue criteria.
//!
//! ## Assumptions
//!
//! - Thin-wall closed-end cylinder: hoop = PD/2t, axial = PD/4t
//! - Radial stress neglected (σ3 = 0)
//! - Endurance limit Se = 0.5·UTS
//! - Morrow fatigue strength coefficient σf = UTS + 345 MPa (UTS + 50 ksi)

use serde::{Deserialize, Serialize};

use crate::segment::PipeSegmentInput;

/// Endurance limit as a fraction of UTS
pub const ENDURANCE_RATIO: f64 = 0.5;

/// Empirical offset of the Morrow fatigue strength coefficient (MPa)
pub const MORROW_OFFSET_MPA: f64 = 345.0;

/// Principal stresses (MPa) at one pressure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PrincipalStresses {
    pub hoop_mpa: f64,
    pub axial_mpa: f64,
    pub radial_mpa: f64,
}

impl PrincipalStresses {
    /// Thin-wall principal stresses for internal pressure `pressure_mpa`.
    ///
    /// Callers must ensure `thickness_mm > 0`.
    pub fn thin_wall(pressure_mpa: f64, diameter_mm: f64, thickness_mm: f64) -> Self {
        PrincipalStresses {
            hoop_mpa: pressure_mpa * diameter_mm / (2.0 * thickness_mm),
            axial_mpa: pressure_mpa * diameter_mm / (4.0 * thickness_mm),
            radial_mpa: 0.0,
        }
    }

    /// von Mises equivalent stress
    pub fn von_mises(&self) -> f64 {
        let (s1, s2, s3) = (self.hoop_mpa, self.axial_mpa, self.radial_mpa);
        ((s1 - s2).powi(2) + (s2 - s3).powi(2) + (s3 - s1).powi(2)).sqrt() / 2f64.sqrt()
    }
}

/// Stress state over the operating cycle.
///
/// ## JSON Example
///
/// ```json
/// {
///   "vm_max_mpa": 99.71,
///   "vm_min_mpa": 38.35,
///   "alternating_mpa": 30.68,
///   "mean_mpa": 69.03,
///   "endurance_limit_mpa": 247.5,
///   "fatigue_strength_coeff_mpa": 840.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StressResult {
    /// von Mises stress at MAOP
    pub vm_max_mpa: f64,

    /// von Mises stress at minimum operating pressure
    pub vm_min_mpa: f64,

    /// Alternating stress σa = (σmax − σmin)/2
    pub alternating_mpa: f64,

    /// Mean stress σm = (σmax + σmin)/2
    pub mean_mpa: f64,

    /// Endurance limit Se
    pub endurance_limit_mpa: f64,

    /// Morrow fatigue strength coefficient σf
    pub fatigue_strength_coeff_mpa: f64,
}

impl StressResult {
    /// Stress ratio R = σmin/σmax (0 when σmax is 0)
    pub fn stress_ratio(&self) -> f64 {
        if self.vm_max_mpa > 0.0 {
            self.vm_min_mpa / self.vm_max_mpa
        } else {
            0.0
        }
    }
}

/// Calculate operating stresses.
///
/// Returns an all-zero result instead of dividing by zero when the wall
/// thickness or diameter is non-positive.
///
/// # Example
///
/// ```rust
/// use ffs_core::calculations::stress::compute_stresses;
/// use ffs_core::PipeSegmentInput;
///
/// let stresses = compute_stresses(&PipeSegmentInput::default());
/// assert!((stresses.endurance_limit_mpa - 247.5).abs() < 1e-9);
/// assert!(stresses.mean_mpa > stresses.alternating_mpa);
/// ```
pub fn compute_stresses(input: &PipeSegmentInput) -> StressResult {
    let d = input.diameter_mm;
    let t = input.thickness_mm;
    if !(t > 0.0 && d > 0.0) {
        tracing::debug!(diameter_mm = d, thickness_mm = t, "degenerate geometry, returning zero stresses");
        return StressResult::default();
    }

    let vm_max_mpa = PrincipalStresses::thin_wall(input.max_pressure_mpa, d, t).von_mises();
    let vm_min_mpa = PrincipalStresses::thin_wall(input.min_pressure_mpa, d, t).von_mises();

    StressResult {
        vm_max_mpa,
        vm_min_mpa,
        alternating_mpa: (vm_max_mpa - vm_min_mpa) / 2.0,
        mean_mpa: (vm_max_mpa + vm_min_mpa) / 2.0,
        endurance_limit_mpa: ENDURANCE_RATIO * input.uts_mpa,
        fatigue_strength_coeff_mpa: input.uts_mpa + MORROW_OFFSET_MPA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_stresses() {
        let p = PrincipalStresses::thin_wall(10.0, 200.0, 10.0);
        assert!((p.hoop_mpa - 100.0).abs() < 1e-12);
        assert!((p.axial_mpa - 50.0).abs() < 1e-12);
        assert_eq!(p.radial_mpa, 0.0);
        // σ_vm = (√3/2)·σ_hoop for the closed-end cylinder
        assert!((p.von_mises() - 100.0 * 3f64.sqrt() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_segment() {
        let s = compute_stresses(&PipeSegmentInput::default());
        assert!((s.vm_max_mpa - 99.7103).abs() < 1e-3);
        assert!((s.vm_min_mpa - 38.3501).abs() < 1e-3);
        assert!((s.alternating_mpa - 30.6801).abs() < 1e-3);
        assert!((s.mean_mpa - 69.0302).abs() < 1e-3);
        assert!((s.fatigue_strength_coeff_mpa - 840.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_thickness_returns_zeroed() {
        let mut input = PipeSegmentInput::default();
        input.thickness_mm = 0.0;
        assert_eq!(compute_stresses(&input), StressResult::default());

        input.thickness_mm = -1.0;
        assert_eq!(compute_stresses(&input), StressResult::default());
    }

    #[test]
    fn test_constant_pressure_has_no_alternating_stress() {
        let mut input = PipeSegmentInput::default();
        input.min_pressure_mpa = input.max_pressure_mpa;
        let s = compute_stresses(&input);
        assert_eq!(s.alternating_mpa, 0.0);
        assert!((s.stress_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let input = PipeSegmentInput::default();
        let a = compute_stresses(&input);
        let b = compute_stresses(&input);
        assert_eq!(a.vm_max_mpa.to_bits(), b.vm_max_mpa.to_bits());
        assert_eq!(a, b);
    }
}
