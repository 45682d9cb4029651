//! # Burst Pressure Models
//!
//! Closed-form burst pressure predictions for a pipe with a single
//! longitudinal corrosion defect, plus two defect-free reference values.
//!
//! ## Corrosion models
//!
//! - **Modified ASME B31G** (0.85·d·L area, flow stress Sy + 10 ksi)
//! - **DNV-RP-F101** style (single-defect, UTS based)
//! - **PCORRC** style (UTS based, exponential length term)
//!
//! The three are independently calibrated. They are never averaged: the
//! governing result is whichever predicts the lowest burst pressure.
//!
//! ## Reference models (defect-free pipe)
//!
//! - **von Mises**: closed-end thin-wall cylinder, σ_hoop = PD/2t and
//!   σ_axial = PD/4t give σ_vm = (√3/2)·σ_hoop, so P = 4·t·UTS/(√3·D).
//! - **Tresca**: σ_hoop = UTS, so P = 2·t·UTS/D.
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::calculations::burst::{compute_pressures, BurstModel};
//! use ffs_core::PipeSegmentInput;
//!
//! let pressures = compute_pressures(&PipeSegmentInput::default());
//! assert!((pressures.get(BurstModel::Asme) - 38.666).abs() < 0.01);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::projection::FAILURE_ERF;
use crate::segment::PipeSegmentInput;

/// Flow stress adder of the modified B31G method: 10 ksi expressed in MPa
pub const FLOW_STRESS_ADDER_MPA: f64 = 68.95;

/// Area factor of the modified B31G method (0.85·d·L defect profile)
const B31G_AREA_FACTOR: f64 = 0.85;

/// Folias factor regime boundary: L² / (D·t) ≤ 50 is a "short" defect
const B31G_SHORT_DEFECT_LIMIT: f64 = 50.0;

/// Burst pressure model identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BurstModel {
    /// Defect-free von Mises reference
    VonMises,
    /// Defect-free Tresca reference
    Tresca,
    /// Modified ASME B31G
    #[serde(rename = "ASME")]
    Asme,
    /// DNV-RP-F101 style
    #[serde(rename = "DNV")]
    Dnv,
    /// PCORRC style
    #[serde(rename = "PCORRC")]
    Pcorrc,
}

impl BurstModel {
    /// All five models, in report order
    pub const ALL: [BurstModel; 5] = [
        BurstModel::VonMises,
        BurstModel::Tresca,
        BurstModel::Asme,
        BurstModel::Dnv,
        BurstModel::Pcorrc,
    ];

    /// The defect-sensitive models used by the projection
    pub const CORROSION: [BurstModel; 3] = [BurstModel::Asme, BurstModel::Dnv, BurstModel::Pcorrc];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            BurstModel::VonMises => "Von Mises",
            BurstModel::Tresca => "Tresca",
            BurstModel::Asme => "ASME B31G",
            BurstModel::Dnv => "DNV",
            BurstModel::Pcorrc => "PCORRC",
        }
    }

    /// Whether the model accounts for the corrosion defect
    pub fn is_corrosion_model(&self) -> bool {
        BurstModel::CORROSION.contains(self)
    }
}

impl fmt::Display for BurstModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Predicted burst pressures (MPa), one per model.
///
/// A value of 0.0 means the model is undefined for the given geometry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "von_mises_mpa": 64.54,
///   "tresca_mpa": 55.89,
///   "asme_mpa": 38.67,
///   "dnv_mpa": 51.60,
///   "pcorrc_mpa": 4.84
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PressureResult {
    pub von_mises_mpa: f64,
    pub tresca_mpa: f64,
    pub asme_mpa: f64,
    pub dnv_mpa: f64,
    pub pcorrc_mpa: f64,
}

impl PressureResult {
    /// Burst pressure predicted by `model`
    pub fn get(&self, model: BurstModel) -> f64 {
        match model {
            BurstModel::VonMises => self.von_mises_mpa,
            BurstModel::Tresca => self.tresca_mpa,
            BurstModel::Asme => self.asme_mpa,
            BurstModel::Dnv => self.dnv_mpa,
            BurstModel::Pcorrc => self.pcorrc_mpa,
        }
    }

    /// (model, burst pressure) pairs in report order
    pub fn iter(&self) -> impl Iterator<Item = (BurstModel, f64)> + '_ {
        BurstModel::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Lowest defined corrosion-model burst pressure, if any model is defined
    pub fn governing_corrosion(&self) -> Option<(BurstModel, f64)> {
        BurstModel::ALL
            .into_iter()
            .filter(BurstModel::is_corrosion_model)
            .map(|m| (m, self.get(m)))
            .filter(|(_, p)| *p > 0.0)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Current-state ERF check for every model at the given operating pressure
    pub fn checks(&self, operating_pressure_mpa: f64) -> Vec<BurstCheck> {
        self.iter()
            .map(|(model, burst)| BurstCheck::new(model, burst, operating_pressure_mpa))
            .collect()
    }
}

/// ERF of one model at the as-found geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstCheck {
    pub model: BurstModel,
    /// Predicted burst pressure (MPa), 0.0 when undefined
    pub burst_pressure_mpa: f64,
    /// Operating pressure / burst pressure, 0.0 when undefined
    pub erf: f64,
    /// ERF below the failure threshold of 1.0
    pub safe: bool,
}

impl BurstCheck {
    fn new(model: BurstModel, burst_pressure_mpa: f64, operating_pressure_mpa: f64) -> Self {
        let erf = erf(operating_pressure_mpa, burst_pressure_mpa);
        BurstCheck {
            model,
            burst_pressure_mpa,
            erf,
            safe: erf < FAILURE_ERF,
        }
    }
}

/// Estimated Repair Factor: operating pressure / burst pressure.
///
/// A non-positive or non-finite burst pressure yields 0.0 ("no prediction")
/// so that maxima and threshold checks over several models stay defined.
pub fn erf(operating_pressure_mpa: f64, burst_pressure_mpa: f64) -> f64 {
    if burst_pressure_mpa <= 0.0 || !burst_pressure_mpa.is_finite() {
        return 0.0;
    }
    let value = operating_pressure_mpa / burst_pressure_mpa;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Reject non-physical model outputs.
fn physical(pressure_mpa: f64) -> Option<f64> {
    (pressure_mpa.is_finite() && pressure_mpa >= 0.0).then_some(pressure_mpa)
}

fn valid_geometry(diameter_mm: f64, thickness_mm: f64) -> bool {
    diameter_mm > 0.0 && thickness_mm > 0.0 && diameter_mm.is_finite() && thickness_mm.is_finite()
}

/// Folias bulging factor M of the modified B31G method.
///
/// Two regimes: for L ≤ √(50·D·t) the three-term expression, beyond it the
/// asymptotic linear form. Returns `None` when the geometry is invalid.
pub fn folias_factor(diameter_mm: f64, thickness_mm: f64, length_mm: f64) -> Option<f64> {
    if !valid_geometry(diameter_mm, thickness_mm) {
        return None;
    }
    let dt = diameter_mm * thickness_mm;
    let z = length_mm.powi(2) / dt;
    let m = if length_mm <= (B31G_SHORT_DEFECT_LIMIT * dt).sqrt() {
        let radicand = 1.0 + 0.6275 * z - 0.003375 * z.powi(2);
        if radicand <= 0.0 {
            return None;
        }
        radicand.sqrt()
    } else {
        3.3 + 0.032 * z
    };
    physical(m).filter(|m| *m > 0.0)
}

/// Modified ASME B31G burst pressure (MPa).
///
/// `None` when D or t is non-positive, d ≥ t, or M ≤ 0.85·d/t (the bulging
/// term's denominator is no longer positive).
pub fn asme_modified_b31g(
    diameter_mm: f64,
    thickness_mm: f64,
    depth_mm: f64,
    length_mm: f64,
    yield_stress_mpa: f64,
) -> Option<f64> {
    let m = folias_factor(diameter_mm, thickness_mm, length_mm)?;
    if depth_mm >= thickness_mm {
        return None;
    }
    let flow_stress = yield_stress_mpa + FLOW_STRESS_ADDER_MPA;
    let ratio = depth_mm / thickness_mm;
    let denominator = 1.0 - B31G_AREA_FACTOR * ratio / m;
    if denominator <= 0.0 {
        return None;
    }
    let numerator = 1.0 - B31G_AREA_FACTOR * ratio;
    physical((2.0 * thickness_mm * flow_stress / diameter_mm) * (numerator / denominator))
}

/// DNV-RP-F101 style burst pressure (MPa).
///
/// `None` when D ≤ t, t ≤ 0, or d/t ≥ Q.
pub fn dnv_rp_f101(
    diameter_mm: f64,
    thickness_mm: f64,
    depth_mm: f64,
    length_mm: f64,
    uts_mpa: f64,
) -> Option<f64> {
    if !valid_geometry(diameter_mm, thickness_mm) || diameter_mm <= thickness_mm || depth_mm >= thickness_mm {
        return None;
    }
    let q = (1.0 + 0.31 * length_mm.powi(2) / (diameter_mm * thickness_mm)).sqrt();
    let ratio = depth_mm / thickness_mm;
    let denominator = 1.0 - ratio / q;
    if denominator <= 0.0 {
        return None;
    }
    physical(0.9 * uts_mpa * (2.0 * thickness_mm / (diameter_mm - thickness_mm)) * ((1.0 - ratio) / denominator))
}

/// PCORRC style burst pressure (MPa).
///
/// `None` when D or t is non-positive or d ≥ t (the remaining ligament
/// under the square root vanishes). A zero-length defect gives 0.0.
pub fn pcorrc(diameter_mm: f64, thickness_mm: f64, depth_mm: f64, length_mm: f64, uts_mpa: f64) -> Option<f64> {
    if !valid_geometry(diameter_mm, thickness_mm) || depth_mm >= thickness_mm {
        return None;
    }
    let ligament = (diameter_mm * (thickness_mm - depth_mm)).sqrt();
    let length_term = 1.0 - (-0.224 * length_mm / ligament).exp();
    physical(0.95 * uts_mpa * (2.0 * thickness_mm / diameter_mm) * (1.0 - depth_mm / thickness_mm) * length_term)
}

/// Defect-free von Mises burst pressure (MPa).
pub fn von_mises_burst(diameter_mm: f64, thickness_mm: f64, uts_mpa: f64) -> Option<f64> {
    if !valid_geometry(diameter_mm, thickness_mm) {
        return None;
    }
    physical(4.0 * thickness_mm * uts_mpa / (3f64.sqrt() * diameter_mm))
}

/// Defect-free Tresca burst pressure (MPa).
pub fn tresca_burst(diameter_mm: f64, thickness_mm: f64, uts_mpa: f64) -> Option<f64> {
    if !valid_geometry(diameter_mm, thickness_mm) {
        return None;
    }
    physical(2.0 * thickness_mm * uts_mpa / diameter_mm)
}

/// Burst pressures of the three corrosion models at an arbitrary defect size.
///
/// Undefined models come back as 0.0. Used by the projection at each year.
pub(crate) fn corrosion_pressures(input: &PipeSegmentInput, depth_mm: f64, length_mm: f64) -> [f64; 3] {
    let d = input.diameter_mm;
    let t = input.thickness_mm;
    let values = [
        asme_modified_b31g(d, t, depth_mm, length_mm, input.yield_stress_mpa),
        dnv_rp_f101(d, t, depth_mm, length_mm, input.uts_mpa),
        pcorrc(d, t, depth_mm, length_mm, input.uts_mpa),
    ];
    let mut out = [0.0; 3];
    for (slot, (model, value)) in out.iter_mut().zip(BurstModel::CORROSION.into_iter().zip(values)) {
        *slot = value.unwrap_or_else(|| {
            tracing::debug!(%model, depth_mm, length_mm, "burst model undefined for geometry");
            0.0
        });
    }
    out
}

/// Calculate burst pressures for the as-found defect.
///
/// Never fails: a non-positive thickness or diameter returns an all-zero
/// result, and any individually undefined model reports 0.0.
pub fn compute_pressures(input: &PipeSegmentInput) -> PressureResult {
    if !valid_geometry(input.diameter_mm, input.thickness_mm) {
        tracing::debug!(
            diameter_mm = input.diameter_mm,
            thickness_mm = input.thickness_mm,
            "degenerate geometry, returning zero burst pressures"
        );
        return PressureResult::default();
    }

    let [asme_mpa, dnv_mpa, pcorrc_mpa] =
        corrosion_pressures(input, input.defect_depth_mm, input.defect_length_mm);

    PressureResult {
        von_mises_mpa: von_mises_burst(input.diameter_mm, input.thickness_mm, input.uts_mpa).unwrap_or(0.0),
        tresca_mpa: tresca_burst(input.diameter_mm, input.thickness_mm, input.uts_mpa).unwrap_or(0.0),
        asme_mpa,
        dnv_mpa,
        pcorrc_mpa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: f64 = 168.275;
    const T: f64 = 9.5;

    #[test]
    fn test_folias_short_defect_regime() {
        // L = 23 mm is well below √(50·D·t) ≈ 282.7 mm
        let m = folias_factor(D, T, 23.0).unwrap();
        assert!((m - 1.09876).abs() < 1e-4);
    }

    #[test]
    fn test_folias_long_defect_regime() {
        let length = 300.0;
        let m = folias_factor(D, T, length).unwrap();
        let expected = 3.3 + 0.032 * length * length / (D * T);
        assert!((m - expected).abs() < 1e-12);
    }

    #[test]
    fn test_asme_reference_segment() {
        let p = asme_modified_b31g(D, T, 3.9, 23.0, 290.0).unwrap();
        assert!((p - 38.666).abs() < 0.001);
    }

    #[test]
    fn test_dnv_reference_segment() {
        let p = dnv_rp_f101(D, T, 3.9, 23.0, 495.0).unwrap();
        assert!((p - 51.599).abs() < 0.001);
    }

    #[test]
    fn test_pcorrc_reference_segment() {
        let p = pcorrc(D, T, 3.9, 23.0, 495.0).unwrap();
        assert!((p - 4.8358).abs() < 0.001);
    }

    #[test]
    fn test_pcorrc_zero_length_is_zero() {
        assert_eq!(pcorrc(D, T, 3.9, 0.0, 495.0), Some(0.0));
    }

    #[test]
    fn test_reference_models() {
        let vm = von_mises_burst(D, T, 495.0).unwrap();
        let tresca = tresca_burst(D, T, 495.0).unwrap();
        assert!((vm - 64.537).abs() < 0.001);
        assert!((tresca - 55.891).abs() < 0.001);
        // von Mises exceeds Tresca by 2/√3 for the closed-end cylinder
        assert!((vm / tresca - 2.0 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_depth_at_thickness_undefined() {
        assert!(asme_modified_b31g(D, T, T, 23.0, 290.0).is_none());
        assert!(dnv_rp_f101(D, T, T, 23.0, 495.0).is_none());
        assert!(pcorrc(D, T, T, 23.0, 495.0).is_none());
    }

    #[test]
    fn test_dnv_diameter_equal_thickness_undefined() {
        assert!(dnv_rp_f101(10.0, 10.0, 1.0, 23.0, 495.0).is_none());
    }

    #[test]
    fn test_deeper_defect_lowers_burst_pressure() {
        let depths = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 7.6];
        for pair in depths.windows(2) {
            let (shallow, deep) = (pair[0], pair[1]);
            assert!(asme_modified_b31g(D, T, deep, 23.0, 290.0) < asme_modified_b31g(D, T, shallow, 23.0, 290.0));
            assert!(dnv_rp_f101(D, T, deep, 23.0, 495.0) < dnv_rp_f101(D, T, shallow, 23.0, 495.0));
            assert!(pcorrc(D, T, deep, 23.0, 495.0) < pcorrc(D, T, shallow, 23.0, 495.0));
        }
    }

    #[test]
    fn test_erf_values() {
        assert!((erf(13.0, 20.0) - 0.65).abs() < 1e-12);
        assert!((erf(13.0, 10.0) - 1.3).abs() < 1e-12);
        assert_eq!(erf(13.0, 0.0), 0.0);
        assert_eq!(erf(13.0, -4.0), 0.0);
        assert_eq!(erf(13.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_compute_pressures_degenerate() {
        let mut input = PipeSegmentInput::default();
        input.thickness_mm = 0.0;
        assert_eq!(compute_pressures(&input), PressureResult::default());

        let mut input = PipeSegmentInput::default();
        input.diameter_mm = 0.0;
        assert_eq!(compute_pressures(&input), PressureResult::default());
    }

    #[test]
    fn test_corrosion_model_membership() {
        let corrosion: Vec<_> = BurstModel::ALL.into_iter().filter(BurstModel::is_corrosion_model).collect();
        assert_eq!(corrosion, BurstModel::CORROSION.to_vec());
        assert!(!BurstModel::VonMises.is_corrosion_model());
    }

    #[test]
    fn test_governing_corrosion_model() {
        let pressures = compute_pressures(&PipeSegmentInput::default());
        let (model, p) = pressures.governing_corrosion().unwrap();
        assert_eq!(model, BurstModel::Pcorrc);
        assert!((p - pressures.pcorrc_mpa).abs() < 1e-12);
    }

    #[test]
    fn test_checks_cover_all_models() {
        let pressures = compute_pressures(&PipeSegmentInput::default());
        let checks = pressures.checks(13.0);
        assert_eq!(checks.len(), 5);
        let asme = checks.iter().find(|c| c.model == BurstModel::Asme).unwrap();
        assert!(asme.safe);
        let pcorrc = checks.iter().find(|c| c.model == BurstModel::Pcorrc).unwrap();
        assert!(!pcorrc.safe);
    }

    #[test]
    fn test_model_serialization_names() {
        assert_eq!(serde_json::to_string(&BurstModel::Asme).unwrap(), "\"ASME\"");
        assert_eq!(serde_json::to_string(&BurstModel::Pcorrc).unwrap(), "\"PCORRC\"");
        assert_eq!(serde_json::to_string(&BurstModel::VonMises).unwrap(), "\"VonMises\"");
    }
}
