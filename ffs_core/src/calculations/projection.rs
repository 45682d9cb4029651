//! # Fitness-for-Service Projection
//!
//! Steps year by year from the inspection year, grows the defect at the
//! given radial and axial rates, re-evaluates the three corrosion burst
//! models and records the first year each model's ERF reaches 1.0.
//!
//! ## Depth clamp
//!
//! Projected depth is capped at 80% of the wall thickness ([`clamp_depth`]).
//! This is a conservative modelling cut-off, not a physical limit: once the
//! cap is reached every later year reuses the capped depth, so burst
//! pressures stop falling from depth growth and risk past that year is
//! understated. Rows record `depth_clamped` and the projection reports the
//! first clamped year so callers can show it.
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::calculations::{project_ffs, BurstModel};
//! use ffs_core::PipeSegmentInput;
//!
//! let input = PipeSegmentInput::default();
//! let projection = project_ffs(&input, input.defect_depth_mm, input.defect_length_mm);
//!
//! assert_eq!(projection.rows.len(), 21);
//! assert_eq!(projection.failure_year(BurstModel::Pcorrc), Some(2023));
//! assert_eq!(projection.failure_year(BurstModel::Asme), None);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::burst::{corrosion_pressures, erf, BurstModel};
use crate::segment::PipeSegmentInput;

/// Projected depth never exceeds this fraction of the wall thickness
pub const DEPTH_CLAMP_FRACTION: f64 = 0.8;

/// ERF at or above this value is a predicted failure
pub const FAILURE_ERF: f64 = 1.0;

/// Longest horizon the projection evaluates (years); longer requests are cut here
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// First failure year per corrosion model. A missing key means no failure
/// within the projection horizon.
pub type FailureYearMap = BTreeMap<BurstModel, i32>;

/// Depth-clamp policy: limit a projected depth to [0, 0.8·t].
///
/// A non-positive thickness yields 0.
pub fn clamp_depth(depth_mm: f64, thickness_mm: f64) -> f64 {
    if !(thickness_mm > 0.0) {
        return 0.0;
    }
    let limit = DEPTH_CLAMP_FRACTION * thickness_mm;
    if depth_mm.is_nan() {
        return limit;
    }
    depth_mm.clamp(0.0, limit)
}

/// One projected year.
///
/// ## JSON Example
///
/// ```json
/// {
///   "year": 2030,
///   "years_elapsed": 7,
///   "depth_mm": 4.6,
///   "length_mm": 23.7,
///   "depth_clamped": false,
///   "burst_asme_mpa": 38.01,
///   "burst_dnv_mpa": 50.90,
///   "burst_pcorrc_mpa": 4.62,
///   "erf_asme": 0.342,
///   "erf_dnv": 0.255,
///   "erf_pcorrc": 2.812,
///   "critical_erf": 2.812
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FfsProjectionRow {
    pub year: i32,
    pub years_elapsed: u32,

    /// Grown depth after the clamp (mm)
    pub depth_mm: f64,

    /// Grown length (mm), unclamped
    pub length_mm: f64,

    /// The depth clamp was active this year
    pub depth_clamped: bool,

    pub burst_asme_mpa: f64,
    pub burst_dnv_mpa: f64,
    pub burst_pcorrc_mpa: f64,

    pub erf_asme: f64,
    pub erf_dnv: f64,
    pub erf_pcorrc: f64,

    /// Highest of the three ERFs (most conservative model)
    pub critical_erf: f64,
}

impl FfsProjectionRow {
    /// Burst pressure of a corrosion model; reference models report 0.0
    pub fn burst_pressure(&self, model: BurstModel) -> f64 {
        match model {
            BurstModel::Asme => self.burst_asme_mpa,
            BurstModel::Dnv => self.burst_dnv_mpa,
            BurstModel::Pcorrc => self.burst_pcorrc_mpa,
            BurstModel::VonMises | BurstModel::Tresca => 0.0,
        }
    }

    /// ERF of a corrosion model; reference models report 0.0
    pub fn erf(&self, model: BurstModel) -> f64 {
        match model {
            BurstModel::Asme => self.erf_asme,
            BurstModel::Dnv => self.erf_dnv,
            BurstModel::Pcorrc => self.erf_pcorrc,
            BurstModel::VonMises | BurstModel::Tresca => 0.0,
        }
    }

    /// Model with the highest ERF this year
    pub fn governing_model(&self) -> BurstModel {
        BurstModel::CORROSION
            .into_iter()
            .fold(BurstModel::Asme, |best, m| if self.erf(m) > self.erf(best) { m } else { best })
    }

    /// Critical ERF below the failure threshold
    pub fn is_safe(&self) -> bool {
        self.critical_erf < FAILURE_ERF
    }
}

/// Full projection output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FfsProjection {
    /// One row per year, inspection year to inspection year + horizon inclusive
    pub rows: Vec<FfsProjectionRow>,

    /// First year each corrosion model's ERF reached 1.0
    pub failure_years: FailureYearMap,

    /// First year the depth clamp engaged, if it did
    pub depth_clamp_year: Option<i32>,
}

impl FfsProjection {
    /// First failure year of `model`, `None` if beyond the projection
    pub fn failure_year(&self, model: BurstModel) -> Option<i32> {
        self.failure_years.get(&model).copied()
    }

    /// Earliest failure across all models
    pub fn earliest_failure(&self) -> Option<(BurstModel, i32)> {
        self.failure_years
            .iter()
            .min_by_key(|(_, year)| **year)
            .map(|(model, year)| (*model, *year))
    }

    /// Critical ERF in the inspection year
    pub fn critical_erf_now(&self) -> f64 {
        self.rows.first().map(|r| r.critical_erf).unwrap_or(0.0)
    }

    /// Highest critical ERF over the horizon
    pub fn peak_critical_erf(&self) -> f64 {
        self.rows.iter().map(|r| r.critical_erf).fold(0.0, f64::max)
    }

    /// Split into the row sequence and the failure-year map
    pub fn into_parts(self) -> (Vec<FfsProjectionRow>, FailureYearMap) {
        (self.rows, self.failure_years)
    }
}

/// Project burst pressures and ERFs over the horizon.
///
/// `current_depth_mm` and `current_length_mm` are the defect size at the
/// inspection year; the input record supplies geometry, strengths, MAOP,
/// growth rates and the horizon. Never fails: undefined models contribute
/// an ERF of 0 and cannot trigger a failure year. The horizon is cut at
/// [`MAX_PROJECTION_YEARS`], and rows stop at the last representable year.
pub fn project_ffs(input: &PipeSegmentInput, current_depth_mm: f64, current_length_mm: f64) -> FfsProjection {
    let thickness = input.thickness_mm;
    let clamp_limit = DEPTH_CLAMP_FRACTION * thickness;

    let horizon = input.projection_years.min(MAX_PROJECTION_YEARS);
    if horizon < input.projection_years {
        tracing::debug!(requested = input.projection_years, horizon, "projection horizon capped");
    }

    let mut rows = Vec::with_capacity(horizon as usize + 1);
    let mut failure_years = FailureYearMap::new();
    let mut depth_clamp_year = None;

    for years_elapsed in 0..=horizon {
        let Some(year) = i32::try_from(years_elapsed)
            .ok()
            .and_then(|offset| input.inspection_year.checked_add(offset))
        else {
            tracing::debug!(inspection_year = input.inspection_year, years_elapsed, "calendar year overflow, projection stopped");
            break;
        };
        let elapsed = f64::from(years_elapsed);

        let grown_depth = current_depth_mm + input.radial_corrosion_rate_mm_per_yr * elapsed;
        let depth_mm = clamp_depth(grown_depth, thickness);
        let depth_clamped = thickness > 0.0 && !(grown_depth < clamp_limit);
        let length_mm = current_length_mm + input.axial_corrosion_rate_mm_per_yr * elapsed;

        if depth_clamped && depth_clamp_year.is_none() {
            tracing::debug!(year, grown_depth, clamp_limit, "projected depth capped at 80% of wall thickness");
            depth_clamp_year = Some(year);
        }

        let [burst_asme_mpa, burst_dnv_mpa, burst_pcorrc_mpa] = corrosion_pressures(input, depth_mm, length_mm);
        let erf_asme = erf(input.max_pressure_mpa, burst_asme_mpa);
        let erf_dnv = erf(input.max_pressure_mpa, burst_dnv_mpa);
        let erf_pcorrc = erf(input.max_pressure_mpa, burst_pcorrc_mpa);

        let row = FfsProjectionRow {
            year,
            years_elapsed,
            depth_mm,
            length_mm,
            depth_clamped,
            burst_asme_mpa,
            burst_dnv_mpa,
            burst_pcorrc_mpa,
            erf_asme,
            erf_dnv,
            erf_pcorrc,
            critical_erf: erf_asme.max(erf_dnv).max(erf_pcorrc),
        };

        for model in BurstModel::CORROSION {
            if row.erf(model) >= FAILURE_ERF && !failure_years.contains_key(&model) {
                tracing::debug!(%model, year, erf = row.erf(model), "first predicted failure");
                failure_years.insert(model, year);
            }
        }

        rows.push(row);
    }

    FfsProjection {
        rows,
        failure_years,
        depth_clamp_year,
    }
}
