//! # Pipe Segment Input
//!
//! The flat parameter record every calculation consumes: geometry, material,
//! operating envelope and corrosion growth for one straight pipe segment.
//!
//! The record itself performs no checks on construction. Callers that want
//! input validation run [`PipeSegmentInput::validate`] (hard errors) and
//! [`PipeSegmentInput::warnings`] (soft range warnings) before analysing; the
//! calculation functions accept anything numeric and degrade to sentinels.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "diameter_mm": 168.275,
//!   "thickness_mm": 9.5,
//!   "defect_length_mm": 23.0,
//!   "defect_depth_mm": 3.9,
//!   "yield_stress_mpa": 290.0,
//!   "uts_mpa": 495.0,
//!   "max_pressure_mpa": 13.0,
//!   "min_pressure_mpa": 5.0,
//!   "inspection_year": 2023,
//!   "radial_corrosion_rate_mm_per_yr": 0.1,
//!   "axial_corrosion_rate_mm_per_yr": 0.1,
//!   "projection_years": 20
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::projection::{DEPTH_CLAMP_FRACTION, MAX_PROJECTION_YEARS};
use crate::errors::{CalcError, CalcResult};

/// Upper bound of the operating pressure range offered by the input form (MPa)
pub const MAX_FORM_PRESSURE_MPA: f64 = 50.0;

/// Largest projection horizon offered by the input form (years)
pub const MAX_FORM_PROJECTION_YEARS: u32 = 50;

/// Deepest as-found defect offered by the input form (mm)
pub const MAX_FORM_DEFECT_DEPTH_MM: f64 = 10.0;

/// Below this D/t ratio the thin-wall stress relations lose accuracy
pub const THIN_WALL_MIN_D_OVER_T: f64 = 20.0;

/// Input parameters for one pipe segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeSegmentInput {
    /// Outer diameter D in millimeters
    pub diameter_mm: f64,

    /// Nominal wall thickness t in millimeters
    pub thickness_mm: f64,

    /// As-found axial length of the corrosion defect L in millimeters
    pub defect_length_mm: f64,

    /// As-found depth of the corrosion defect d in millimeters (0 ≤ d < t)
    pub defect_depth_mm: f64,

    /// Yield stress Sy in MPa
    pub yield_stress_mpa: f64,

    /// Ultimate tensile strength UTS in MPa
    pub uts_mpa: f64,

    /// Maximum allowable operating pressure (MAOP) in MPa
    pub max_pressure_mpa: f64,

    /// Minimum operating pressure in MPa
    pub min_pressure_mpa: f64,

    /// Calendar year of the inspection that measured the defect
    pub inspection_year: i32,

    /// Through-wall corrosion growth rate in mm/year
    pub radial_corrosion_rate_mm_per_yr: f64,

    /// Axial corrosion growth rate in mm/year
    pub axial_corrosion_rate_mm_per_yr: f64,

    /// Number of years to project past the inspection year
    pub projection_years: u32,
}

impl Default for PipeSegmentInput {
    /// 6" NPS line pipe with a 3.9 mm deep pit, as preloaded in the input form.
    fn default() -> Self {
        PipeSegmentInput {
            diameter_mm: 168.275,
            thickness_mm: 9.5,
            defect_length_mm: 23.0,
            defect_depth_mm: 3.9,
            yield_stress_mpa: 290.0,
            uts_mpa: 495.0,
            max_pressure_mpa: 13.0,
            min_pressure_mpa: 5.0,
            inspection_year: 2023,
            radial_corrosion_rate_mm_per_yr: 0.1,
            axial_corrosion_rate_mm_per_yr: 0.1,
            projection_years: 20,
        }
    }
}

/// A non-fatal observation about an input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputWarning {
    /// Field the warning is about
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl InputWarning {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        InputWarning {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl PipeSegmentInput {
    /// Validate input parameters.
    ///
    /// Rejects records the physics cannot describe. Material data with
    /// Sy > UTS is rejected here too, although the formulas would still
    /// evaluate.
    pub fn validate(&self) -> CalcResult<()> {
        let finite_fields = [
            ("diameter_mm", self.diameter_mm),
            ("thickness_mm", self.thickness_mm),
            ("defect_length_mm", self.defect_length_mm),
            ("defect_depth_mm", self.defect_depth_mm),
            ("yield_stress_mpa", self.yield_stress_mpa),
            ("uts_mpa", self.uts_mpa),
            ("max_pressure_mpa", self.max_pressure_mpa),
            ("min_pressure_mpa", self.min_pressure_mpa),
            ("radial_corrosion_rate_mm_per_yr", self.radial_corrosion_rate_mm_per_yr),
            ("axial_corrosion_rate_mm_per_yr", self.axial_corrosion_rate_mm_per_yr),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"));
            }
        }

        if self.diameter_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "diameter_mm",
                self.diameter_mm.to_string(),
                "Diameter must be positive",
            ));
        }
        if self.thickness_mm <= 0.0 {
            return Err(CalcError::invalid_input(
                "thickness_mm",
                self.thickness_mm.to_string(),
                "Wall thickness must be positive",
            ));
        }
        if self.thickness_mm >= self.diameter_mm / 2.0 {
            return Err(CalcError::invalid_input(
                "thickness_mm",
                self.thickness_mm.to_string(),
                "Wall thickness must be less than the outer radius",
            ));
        }
        if self.defect_length_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "defect_length_mm",
                self.defect_length_mm.to_string(),
                "Defect length cannot be negative",
            ));
        }
        if self.defect_depth_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "defect_depth_mm",
                self.defect_depth_mm.to_string(),
                "Defect depth cannot be negative",
            ));
        }
        if self.defect_depth_mm >= self.thickness_mm {
            return Err(CalcError::invalid_input(
                "defect_depth_mm",
                self.defect_depth_mm.to_string(),
                "Defect depth must be less than the wall thickness",
            ));
        }
        if self.yield_stress_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "yield_stress_mpa",
                self.yield_stress_mpa.to_string(),
                "Yield stress must be positive",
            ));
        }
        if self.uts_mpa <= 0.0 {
            return Err(CalcError::invalid_input(
                "uts_mpa",
                self.uts_mpa.to_string(),
                "Ultimate tensile strength must be positive",
            ));
        }
        if self.yield_stress_mpa > self.uts_mpa {
            return Err(CalcError::invalid_input(
                "yield_stress_mpa",
                self.yield_stress_mpa.to_string(),
                format!("Yield stress exceeds UTS ({} MPa)", self.uts_mpa),
            ));
        }
        if self.min_pressure_mpa < 0.0 {
            return Err(CalcError::invalid_input(
                "min_pressure_mpa",
                self.min_pressure_mpa.to_string(),
                "Operating pressure cannot be negative",
            ));
        }
        if self.min_pressure_mpa > self.max_pressure_mpa {
            return Err(CalcError::invalid_input(
                "min_pressure_mpa",
                self.min_pressure_mpa.to_string(),
                format!("Minimum pressure exceeds MAOP ({} MPa)", self.max_pressure_mpa),
            ));
        }
        if self.radial_corrosion_rate_mm_per_yr < 0.0 {
            return Err(CalcError::invalid_input(
                "radial_corrosion_rate_mm_per_yr",
                self.radial_corrosion_rate_mm_per_yr.to_string(),
                "Corrosion rate cannot be negative",
            ));
        }
        if self.axial_corrosion_rate_mm_per_yr < 0.0 {
            return Err(CalcError::invalid_input(
                "axial_corrosion_rate_mm_per_yr",
                self.axial_corrosion_rate_mm_per_yr.to_string(),
                "Corrosion rate cannot be negative",
            ));
        }
        if self.projection_years > MAX_PROJECTION_YEARS {
            return Err(CalcError::invalid_input(
                "projection_years",
                self.projection_years.to_string(),
                format!("Projection horizon cannot exceed {} years", MAX_PROJECTION_YEARS),
            ));
        }
        if self.inspection_year.checked_add(self.projection_years as i32).is_none() {
            return Err(CalcError::invalid_input(
                "inspection_year",
                self.inspection_year.to_string(),
                "Projection would run past the largest representable year",
            ));
        }
        Ok(())
    }

    /// Soft range warnings for values outside what the input form offers or
    /// where the simplified models are known to be weak.
    pub fn warnings(&self) -> Vec<InputWarning> {
        let mut warnings = Vec::new();

        if self.max_pressure_mpa > MAX_FORM_PRESSURE_MPA {
            warnings.push(InputWarning::new(
                "max_pressure_mpa",
                format!("MAOP above {} MPa is outside the screening range", MAX_FORM_PRESSURE_MPA),
            ));
        }
        if !(1900..=2100).contains(&self.inspection_year) {
            warnings.push(InputWarning::new(
                "inspection_year",
                "Inspection year outside 1900-2100",
            ));
        }
        if self.projection_years == 0 {
            warnings.push(InputWarning::new(
                "projection_years",
                "Projection horizon of 0 years only evaluates the inspection year",
            ));
        } else if self.projection_years > MAX_FORM_PROJECTION_YEARS {
            warnings.push(InputWarning::new(
                "projection_years",
                format!("Projection beyond {} years is speculative", MAX_FORM_PROJECTION_YEARS),
            ));
        }
        if self.defect_depth_mm > MAX_FORM_DEFECT_DEPTH_MM {
            warnings.push(InputWarning::new(
                "defect_depth_mm",
                format!("Defect depth above {} mm is outside the screening range", MAX_FORM_DEFECT_DEPTH_MM),
            ));
        }
        if self.thickness_mm > 0.0 && self.defect_depth_mm >= DEPTH_CLAMP_FRACTION * self.thickness_mm {
            warnings.push(InputWarning::new(
                "defect_depth_mm",
                "As-found depth is at or beyond 80% of wall thickness; projected depth is capped there and \
                 understates further growth",
            ));
        }
        if self.thickness_mm > 0.0 && self.diameter_mm / self.thickness_mm < THIN_WALL_MIN_D_OVER_T {
            warnings.push(InputWarning::new(
                "thickness_mm",
                format!(
                    "D/t = {:.1} is below {}; thin-wall stress relations are approximate",
                    self.diameter_mm / self.thickness_mm,
                    THIN_WALL_MIN_D_OVER_T
                ),
            ));
        }

        warnings
    }

    /// Ratio of defect depth to wall thickness d/t (0 for non-positive t)
    pub fn depth_ratio(&self) -> f64 {
        if self.thickness_mm > 0.0 {
            self.defect_depth_mm / self.thickness_mm
        } else {
            0.0
        }
    }

    /// Last calendar year covered by the projection
    pub fn final_year(&self) -> i32 {
        let horizon = self.projection_years.min(MAX_PROJECTION_YEARS) as i32;
        self.inspection_year.saturating_add(horizon)
    }
}
