//! # Segment Assessment
//!
//! Runs every calculation once for a segment's as-found defect and bundles
//! the results: current burst pressures with their ERFs, the stress cycle,
//! the fatigue factors and the projection.
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::calculations::analyze;
//! use ffs_core::PipeSegmentInput;
//!
//! let report = analyze(&PipeSegmentInput::default());
//! assert_eq!(report.burst_checks.len(), 5);
//! assert!(report.fatigue.passes());
//! assert!(!report.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::burst::{compute_pressures, BurstCheck, PressureResult};
use crate::calculations::fatigue::{compute_fatigue, FatigueResult};
use crate::calculations::projection::{project_ffs, FfsProjection, FAILURE_ERF};
use crate::calculations::stress::{compute_stresses, StressResult};
use crate::segment::{InputWarning, PipeSegmentInput};

/// Everything computed for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// The input the report was computed from
    pub input: PipeSegmentInput,

    /// Burst pressures at the as-found defect
    pub pressures: PressureResult,

    /// ERF per model at MAOP for the as-found defect
    pub burst_checks: Vec<BurstCheck>,

    pub stresses: StressResult,

    pub fatigue: FatigueResult,

    /// Projection starting from the as-found defect
    pub projection: FfsProjection,

    /// Soft range warnings for the input
    pub warnings: Vec<InputWarning>,
}

impl AssessmentReport {
    /// No corrosion model fails within the horizon and all fatigue criteria pass
    pub fn passes(&self) -> bool {
        self.projection.failure_years.is_empty() && self.fatigue.passes()
    }

    /// Highest current ERF among the corrosion models
    pub fn critical_erf_now(&self) -> f64 {
        self.projection.critical_erf_now()
    }

    /// Current-state checks at or above the failure threshold
    pub fn failing_checks(&self) -> impl Iterator<Item = &BurstCheck> {
        self.burst_checks.iter().filter(|c| c.erf >= FAILURE_ERF)
    }
}

/// Analyse a segment. Never fails; see the individual calculations for how
/// degenerate inputs are reported.
pub fn analyze(input: &PipeSegmentInput) -> AssessmentReport {
    let pressures = compute_pressures(input);
    let stresses = compute_stresses(input);
    let fatigue = compute_fatigue(&stresses, input.uts_mpa, input.yield_stress_mpa);
    let projection = project_ffs(input, input.defect_depth_mm, input.defect_length_mm);
    let warnings = input.warnings();

    for warning in &warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }

    AssessmentReport {
        input: *input,
        burst_checks: pressures.checks(input.max_pressure_mpa),
        pressures,
        stresses,
        fatigue,
        projection,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::burst::BurstModel;

    #[test]
    fn test_report_matches_individual_calculations() {
        let input = PipeSegmentInput::default();
        let report = analyze(&input);
        assert_eq!(report.pressures, compute_pressures(&input));
        assert_eq!(report.stresses, compute_stresses(&input));
        assert_eq!(report.projection.rows.len(), 21);
        assert!((report.critical_erf_now() - 2.6883).abs() < 1e-3);
    }

    #[test]
    fn test_failing_checks() {
        let report = analyze(&PipeSegmentInput::default());
        let failing: Vec<_> = report.failing_checks().map(|c| c.model).collect();
        assert_eq!(failing, vec![BurstModel::Pcorrc]);
    }

    #[test]
    fn test_erf_of_exactly_one_fails_everywhere() {
        let base = PipeSegmentInput::default();
        let input = PipeSegmentInput {
            max_pressure_mpa: compute_pressures(&base).asme_mpa,
            ..base
        };
        let report = analyze(&input);

        let asme = report.burst_checks.iter().find(|c| c.model == BurstModel::Asme).unwrap();
        assert_eq!(asme.erf, 1.0);
        assert!(!asme.safe);
        assert!(report.failing_checks().any(|c| c.model == BurstModel::Asme));
        assert_eq!(report.projection.failure_year(BurstModel::Asme), Some(2023));
        assert!(!report.projection.rows[0].is_safe());
    }

    #[test]
    fn test_year_overflow_does_not_panic() {
        let input = PipeSegmentInput {
            inspection_year: i32::MAX,
            projection_years: 1,
            ..PipeSegmentInput::default()
        };
        let report = analyze(&input);
        assert_eq!(report.projection.rows.len(), 1);
        assert_eq!(report.projection.rows[0].year, i32::MAX);
    }

    #[test]
    fn test_degenerate_input_does_not_panic() {
        let input = PipeSegmentInput {
            thickness_mm: 0.0,
            diameter_mm: 0.0,
            ..PipeSegmentInput::default()
        };
        let report = analyze(&input);
        assert_eq!(report.pressures, PressureResult::default());
        assert_eq!(report.fatigue, FatigueResult::default());
        assert!(report.burst_checks.iter().all(|c| c.erf == 0.0 && c.safe));
    }

    #[test]
    fn test_report_serialization() {
        let report = analyze(&PipeSegmentInput::default());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"failure_years\":{\"PCORRC\":2023}"));
        let roundtrip: AssessmentReport = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.projection.rows.len(), report.projection.rows.len());
    }
}
