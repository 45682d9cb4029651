//! # Fitness-for-Service Calculations
//!
//! Each calculation is a pure function over a [`PipeSegmentInput`](crate::PipeSegmentInput):
//!
//! - [`compute_pressures`] - burst pressure under five models
//! - [`compute_stresses`] - operating stress cycle
//! - [`compute_fatigue`] - five mean-stress fatigue criteria
//! - [`project_ffs`] - year-by-year corrosion growth and failure years
//! - [`analyze`] - all of the above for the as-found defect
//!
//! None of them return errors. Degenerate geometry (zero thickness or
//! diameter, depth at or beyond the wall) yields zeroed results so a caller
//! can show "no data" instead of failing.

pub mod assessment;
pub mod burst;
pub mod fatigue;
pub mod projection;
pub mod stress;

// Re-export commonly used types
pub use assessment::{analyze, AssessmentReport};
pub use burst::{compute_pressures, erf, BurstCheck, BurstModel, PressureResult};
pub use fatigue::{compute_fatigue, envelope_curves, EnvelopeCurve, FatigueCriterion, FatigueResult, OperatingPoint};
pub use projection::{clamp_depth, project_ffs, FailureYearMap, FfsProjection, FfsProjectionRow};
pub use stress::{compute_stresses, StressResult};
