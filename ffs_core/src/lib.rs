//! # ffs_core - Corrosion Fitness-for-Service Engine
//!
//! `ffs_core` computes screening-level fitness-for-service metrics for a
//! straight pipeline segment with a corrosion defect: burst pressure under
//! several industry models, operating fatigue factors, and a year-by-year
//! projection of when each model predicts failure under assumed corrosion
//! growth.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take an input record and return results
//! - **Non-throwing**: Degenerate geometry yields zeroed results, never NaN or a panic
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Validation is opt-in**: [`PipeSegmentInput::validate`] for callers that want it
//!
//! ## Quick Start
//!
//! ```rust
//! use ffs_core::calculations::{compute_fatigue, compute_pressures, compute_stresses, project_ffs};
//! use ffs_core::PipeSegmentInput;
//!
//! let input = PipeSegmentInput::default();
//!
//! let pressures = compute_pressures(&input);
//! let stresses = compute_stresses(&input);
//! let fatigue = compute_fatigue(&stresses, input.uts_mpa, input.yield_stress_mpa);
//! let projection = project_ffs(&input, input.defect_depth_mm, input.defect_length_mm);
//!
//! assert!(pressures.asme_mpa > input.max_pressure_mpa);
//! assert!(fatigue.passes());
//! assert_eq!(projection.rows.len(), input.projection_years as usize + 1);
//! ```
//!
//! ## Modules
//!
//! - [`segment`] - Input record, validation and range warnings
//! - [`calculations`] - Burst, stress, fatigue, projection and the combined assessment
//! - [`session`] - In-memory set of named datasets
//! - [`units`] - Unit wrappers for SI and US customary display
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod segment;
pub mod session;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, AssessmentReport, BurstModel, FatigueCriterion};
pub use errors::{CalcError, CalcResult};
pub use segment::{InputWarning, PipeSegmentInput};
pub use session::{Dataset, Session};
