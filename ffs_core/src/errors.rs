//! # Error Types
//!
//! Structured error types for ffs_core. The calculation entry points never
//! return these (they degrade to zeroed sentinels instead); errors only come
//! from input validation, dataset lookups and JSON handling.
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(thickness_mm: f64) -> CalcResult<()> {
//!     if thickness_mm <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "thickness_mm".to_string(),
//!             value: thickness_mm.to_string(),
//!             reason: "Wall thickness must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for ffs_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for validation and session operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, inconsistent)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A dataset has no input record yet
    #[error("Dataset '{dataset}' has no input parameters")]
    MissingInput { dataset: String },

    /// No dataset with the given id or name exists in the session
    #[error("Dataset not found: {dataset}")]
    DatasetNotFound { dataset: String },

    /// A dataset with the same name already exists in the session
    #[error("Dataset already exists: {dataset}")]
    DuplicateDataset { dataset: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingInput error
    pub fn missing_input(dataset: impl Into<String>) -> Self {
        CalcError::MissingInput {
            dataset: dataset.into(),
        }
    }

    /// Create a DatasetNotFound error
    pub fn dataset_not_found(dataset: impl Into<String>) -> Self {
        CalcError::DatasetNotFound {
            dataset: dataset.into(),
        }
    }

    /// Create a DuplicateDataset error
    pub fn duplicate_dataset(dataset: impl Into<String>) -> Self {
        CalcError::DuplicateDataset {
            dataset: dataset.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingInput { .. } => "MISSING_INPUT",
            CalcError::DatasetNotFound { .. } => "DATASET_NOT_FOUND",
            CalcError::DuplicateDataset { .. } => "DUPLICATE_DATASET",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
