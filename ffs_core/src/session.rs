//! # Assessment Session
//!
//! An in-memory set of named datasets, each an optional input record plus
//! the report last computed from it. This replaces the "current dataset"
//! bookkeeping a UI would otherwise keep: callers address datasets by id or
//! name explicitly. Nothing here is written to disk.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (version, engineer, timestamps)
//! └── datasets: Vec<Dataset> (ordered as added)
//!     ├── id: Uuid
//!     ├── name: String
//!     ├── input: Option<PipeSegmentInput>
//!     └── report: Option<AssessmentReport>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::session::Session;
//! use ffs_core::PipeSegmentInput;
//!
//! let mut session = Session::with_default_datasets("Jane Engineer");
//! let id = session.find_by_name("Dataset 1").unwrap().id;
//!
//! session.set_input(&id, PipeSegmentInput::default()).unwrap();
//! let report = session.run(&id).unwrap();
//! assert_eq!(report.projection.rows.len(), 21);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::assessment::{analyze, AssessmentReport};
use crate::calculations::fatigue::OperatingPoint;
use crate::errors::{CalcError, CalcResult};
use crate::segment::PipeSegmentInput;

/// Current schema version of serialized sessions
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Number of datasets a default session starts with
pub const DEFAULT_DATASET_COUNT: usize = 3;

/// One named parameter set and its latest results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: Uuid,
    pub name: String,
    pub input: Option<PipeSegmentInput>,
    /// Report computed from the current input; cleared whenever the input changes
    pub report: Option<AssessmentReport>,
}

impl Dataset {
    fn new(name: impl Into<String>) -> Self {
        Dataset {
            id: Uuid::new_v4(),
            name: name.into(),
            input: None,
            report: None,
        }
    }

    /// Operating point on the fatigue diagram, if the dataset has results
    pub fn operating_point(&self) -> Option<OperatingPoint> {
        self.report.as_ref().map(|report| OperatingPoint {
            dataset: self.name.clone(),
            mean_stress_mpa: report.stresses.mean_mpa,
            alternating_stress_mpa: report.stresses.alternating_mpa,
        })
    }
}

/// Session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for compatibility checks on exported JSON)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// When the session was created
    pub created: DateTime<Utc>,

    /// When the session was last modified
    pub modified: DateTime<Utc>,
}

/// Root container for a set of datasets under assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub meta: SessionMetadata,
    pub datasets: Vec<Dataset>,
}

impl Session {
    /// Create an empty session.
    pub fn new(engineer: impl Into<String>) -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                created: now,
                modified: now,
            },
            datasets: Vec::new(),
        }
    }

    /// Create a session with empty datasets "Dataset 1" to "Dataset 3".
    pub fn with_default_datasets(engineer: impl Into<String>) -> Self {
        let mut session = Session::new(engineer);
        for i in 1..=DEFAULT_DATASET_COUNT {
            session.datasets.push(Dataset::new(format!("Dataset {}", i)));
        }
        session
    }

    /// Add an empty dataset. Names must be unique.
    pub fn add_dataset(&mut self, name: impl Into<String>) -> CalcResult<Uuid> {
        let name = name.into();
        if self.find_by_name(&name).is_some() {
            return Err(CalcError::duplicate_dataset(name));
        }
        let dataset = Dataset::new(name);
        let id = dataset.id;
        self.datasets.push(dataset);
        self.touch();
        Ok(id)
    }

    /// Remove a dataset by id.
    pub fn remove_dataset(&mut self, id: &Uuid) -> Option<Dataset> {
        let index = self.datasets.iter().position(|d| d.id == *id)?;
        self.touch();
        Some(self.datasets.remove(index))
    }

    /// Get a dataset by id.
    pub fn get(&self, id: &Uuid) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.id == *id)
    }

    /// Get a dataset by name.
    pub fn find_by_name(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    fn get_mut(&mut self, id: &Uuid) -> CalcResult<&mut Dataset> {
        self.datasets
            .iter_mut()
            .find(|d| d.id == *id)
            .ok_or_else(|| CalcError::dataset_not_found(id.to_string()))
    }

    /// Store an input record for a dataset, discarding any stale report.
    pub fn set_input(&mut self, id: &Uuid, input: PipeSegmentInput) -> CalcResult<()> {
        let dataset = self.get_mut(id)?;
        dataset.input = Some(input);
        dataset.report = None;
        self.touch();
        Ok(())
    }

    /// Validate a dataset's input and analyse it.
    pub fn run(&mut self, id: &Uuid) -> CalcResult<&AssessmentReport> {
        let dataset = self.get_mut(id)?;
        let input = dataset.input.ok_or_else(|| CalcError::missing_input(dataset.name.clone()))?;
        input.validate()?;

        tracing::info!(dataset = %dataset.name, "running assessment");
        let report = &*dataset.report.insert(analyze(&input));
        Ok(report)
    }

    /// Analyse every dataset that has an input. Returns the first error
    /// together with the dataset it came from; datasets before it keep their
    /// new reports.
    pub fn run_all(&mut self) -> Result<usize, (String, CalcError)> {
        let ids: Vec<(Uuid, String)> = self
            .datasets
            .iter()
            .filter(|d| d.input.is_some())
            .map(|d| (d.id, d.name.clone()))
            .collect();
        for (id, name) in &ids {
            self.run(id).map_err(|e| (name.clone(), e))?;
        }
        self.touch();
        Ok(ids.len())
    }

    /// Clear every dataset's input and report, keeping the datasets.
    pub fn reset(&mut self) {
        for dataset in &mut self.datasets {
            dataset.input = None;
            dataset.report = None;
        }
        self.touch();
    }

    /// Operating points of all datasets with results, in dataset order.
    pub fn operating_points(&self) -> Vec<OperatingPoint> {
        self.datasets.iter().filter_map(Dataset::operating_point).collect()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_datasets() {
        let session = Session::with_default_datasets("Engineer");
        assert_eq!(session.dataset_count(), 3);
        assert!(session.find_by_name("Dataset 3").is_some());
        assert_eq!(session.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut session = Session::with_default_datasets("Engineer");
        let err = session.add_dataset("Dataset 1").unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_DATASET");
    }

    #[test]
    fn test_run_without_input() {
        let mut session = Session::new("Engineer");
        let id = session.add_dataset("Line 12").unwrap();
        let err = session.run(&id).unwrap_err();
        assert_eq!(err, CalcError::missing_input("Line 12"));
    }

    #[test]
    fn test_run_unknown_dataset() {
        let mut session = Session::new("Engineer");
        assert!(matches!(
            session.run(&Uuid::new_v4()),
            Err(CalcError::DatasetNotFound { .. })
        ));
    }

    #[test]
    fn test_run_validates_input() {
        let mut session = Session::new("Engineer");
        let id = session.add_dataset("Bad").unwrap();
        let input = PipeSegmentInput {
            defect_depth_mm: 12.0,
            ..PipeSegmentInput::default()
        };
        session.set_input(&id, input).unwrap();
        assert!(session.run(&id).is_err());
        assert!(session.get(&id).unwrap().report.is_none());
    }

    #[test]
    fn test_set_input_clears_report() {
        let mut session = Session::new("Engineer");
        let id = session.add_dataset("Line 12").unwrap();
        session.set_input(&id, PipeSegmentInput::default()).unwrap();
        session.run(&id).unwrap();
        assert!(session.get(&id).unwrap().report.is_some());

        session.set_input(&id, PipeSegmentInput::default()).unwrap();
        assert!(session.get(&id).unwrap().report.is_none());
    }

    #[test]
    fn test_run_all_and_operating_points() {
        let mut session = Session::with_default_datasets("Engineer");
        let first = session.datasets[0].id;
        let third = session.datasets[2].id;
        session.set_input(&first, PipeSegmentInput::default()).unwrap();
        session
            .set_input(
                &third,
                PipeSegmentInput {
                    max_pressure_mpa: 10.0,
                    ..PipeSegmentInput::default()
                },
            )
            .unwrap();

        assert_eq!(session.run_all().unwrap(), 2);

        let points = session.operating_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].dataset, "Dataset 1");
        assert_eq!(points[1].dataset, "Dataset 3");
        assert!(points[1].mean_stress_mpa < points[0].mean_stress_mpa);
    }

    #[test]
    fn test_run_all_reports_failing_dataset() {
        let mut session = Session::with_default_datasets("Engineer");
        let second = session.datasets[1].id;
        session
            .set_input(
                &second,
                PipeSegmentInput {
                    thickness_mm: -1.0,
                    ..PipeSegmentInput::default()
                },
            )
            .unwrap();
        let (name, err) = session.run_all().unwrap_err();
        assert_eq!(name, "Dataset 2");
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::with_default_datasets("Engineer");
        let id = session.datasets[0].id;
        session.set_input(&id, PipeSegmentInput::default()).unwrap();
        session.run(&id).unwrap();

        session.reset();
        assert_eq!(session.dataset_count(), 3);
        assert!(session.datasets.iter().all(|d| d.input.is_none() && d.report.is_none()));
        assert!(session.operating_points().is_empty());
    }

    #[test]
    fn test_remove_dataset() {
        let mut session = Session::with_default_datasets("Engineer");
        let id = session.datasets[1].id;
        let removed = session.remove_dataset(&id).unwrap();
        assert_eq!(removed.name, "Dataset 2");
        assert_eq!(session.dataset_count(), 2);
        assert!(session.remove_dataset(&id).is_none());
    }

    #[test]
    fn test_session_serialization() {
        let mut session = Session::with_default_datasets("Jane Engineer");
        let id = session.datasets[0].id;
        session.set_input(&id, PipeSegmentInput::default()).unwrap();
        let json = session.to_json().unwrap();
        assert!(json.contains("Jane Engineer"));
        let roundtrip: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.datasets[0].input, Some(PipeSegmentInput::default()));
    }
}
