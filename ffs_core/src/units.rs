//! # Unit Types
//!
//! Lightweight newtype wrappers for the units pipeline assessments are
//! reported in. Calculations run in SI (mm, MPa); the wrappers exist so a
//! report can be rendered in US customary units without ad-hoc factors.
//!
//! ## SI Units (Primary)
//!
//! - Length: millimeters (mm)
//! - Pressure / stress: megapascals (MPa)
//!
//! ## US Customary Units (Display)
//!
//! - Length: inches (in)
//! - Pressure / stress: pounds per square inch (psi), kips per square inch (ksi)
//!
//! ## Example
//!
//! ```rust
//! use ffs_core::units::{Inches, Millimeters, Mpa, Psi};
//!
//! let od: Inches = Millimeters(168.275).into();
//! assert!((od.0 - 6.625).abs() < 1e-9);
//!
//! let maop: Psi = Mpa(13.0).into();
//! assert!((maop.0 - 1885.49).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

/// Millimeters per inch (exact)
pub const MM_PER_INCH: f64 = 25.4;

/// Megapascals per psi
pub const MPA_PER_PSI: f64 = 0.006_894_757_293_168;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(mm.0 / MM_PER_INCH)
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

// ============================================================================
// Pressure / Stress Units
// ============================================================================

/// Pressure or stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mpa(pub f64);

/// Pressure or stress in pounds per square inch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Pressure or stress in kips per square inch (1 ksi = 1000 psi)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ksi(pub f64);

impl From<Mpa> for Psi {
    fn from(mpa: Mpa) -> Self {
        Psi(mpa.0 / MPA_PER_PSI)
    }
}

impl From<Psi> for Mpa {
    fn from(psi: Psi) -> Self {
        Mpa(psi.0 * MPA_PER_PSI)
    }
}

impl From<Psi> for Ksi {
    fn from(psi: Psi) -> Self {
        Ksi(psi.0 / 1000.0)
    }
}

impl From<Ksi> for Psi {
    fn from(ksi: Ksi) -> Self {
        Psi(ksi.0 * 1000.0)
    }
}

impl From<Ksi> for Mpa {
    fn from(ksi: Ksi) -> Self {
        Psi::from(ksi).into()
    }
}

impl From<Mpa> for Ksi {
    fn from(mpa: Mpa) -> Self {
        Psi::from(mpa).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversion() {
        let inches: Inches = Millimeters(254.0).into();
        assert!((inches.0 - 10.0).abs() < 1e-12);

        let mm: Millimeters = Inches(0.375).into();
        assert!((mm.0 - 9.525).abs() < 1e-12);
    }

    #[test]
    fn test_pressure_conversion() {
        let mpa: Mpa = Ksi(10.0).into();
        // Flow-stress adder of the modified B31G method, 10 ksi ~ 68.95 MPa
        assert!((mpa.0 - 68.95).abs() < 0.01);

        let ksi: Ksi = Mpa(345.0).into();
        assert!((ksi.0 - 50.04).abs() < 0.01);
    }

    #[test]
    fn test_serialization_is_transparent() {
        let json = serde_json::to_string(&Mpa(13.0)).unwrap();
        assert_eq!(json, "13.0");
    }
}
