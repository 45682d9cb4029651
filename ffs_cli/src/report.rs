//! Plain-text rendering of assessment reports.

use std::fmt::Write;

use ffs_core::calculations::{EnvelopeCurve, OperatingPoint};
use ffs_core::units::{Inches, Millimeters, Mpa, Psi};
use ffs_core::{AssessmentReport, BurstModel};

use crate::config::{Config, UnitSystem};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

fn pressure(config: &Config, mpa: f64) -> String {
    match config.units {
        UnitSystem::Si => format!("{:.2} MPa", mpa),
        UnitSystem::Imperial => format!("{:.0} psi", Psi::from(Mpa(mpa)).0),
    }
}

fn length(config: &Config, mm: f64) -> String {
    match config.units {
        UnitSystem::Si => format!("{:.2} mm", mm),
        UnitSystem::Imperial => format!("{:.3} in", Inches::from(Millimeters(mm)).0),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

/// Render one dataset's report.
pub fn render(name: &str, report: &AssessmentReport, config: &Config) -> String {
    let p = config.precision;
    let input = &report.input;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  FFS ASSESSMENT: {}", name);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);
    let _ = writeln!(out, "Segment:");
    let _ = writeln!(
        out,
        "  D = {}, t = {}, defect {} deep x {} long (d/t = {:.2})",
        length(config, input.diameter_mm),
        length(config, input.thickness_mm),
        length(config, input.defect_depth_mm),
        length(config, input.defect_length_mm),
        input.depth_ratio()
    );
    let _ = writeln!(
        out,
        "  Sy = {}, UTS = {}, MAOP = {}, Pmin = {}",
        pressure(config, input.yield_stress_mpa),
        pressure(config, input.uts_mpa),
        pressure(config, input.max_pressure_mpa),
        pressure(config, input.min_pressure_mpa)
    );

    if !report.warnings.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warnings:");
        for warning in &report.warnings {
            let _ = writeln!(out, "  ! {}: {}", warning.field, warning.message);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Burst Pressure (as found):");
    for check in &report.burst_checks {
        let burst = if check.burst_pressure_mpa > 0.0 {
            pressure(config, check.burst_pressure_mpa)
        } else {
            "undefined".to_string()
        };
        let _ = writeln!(
            out,
            "  {:<10} {:>14}   ERF {:.p$} {}",
            check.model.name(),
            burst,
            check.erf,
            status_icon(check.safe),
        );
    }

    let s = &report.stresses;
    let _ = writeln!(out);
    let _ = writeln!(out, "Operating Stresses:");
    let _ = writeln!(out, "  Max VM stress:      {}", pressure(config, s.vm_max_mpa));
    let _ = writeln!(out, "  Min VM stress:      {}", pressure(config, s.vm_min_mpa));
    let _ = writeln!(out, "  Alternating stress: {}", pressure(config, s.alternating_mpa));
    let _ = writeln!(out, "  Mean stress:        {}", pressure(config, s.mean_mpa));
    let _ = writeln!(out, "  Endurance limit:    {}", pressure(config, s.endurance_limit_mpa));
    let _ = writeln!(out, "  Stress ratio R:     {:.2}", s.stress_ratio());

    let _ = writeln!(out);
    let _ = writeln!(out, "Fatigue Criteria:");
    for (criterion, factor) in report.fatigue.iter() {
        let _ = writeln!(out, "  {:<14} {:.p$} {}", criterion.name(), factor, status_icon(factor <= 1.0));
    }

    let projection = &report.projection;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Projection {}-{}:",
        input.inspection_year,
        input.final_year()
    );
    let _ = writeln!(out, "  Critical ERF now:  {:.p$}", projection.critical_erf_now());
    let _ = writeln!(out, "  Peak critical ERF: {:.p$}", projection.peak_critical_erf());
    for model in BurstModel::CORROSION {
        let year = projection
            .failure_year(model)
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Beyond projection".to_string());
        let _ = writeln!(out, "  {:<10} failure year: {}", model.name(), year);
    }
    if let Some(year) = projection.depth_clamp_year {
        let _ = writeln!(
            out,
            "  ! Depth capped at 80% of wall from {}; later years understate risk",
            year
        );
    }

    if config.show_projection_table {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {:>4}  {:>12}  {:>12}  {:>8}  {:>8}  {:>8}  {:>8}",
            "Year", "Depth", "Length", "ERF ASME", "ERF DNV", "ERF PC", "Critical"
        );
        for row in &projection.rows {
            let _ = writeln!(
                out,
                "  {:>4}  {:>12}  {:>12}  {:>8.p$}  {:>8.p$}  {:>8.p$}  {:>8.p$}{}",
                row.year,
                length(config, row.depth_mm),
                length(config, row.length_mm),
                row.erf_asme,
                row.erf_dnv,
                row.erf_pcorrc,
                row.critical_erf,
                if row.is_safe() { "" } else { " *" },
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    let verdict = match projection.earliest_failure() {
        Some((model, year)) => format!("FAIL (first predicted failure {} by {})", year, model.name()),
        None if report.fatigue.passes() => "PASS".to_string(),
        None => format!("FAIL (fatigue: {})", report.fatigue.governing().0),
    };
    let _ = writeln!(out, "  RESULT: {}", verdict);
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Fatigue diagram data as CSV: one block of envelope samples, one of
/// dataset operating points. Stresses in MPa.
pub fn render_envelopes(curves: &[EnvelopeCurve], points: &[OperatingPoint]) -> String {
    let mut out = String::from("series,mean_stress_mpa,alternating_stress_mpa\n");
    for curve in curves {
        for (mean, alternating) in &curve.points {
            let _ = writeln!(out, "{},{:.4},{:.4}", curve.criterion.name(), mean, alternating);
        }
    }
    for point in points {
        let _ = writeln!(
            out,
            "\"{}\",{:.4},{:.4}",
            point.dataset.replace('"', "\"\""),
            point.mean_stress_mpa,
            point.alternating_stress_mpa
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffs_core::calculations::{compute_stresses, envelope_curves};
    use ffs_core::{analyze, PipeSegmentInput};

    #[test]
    fn test_render_si() {
        let report = analyze(&PipeSegmentInput::default());
        let text = render("Dataset 1", &report, &Config::default());
        assert!(text.contains("FFS ASSESSMENT: Dataset 1"));
        assert!(text.contains("38.67 MPa"));
        assert!(text.contains("Beyond projection"));
        assert!(text.contains("RESULT: FAIL (first predicted failure 2023 by PCORRC)"));
    }

    #[test]
    fn test_render_imperial_without_table() {
        let config = Config {
            units: UnitSystem::Imperial,
            precision: 2,
            show_projection_table: false,
        };
        let report = analyze(&PipeSegmentInput::default());
        let text = render("Line", &report, &config);
        assert!(text.contains("6.625 in"));
        assert!(text.contains("psi"));
        assert!(!text.contains("Critical\n"));
    }

    #[test]
    fn test_envelope_csv() {
        let input = PipeSegmentInput::default();
        let stresses = compute_stresses(&input);
        let curves = envelope_curves(&stresses, input.uts_mpa, input.yield_stress_mpa, 3);
        let points = vec![OperatingPoint {
            dataset: "Dataset 1".to_string(),
            mean_stress_mpa: stresses.mean_mpa,
            alternating_stress_mpa: stresses.alternating_mpa,
        }];
        let csv = render_envelopes(&curves, &points);
        assert_eq!(csv.lines().count(), 1 + 5 * 3 + 1);
        assert!(csv.contains("Goodman,0.0000,247.5000"));
        assert!(csv.contains("\"Dataset 1\",69.0302,30.6801"));
    }
}
