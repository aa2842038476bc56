use crate::core::engine::Calculation;
use crate::core::validator::advisories;
use crate::domain::model::{OrderLine, Side, SpokeLengthResult, WheelGeometry};
use crate::utils::error::{Result, SpokeError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(calculation: &Calculation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(calculation)),
        OutputFormat::Json => render_json(calculation),
        OutputFormat::Csv => render_csv(calculation),
    }
}

/// Human-readable results sheet.
pub fn render_text(calculation: &Calculation) -> String {
    let Calculation { geometry, result } = calculation;
    let mut out = String::new();

    let _ = writeln!(out, "Spoke Length Results");
    let _ = write!(
        out,
        "{} spokes • {} pattern • ERD: {}mm",
        geometry.spoke_count, geometry.cross_pattern, geometry.erd
    );
    if geometry.offset != 0.0 {
        let _ = write!(out, " • Offset: {}mm", geometry.offset);
    }
    let _ = writeln!(out);

    for side in Side::BOTH {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", side.title());
        let _ = writeln!(out, "  Exact length:      {:.2} mm", result.length(side));
        let _ = writeln!(out, "  Order this length: {} mm", result.length_rounded(side));
        let _ = writeln!(
            out,
            "  Flange Ø: {}mm, center to flange: {}mm",
            geometry.flange_diameter(side),
            geometry.center_to_flange(side)
        );
    }

    let _ = writeln!(out);
    if result.sides_match() {
        let _ = writeln!(
            out,
            "Both sides use the same spoke length: {}mm",
            result.left_length_rounded
        );
        let _ = writeln!(out, "Order {} spokes of this length", geometry.spoke_count);
    } else {
        let _ = writeln!(out, "Different spoke lengths required");
        for line in result.order(geometry.spoke_count) {
            let _ = writeln!(out, "  {}", line);
        }
    }

    let notes = advisories(geometry);
    if !notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Shop notes");
        for note in notes {
            let _ = writeln!(out, "  ! {}", note);
        }
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    geometry: &'a WheelGeometry,
    cross_pattern_description: &'static str,
    result: &'a SpokeLengthResult,
    order: Vec<OrderLine>,
    advisories: Vec<String>,
}

pub fn render_json(calculation: &Calculation) -> Result<String> {
    let report = JsonReport {
        geometry: &calculation.geometry,
        cross_pattern_description: calculation.geometry.cross_pattern.description(),
        result: &calculation.result,
        order: calculation.result.order(calculation.geometry.spoke_count),
        advisories: advisories(&calculation.geometry)
            .iter()
            .map(ToString::to_string)
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[derive(Serialize)]
struct CsvRow {
    side: Side,
    flange_diameter: f64,
    center_to_flange: f64,
    spokes: i32,
    exact_length_mm: f64,
    order_length_mm: u32,
}

/// One row per hub side.
pub fn render_csv(calculation: &Calculation) -> Result<String> {
    let Calculation { geometry, result } = calculation;
    let mut writer = csv::Writer::from_writer(Vec::new());

    for side in Side::BOTH {
        writer.serialize(CsvRow {
            side,
            flange_diameter: geometry.flange_diameter(side),
            center_to_flange: geometry.center_to_flange(side),
            spokes: geometry.spokes_per_side(),
            exact_length_mm: result.length(side),
            order_length_mm: result.length_rounded(side),
        })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SpokeError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CrossPattern;

    fn symmetric() -> Calculation {
        Calculation {
            geometry: WheelGeometry::default(),
            result: SpokeLengthResult {
                left_length: 293.23,
                right_length: 293.23,
                left_length_rounded: 293,
                right_length_rounded: 293,
            },
        }
    }

    fn dished() -> Calculation {
        Calculation {
            geometry: WheelGeometry {
                erd: 540.0,
                spoke_count: 28,
                left_flange_diameter: 45.0,
                right_flange_diameter: 45.0,
                left_center_to_flange: 20.0,
                right_center_to_flange: 35.0,
                cross_pattern: CrossPattern::TwoCross,
                offset: 2.5,
            },
            result: SpokeLengthResult {
                left_length: 257.35,
                right_length: 258.95,
                left_length_rounded: 257,
                right_length_rounded: 259,
            },
        }
    }

    #[test]
    fn test_text_report_same_length() {
        let text = render_text(&symmetric());

        assert!(text.contains("32 spokes • 3x pattern • ERD: 602mm\n"));
        assert!(!text.contains("Offset"));
        assert!(text.contains("Left Side (Non-Drive)"));
        assert!(text.contains("Exact length:      293.23 mm"));
        assert!(text.contains("Order this length: 293 mm"));
        assert!(text.contains("Both sides use the same spoke length: 293mm"));
        assert!(text.contains("Order 32 spokes of this length"));
        assert!(!text.contains("Shop notes"));
    }

    #[test]
    fn test_text_report_different_lengths() {
        let text = render_text(&dished());

        assert!(text.contains("28 spokes • 2x pattern • ERD: 540mm • Offset: 2.5mm"));
        assert!(text.contains("Different spoke lengths required"));
        assert!(text.contains("left: 14 spokes x 257mm"));
        assert!(text.contains("right: 14 spokes x 259mm"));
        assert!(text.contains("Shop notes\n  ! Offset rim detected"));
        assert!(!text.contains("Low spoke count"));
        assert!(!text.contains("Radial lacing warning"));
    }

    #[test]
    fn test_text_report_lists_every_shop_note() {
        let mut calculation = dished();
        calculation.geometry.spoke_count = 24;
        calculation.geometry.cross_pattern = CrossPattern::Radial;

        let text = render_text(&calculation);
        let notes: Vec<&str> = text.lines().filter(|l| l.starts_with("  ! ")).collect();
        assert_eq!(notes.len(), 3);
        assert!(notes[0].contains("Radial lacing warning"));
        assert!(notes[1].contains("Offset rim detected"));
        assert!(notes[2].contains("wheels with 24 spokes"));
    }

    #[test]
    fn test_json_report() {
        let json = render(&dished(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["geometry"]["cross_pattern"], "2x");
        assert_eq!(value["result"]["right_length"], 258.95);
        assert_eq!(value["result"]["left_length_rounded"], 257);
        assert_eq!(value["order"].as_array().unwrap().len(), 2);
        assert_eq!(value["order"][1]["side"], "right");

        let notes = value["advisories"].as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert!(notes[0].as_str().unwrap().starts_with("Offset rim detected"));

        let plain = render_json(&symmetric()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&plain).unwrap();
        assert_eq!(value["advisories"], serde_json::json!([]));
    }

    #[test]
    fn test_csv_report() {
        let csv = render(&dished(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "side,flange_diameter,center_to_flange,spokes,exact_length_mm,order_length_mm"
        );
        assert_eq!(lines[1], "left,45.0,20.0,14,257.35,257");
        assert_eq!(lines[2], "right,45.0,35.0,14,258.95,259");
    }
}
