use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// Spoke counts a wheel can be laced with.
pub const SPOKE_COUNT_RANGE: RangeInclusive<i32> = 12..=48;
/// Plausible effective rim diameters in millimeters.
pub const ERD_RANGE: RangeInclusive<f64> = 400.0..=650.0;
pub const MIN_FLANGE_DIAMETER: f64 = 20.0;
pub const MIN_CENTER_TO_FLANGE: f64 = 5.0;

/// Drillings that hubs and rims are commonly sold in.
pub const COMMON_SPOKE_COUNTS: [i32; 8] = [16, 20, 24, 28, 32, 36, 40, 48];

/// Lacing pattern; the serialized labels are the ones users type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum CrossPattern {
    #[serde(rename = "radial")]
    #[cfg_attr(feature = "cli", value(name = "radial"))]
    Radial,
    #[serde(rename = "1x")]
    #[cfg_attr(feature = "cli", value(name = "1x"))]
    OneCross,
    #[serde(rename = "2x")]
    #[cfg_attr(feature = "cli", value(name = "2x"))]
    TwoCross,
    #[serde(rename = "3x")]
    #[cfg_attr(feature = "cli", value(name = "3x"))]
    ThreeCross,
    #[serde(rename = "4x")]
    #[cfg_attr(feature = "cli", value(name = "4x"))]
    FourCross,
}

impl CrossPattern {
    pub const ALL: [CrossPattern; 5] = [
        CrossPattern::Radial,
        CrossPattern::OneCross,
        CrossPattern::TwoCross,
        CrossPattern::ThreeCross,
        CrossPattern::FourCross,
    ];

    /// Number of spokes each spoke crosses between hub and rim.
    pub fn cross_number(self) -> u32 {
        match self {
            CrossPattern::Radial => 0,
            CrossPattern::OneCross => 1,
            CrossPattern::TwoCross => 2,
            CrossPattern::ThreeCross => 3,
            CrossPattern::FourCross => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CrossPattern::Radial => "radial",
            CrossPattern::OneCross => "1x",
            CrossPattern::TwoCross => "2x",
            CrossPattern::ThreeCross => "3x",
            CrossPattern::FourCross => "4x",
        }
    }

    /// Shop guidance on where the pattern is typically used.
    pub fn description(self) -> &'static str {
        match self {
            CrossPattern::Radial => "Radial: spokes go straight from hub to rim (front wheels only)",
            CrossPattern::OneCross => "1-cross: lightweight, good for low spoke count wheels",
            CrossPattern::TwoCross => "2-cross: lighter weight, good for most applications",
            CrossPattern::ThreeCross => "3-cross: traditional pattern, good strength and durability",
            CrossPattern::FourCross => "4-cross: maximum strength for tandems and cargo bikes",
        }
    }
}

impl fmt::Display for CrossPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CrossPattern {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CrossPattern::ALL
            .into_iter()
            .find(|pattern| pattern.label() == wanted)
            .ok_or_else(|| {
                format!(
                    "unknown cross pattern '{}', expected one of: radial, 1x, 2x, 3x, 4x",
                    s
                )
            })
    }
}

/// Hub side. Left is the non-drive side, right the drive side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Sign applied to the rim offset when computing this side's axial distance.
    /// A positive offset moves the rim toward the drive side.
    pub fn offset_sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Side::Left => "Left Side (Non-Drive)",
            Side::Right => "Right Side (Drive Side)",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Rim and hub measurements for one wheel, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelGeometry {
    pub erd: f64,
    pub spoke_count: i32,
    pub left_flange_diameter: f64,
    pub right_flange_diameter: f64,
    pub left_center_to_flange: f64,
    pub right_center_to_flange: f64,
    pub cross_pattern: CrossPattern,
    pub offset: f64,
}

impl WheelGeometry {
    pub fn flange_diameter(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_flange_diameter,
            Side::Right => self.right_flange_diameter,
        }
    }

    pub fn center_to_flange(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_center_to_flange,
            Side::Right => self.right_center_to_flange,
        }
    }

    pub fn spokes_per_side(&self) -> i32 {
        self.spoke_count / 2
    }

    pub fn is_common_spoke_count(&self) -> bool {
        COMMON_SPOKE_COUNTS.contains(&self.spoke_count)
    }
}

impl Default for WheelGeometry {
    /// A 32 hole 3-cross wheel on a 602 mm ERD rim with a symmetric hub.
    fn default() -> Self {
        Self {
            erd: 602.0,
            spoke_count: 32,
            left_flange_diameter: 58.0,
            right_flange_diameter: 58.0,
            left_center_to_flange: 35.0,
            right_center_to_flange: 35.0,
            cross_pattern: CrossPattern::ThreeCross,
            offset: 0.0,
        }
    }
}

/// One broken plausibility rule. `Display` gives the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum Violation {
    #[error("Spoke count must be even")]
    OddSpokeCount,

    #[error("Spoke count out of range (must be between 12 and 48)")]
    SpokeCountOutOfRange,

    #[error("ERD out of expected range (400-650 mm)")]
    ErdOutOfRange,

    #[error("Flange diameter too small (minimum 20 mm)")]
    FlangeDiameterTooSmall,

    #[error("Center-to-flange distance too small (minimum 5 mm)")]
    CenterToFlangeTooSmall,

    #[error("{pattern} cross pattern is incompatible with {spoke_count} spokes")]
    IncompatibleCrossPattern {
        pattern: CrossPattern,
        spoke_count: i32,
    },
}

/// Spoke counts below this get the low spoke count advisory.
pub const LOW_SPOKE_COUNT: i32 = 28;

/// Shop note about a buildable wheel. Unlike a `Violation` it never blocks the calculation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advisory {
    #[error("Radial lacing warning: only use radial on the non-drive side or front wheels; drive-side radial can fail catastrophically under torque")]
    RadialLacing,

    #[error("Offset rim detected: disc brake wheels use offset rims, make sure you order the correct length for each side")]
    OffsetRim,

    #[error("Low spoke count: wheels with {spoke_count} spokes require precise spoke tension and a true build; consider professional help for a first build")]
    LowSpokeCount { spoke_count: i32 },
}

/// Spoke lengths for both sides of a wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpokeLengthResult {
    /// Exact length in mm, rounded to two decimals.
    pub left_length: f64,
    pub right_length: f64,
    /// Length to order, in whole millimeters.
    pub left_length_rounded: u32,
    pub right_length_rounded: u32,
}

impl SpokeLengthResult {
    pub fn length(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_length,
            Side::Right => self.right_length,
        }
    }

    pub fn length_rounded(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_length_rounded,
            Side::Right => self.right_length_rounded,
        }
    }

    pub fn sides_match(&self) -> bool {
        self.left_length_rounded == self.right_length_rounded
    }

    /// Shopping list: a single line when both sides take the same length,
    /// otherwise one line per side with half the spokes each.
    pub fn order(&self, spoke_count: i32) -> Vec<OrderLine> {
        if self.sides_match() {
            return vec![OrderLine {
                side: None,
                count: spoke_count,
                length_mm: self.left_length_rounded,
            }];
        }

        Side::BOTH
            .into_iter()
            .map(|side| OrderLine {
                side: Some(side),
                count: spoke_count / 2,
                length_mm: self.length_rounded(side),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    /// `None` when the line covers both sides.
    pub side: Option<Side>,
    pub count: i32,
    pub length_mm: u32,
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            Some(side) => write!(f, "{}: {} spokes x {}mm", side, self.count, self.length_mm),
            None => write!(f, "{} spokes x {}mm", self.count, self.length_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_numbers() {
        let numbers: Vec<u32> = CrossPattern::ALL.iter().map(|p| p.cross_number()).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_cross_pattern_parsing() {
        assert_eq!("3x".parse::<CrossPattern>(), Ok(CrossPattern::ThreeCross));
        assert_eq!("Radial".parse::<CrossPattern>(), Ok(CrossPattern::Radial));
        assert_eq!(" 1X ".parse::<CrossPattern>(), Ok(CrossPattern::OneCross));
        assert!("5x".parse::<CrossPattern>().is_err());
        assert!("3-cross".parse::<CrossPattern>().is_err());
    }

    #[test]
    fn test_cross_pattern_serde_labels() {
        let json = serde_json::to_string(&CrossPattern::FourCross).unwrap();
        assert_eq!(json, "\"4x\"");

        let parsed: CrossPattern = serde_json::from_str("\"radial\"").unwrap();
        assert_eq!(parsed, CrossPattern::Radial);
    }

    #[test]
    fn test_default_geometry() {
        let geometry = WheelGeometry::default();
        assert_eq!(geometry.erd, 602.0);
        assert_eq!(geometry.spokes_per_side(), 16);
        assert_eq!(geometry.cross_pattern, CrossPattern::ThreeCross);
        assert!(geometry.is_common_spoke_count());
    }

    #[test]
    fn test_uncommon_spoke_count() {
        let geometry = WheelGeometry {
            spoke_count: 18,
            ..WheelGeometry::default()
        };
        assert!(!geometry.is_common_spoke_count());
    }

    #[test]
    fn test_order_single_line_when_sides_match() {
        let result = SpokeLengthResult {
            left_length: 293.23,
            right_length: 293.23,
            left_length_rounded: 293,
            right_length_rounded: 293,
        };

        let order = result.order(32);
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].to_string(), "32 spokes x 293mm");
    }

    #[test]
    fn test_order_split_by_side() {
        let result = SpokeLengthResult {
            left_length: 257.35,
            right_length: 258.95,
            left_length_rounded: 257,
            right_length_rounded: 259,
        };

        let order = result.order(28);
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].to_string(), "left: 14 spokes x 257mm");
        assert_eq!(order[1].to_string(), "right: 14 spokes x 259mm");
    }
}
