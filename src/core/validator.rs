use crate::domain::model::{
    Advisory, CrossPattern, Violation, WheelGeometry, ERD_RANGE, LOW_SPOKE_COUNT,
    MIN_CENTER_TO_FLANGE, MIN_FLANGE_DIAMETER, SPOKE_COUNT_RANGE,
};
use crate::utils::error::{Result, SpokeError};
use crate::utils::validation::Validate;

/// Checks a wheel against the plausibility rules and returns every broken rule,
/// in rule order. An empty list means the wheel can be built.
///
/// NaN in a measured field counts as out of range / too small.
pub fn validate(geometry: &WheelGeometry) -> Vec<Violation> {
    let mut violations = Vec::new();

    if geometry.spoke_count % 2 != 0 {
        violations.push(Violation::OddSpokeCount);
    }

    if !SPOKE_COUNT_RANGE.contains(&geometry.spoke_count) {
        violations.push(Violation::SpokeCountOutOfRange);
    }

    if !ERD_RANGE.contains(&geometry.erd) {
        violations.push(Violation::ErdOutOfRange);
    }

    if below_minimum(geometry.left_flange_diameter, MIN_FLANGE_DIAMETER)
        || below_minimum(geometry.right_flange_diameter, MIN_FLANGE_DIAMETER)
    {
        violations.push(Violation::FlangeDiameterTooSmall);
    }

    if below_minimum(geometry.left_center_to_flange, MIN_CENTER_TO_FLANGE)
        || below_minimum(geometry.right_center_to_flange, MIN_CENTER_TO_FLANGE)
    {
        violations.push(Violation::CenterToFlangeTooSmall);
    }

    let cross_number = i64::from(geometry.cross_pattern.cross_number());
    if cross_number > max_cross(geometry.spoke_count) {
        violations.push(Violation::IncompatibleCrossPattern {
            pattern: geometry.cross_pattern,
            spoke_count: geometry.spoke_count,
        });
    }

    violations
}

/// Shop notes for the wheel, in display order. These never make a wheel invalid.
/// Only a positive offset (toward the drive side) counts as an offset rim.
pub fn advisories(geometry: &WheelGeometry) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    if geometry.cross_pattern == CrossPattern::Radial {
        advisories.push(Advisory::RadialLacing);
    }

    if geometry.offset > 0.0 {
        advisories.push(Advisory::OffsetRim);
    }

    if geometry.spoke_count < LOW_SPOKE_COUNT {
        advisories.push(Advisory::LowSpokeCount {
            spoke_count: geometry.spoke_count,
        });
    }

    advisories
}

/// Highest cross number a wheel with this many spokes can be laced to.
pub fn max_cross(spoke_count: i32) -> i64 {
    i64::from(spoke_count).div_euclid(4)
}

fn below_minimum(value: f64, minimum: f64) -> bool {
    value.is_nan() || value < minimum
}

impl Validate for WheelGeometry {
    fn validate(&self) -> Result<()> {
        let violations = validate(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SpokeError::Validation { violations })
        }
    }
}
