use crate::domain::model::{Side, SpokeLengthResult, WheelGeometry};
use crate::utils::error::{Result, SpokeError};

/// Computes the spoke length for both hub sides.
///
/// Performs no validation. A side whose length is undefined yields
/// `SpokeError::Calculation` rather than a NaN in the result. That happens when:
/// - the squared length is NaN or infinite (zero spoke count, overflow);
/// - the squared length comes out negative, which floating-point cancellation can
///   produce for finite input when the flange radius nearly equals the rim radius
///   with radial lacing and no axial distance;
/// - the order length does not fit in a `u32`.
pub fn compute_lengths(geometry: &WheelGeometry) -> Result<SpokeLengthResult> {
    let left = side_length(geometry, Side::Left)?;
    let right = side_length(geometry, Side::Right)?;

    Ok(SpokeLengthResult {
        left_length: round_to_hundredths(left),
        right_length: round_to_hundredths(right),
        left_length_rounded: order_length(left, Side::Left)?,
        right_length_rounded: order_length(right, Side::Right)?,
    })
}

/// Exact length of one side's spokes, by the law of cosines on the triangle
/// formed by the flange radius, the rim radius and the axial flange distance.
pub fn side_length(geometry: &WheelGeometry, side: Side) -> Result<f64> {
    let r = geometry.flange_diameter(side) / 2.0;
    let d = geometry.erd / 2.0;
    let a = axial_distance(geometry, side);
    let spokes_per_side = f64::from(geometry.spoke_count) / 2.0;

    let angle_deg = f64::from(geometry.cross_pattern.cross_number()) * 360.0 / spokes_per_side;
    let angle = angle_deg.to_radians();

    let radicand = r * r + d * d + a * a - 2.0 * d * r * angle.cos();
    if !radicand.is_finite() || radicand < 0.0 {
        return Err(SpokeError::Calculation {
            side,
            reason: format!("length squared is {}", radicand),
        });
    }

    Ok(radicand.sqrt())
}

/// Flange-to-rim distance along the axle. A positive offset lengthens the
/// right side and shortens the left.
pub fn axial_distance(geometry: &WheelGeometry, side: Side) -> f64 {
    geometry.center_to_flange(side) + side.offset_sign() * geometry.offset
}

fn round_to_hundredths(length: f64) -> f64 {
    (length * 100.0).round() / 100.0
}

/// Nearest whole millimeter, halves rounding up.
fn order_length(length: f64, side: Side) -> Result<u32> {
    let rounded = length.round();
    if rounded > f64::from(u32::MAX) {
        return Err(SpokeError::Calculation {
            side,
            reason: format!("order length {}mm is out of range", rounded),
        });
    }
    Ok(rounded as u32)
}
