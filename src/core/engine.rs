use crate::core::calculator::compute_lengths;
use crate::core::validator::advisories;
use crate::core::GeometrySource;
use crate::domain::model::{SpokeLengthResult, WheelGeometry};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::Serialize;

/// A validated wheel together with its computed spoke lengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Calculation {
    pub geometry: WheelGeometry,
    pub result: SpokeLengthResult,
}

pub struct CalculationEngine<S: GeometrySource> {
    source: S,
}

impl<S: GeometrySource> CalculationEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads the geometry, refuses it if any rule is broken, then computes both sides.
    pub fn run(&self) -> Result<Calculation> {
        tracing::info!("Reading wheel geometry from {}", self.source.describe());
        let geometry = self.source.geometry()?;
        tracing::debug!("Wheel geometry: {:?}", geometry);

        if !geometry.is_common_spoke_count() {
            tracing::warn!(
                "{} spokes is an uncommon drilling; double-check the hub and rim",
                geometry.spoke_count
            );
        }

        if let Err(e) = geometry.validate() {
            tracing::warn!("Geometry rejected: {}", e);
            return Err(e);
        }

        for advisory in advisories(&geometry) {
            tracing::warn!("{}", advisory);
        }

        let result = compute_lengths(&geometry)?;
        tracing::info!(
            "Computed lengths: left {:.2}mm (order {}mm), right {:.2}mm (order {}mm)",
            result.left_length,
            result.left_length_rounded,
            result.right_length,
            result.right_length_rounded
        );

        Ok(Calculation { geometry, result })
    }
}
