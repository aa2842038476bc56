use crate::domain::model::WheelGeometry;
use crate::utils::error::Result;

/// Anything that can produce the wheel measurements for a calculation.
pub trait GeometrySource: Send + Sync {
    fn geometry(&self) -> Result<WheelGeometry>;

    /// Short human label for log lines, e.g. the config file name.
    fn describe(&self) -> String {
        "in-memory geometry".to_string()
    }
}

impl GeometrySource for WheelGeometry {
    fn geometry(&self) -> Result<WheelGeometry> {
        Ok(*self)
    }
}
