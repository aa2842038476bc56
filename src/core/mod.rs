pub mod calculator;
pub mod engine;
pub mod report;
pub mod validator;

pub use crate::domain::model::{Advisory, CrossPattern, Side, SpokeLengthResult, Violation, WheelGeometry};
pub use crate::domain::ports::GeometrySource;
pub use crate::utils::error::Result;
