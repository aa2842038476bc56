pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, LayeredConfig};
pub use crate::config::TomlConfig;

pub use crate::core::calculator::compute_lengths;
pub use crate::core::engine::{Calculation, CalculationEngine};
pub use crate::core::report::{render, OutputFormat};
pub use crate::core::validator::{advisories, validate};
pub use crate::domain::model::{Advisory, CrossPattern, Side, SpokeLengthResult, Violation, WheelGeometry};
pub use crate::utils::error::{Result, SpokeError};
