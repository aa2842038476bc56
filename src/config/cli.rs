use crate::config::toml_config::TomlConfig;
use crate::core::report::OutputFormat;
use crate::core::GeometrySource;
use crate::domain::model::{CrossPattern, WheelGeometry};
use crate::utils::error::Result;
use crate::utils::validation::{validate_finite, validate_path, Validate};
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "spoke-calc")]
#[command(about = "Spoke length calculator for J-bend spoked bicycle wheels")]
pub struct CliConfig {
    /// TOML file describing the wheel; flags below override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Effective rim diameter (mm)
    #[arg(long)]
    pub erd: Option<f64>,

    /// Total spokes in the wheel, both sides
    #[arg(long, allow_negative_numbers = true)]
    pub spoke_count: Option<i32>,

    /// Non-drive side flange diameter (mm)
    #[arg(long)]
    pub left_flange_diameter: Option<f64>,

    /// Drive side flange diameter (mm)
    #[arg(long)]
    pub right_flange_diameter: Option<f64>,

    /// Hub center to non-drive flange (mm)
    #[arg(long)]
    pub left_center_to_flange: Option<f64>,

    /// Hub center to drive flange (mm)
    #[arg(long)]
    pub right_center_to_flange: Option<f64>,

    /// Lacing pattern
    #[arg(long, value_enum)]
    pub cross: Option<CrossPattern>,

    /// Rim spoke-hole offset (mm); positive moves toward the drive side
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<f64>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Layers the flags that were given over `base`.
    pub fn apply_to(&self, base: WheelGeometry) -> WheelGeometry {
        WheelGeometry {
            erd: self.erd.unwrap_or(base.erd),
            spoke_count: self.spoke_count.unwrap_or(base.spoke_count),
            left_flange_diameter: self.left_flange_diameter.unwrap_or(base.left_flange_diameter),
            right_flange_diameter: self
                .right_flange_diameter
                .unwrap_or(base.right_flange_diameter),
            left_center_to_flange: self
                .left_center_to_flange
                .unwrap_or(base.left_center_to_flange),
            right_center_to_flange: self
                .right_center_to_flange
                .unwrap_or(base.right_center_to_flange),
            cross_pattern: self.cross.unwrap_or(base.cross_pattern),
            offset: self.offset.unwrap_or(base.offset),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_path("--config", path)?;
        }

        let measurements = [
            ("--erd", self.erd),
            ("--left-flange-diameter", self.left_flange_diameter),
            ("--right-flange-diameter", self.right_flange_diameter),
            ("--left-center-to-flange", self.left_center_to_flange),
            ("--right-center-to-flange", self.right_center_to_flange),
            ("--offset", self.offset),
        ];

        for (field, value) in measurements {
            if let Some(value) = value {
                validate_finite(field, value)?;
            }
        }

        Ok(())
    }
}

/// Defaults, then the optional TOML file, then command-line flags.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub file: Option<TomlConfig>,
    pub cli: CliConfig,
}

impl LayeredConfig {
    pub fn load(cli: CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading wheel configuration from: {}", path);
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        Ok(Self { file, cli })
    }

    pub fn output_format(&self) -> OutputFormat {
        self.cli
            .format
            .or_else(|| self.file.as_ref().and_then(TomlConfig::output_format))
            .unwrap_or_default()
    }
}

impl GeometrySource for LayeredConfig {
    fn geometry(&self) -> Result<WheelGeometry> {
        let base = match &self.file {
            Some(file) => file.geometry()?,
            None => WheelGeometry::default(),
        };
        Ok(self.cli.apply_to(base))
    }

    fn describe(&self) -> String {
        match &self.file {
            Some(file) => format!("{} with command-line overrides", file.describe()),
            None => "defaults with command-line overrides".to_string(),
        }
    }
}

impl Validate for LayeredConfig {
    fn validate(&self) -> Result<()> {
        self.cli.validate()?;
        if let Some(file) = &self.file {
            file.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SpokeError;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "spoke-calc",
            "--erd",
            "540",
            "--spoke-count",
            "28",
            "--cross",
            "2x",
            "--offset",
            "-2.5",
            "--format",
            "csv",
        ]);

        assert_eq!(cli.erd, Some(540.0));
        assert_eq!(cli.spoke_count, Some(28));
        assert_eq!(cli.cross, Some(CrossPattern::TwoCross));
        assert_eq!(cli.offset, Some(-2.5));
        assert_eq!(cli.format, Some(OutputFormat::Csv));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_unknown_cross_flag_rejected() {
        let result = CliConfig::try_parse_from(["spoke-calc", "--cross", "3-cross"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_file_values() {
        let file = TomlConfig::from_toml_str(
            r#"
[wheel]
erd = 540
spoke_count = 28

[wheel.right]
center_to_flange = 18

[output]
format = "json"
"#,
        )
        .unwrap();

        let layered = LayeredConfig {
            file: Some(file),
            cli: CliConfig {
                spoke_count: Some(32),
                ..CliConfig::default()
            },
        };

        let geometry = layered.geometry().unwrap();
        assert_eq!(geometry.erd, 540.0);
        assert_eq!(geometry.spoke_count, 32);
        assert_eq!(geometry.right_center_to_flange, 18.0);
        assert_eq!(layered.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_no_file_uses_defaults() {
        let layered = LayeredConfig::load(CliConfig::default()).unwrap();

        assert_eq!(layered.geometry().unwrap(), WheelGeometry::default());
        assert_eq!(layered.output_format(), OutputFormat::Text);
    }

    #[test]
    fn test_non_finite_flag_rejected() {
        let cli = CliConfig {
            offset: Some(f64::INFINITY),
            ..CliConfig::default()
        };

        assert!(matches!(
            cli.validate(),
            Err(SpokeError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliConfig {
            config: Some("/nonexistent/wheel.toml".to_string()),
            ..CliConfig::default()
        };

        assert!(matches!(
            LayeredConfig::load(cli),
            Err(SpokeError::IoError(_))
        ));
    }
}
