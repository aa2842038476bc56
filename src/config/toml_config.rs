use crate::core::report::OutputFormat;
use crate::core::GeometrySource;
use crate::domain::model::{CrossPattern, Side, WheelGeometry};
use crate::utils::error::{Result, SpokeError};
use crate::utils::validation::{validate_finite, validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Wheel description loaded from a TOML file. Every field is optional and
/// falls back to the built-in default wheel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub wheel: WheelConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WheelConfig {
    pub name: Option<String>,
    pub erd: Option<f64>,
    pub spoke_count: Option<i32>,
    pub cross_pattern: Option<CrossPattern>,
    pub offset: Option<f64>,
    pub left: Option<HubSideConfig>,
    pub right: Option<HubSideConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubSideConfig {
    pub flange_diameter: Option<f64>,
    pub center_to_flange: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SpokeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SpokeError::ConfigError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn side(&self, side: Side) -> Option<&HubSideConfig> {
        match side {
            Side::Left => self.wheel.left.as_ref(),
            Side::Right => self.wheel.right.as_ref(),
        }
    }

    /// Layers the values present in the file over `base`.
    pub fn apply_to(&self, base: WheelGeometry) -> WheelGeometry {
        let wheel = &self.wheel;
        let mut geometry = WheelGeometry {
            erd: wheel.erd.unwrap_or(base.erd),
            spoke_count: wheel.spoke_count.unwrap_or(base.spoke_count),
            cross_pattern: wheel.cross_pattern.unwrap_or(base.cross_pattern),
            offset: wheel.offset.unwrap_or(base.offset),
            ..base
        };

        if let Some(left) = self.side(Side::Left) {
            geometry.left_flange_diameter =
                left.flange_diameter.unwrap_or(geometry.left_flange_diameter);
            geometry.left_center_to_flange =
                left.center_to_flange.unwrap_or(geometry.left_center_to_flange);
        }
        if let Some(right) = self.side(Side::Right) {
            geometry.right_flange_diameter =
                right.flange_diameter.unwrap_or(geometry.right_flange_diameter);
            geometry.right_center_to_flange =
                right.center_to_flange.unwrap_or(geometry.right_center_to_flange);
        }

        geometry
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.as_ref().and_then(|o| o.format)
    }

    pub fn name(&self) -> Option<&str> {
        self.wheel.name.as_deref()
    }
}

impl GeometrySource for TomlConfig {
    fn geometry(&self) -> Result<WheelGeometry> {
        Ok(self.apply_to(WheelGeometry::default()))
    }

    fn describe(&self) -> String {
        match self.name() {
            Some(name) => format!("TOML config '{}'", name),
            None => "TOML config".to_string(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.wheel.name {
            validate_non_empty_string("wheel.name", name)?;
        }

        let measurements = [
            ("wheel.erd", self.wheel.erd),
            ("wheel.offset", self.wheel.offset),
            (
                "wheel.left.flange_diameter",
                self.side(Side::Left).and_then(|s| s.flange_diameter),
            ),
            (
                "wheel.left.center_to_flange",
                self.side(Side::Left).and_then(|s| s.center_to_flange),
            ),
            (
                "wheel.right.flange_diameter",
                self.side(Side::Right).and_then(|s| s.flange_diameter),
            ),
            (
                "wheel.right.center_to_flange",
                self.side(Side::Right).and_then(|s| s.center_to_flange),
            ),
        ];

        for (field, value) in measurements {
            if let Some(value) = value {
                validate_finite(field, value)?;
            }
        }

        Ok(())
    }
}
