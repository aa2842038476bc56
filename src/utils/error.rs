use crate::domain::model::{Side, Violation};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpokeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Wheel geometry failed validation: {}", join_violations(.violations))]
    Validation { violations: Vec<Violation> },

    #[error("Spoke length undefined on {side} side: {reason}")]
    Calculation { side: Side, reason: String },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Geometry,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SpokeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpokeError::IoError(_) => ErrorCategory::Io,
            SpokeError::SerializationError(_) | SpokeError::CsvError(_) => ErrorCategory::Output,
            SpokeError::TomlError(_)
            | SpokeError::ConfigError { .. }
            | SpokeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SpokeError::Validation { .. } | SpokeError::Calculation { .. } => {
                ErrorCategory::Geometry
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Geometry => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SpokeError::IoError(_) => "Check that the config file exists and is readable",
            SpokeError::SerializationError(_) | SpokeError::CsvError(_) => {
                "Try a different output format with --format"
            }
            SpokeError::TomlError(_) | SpokeError::ConfigError { .. } => {
                "Make sure the config file is valid TOML with a [wheel] table"
            }
            SpokeError::InvalidConfigValueError { .. } => {
                "Correct the highlighted value and run again"
            }
            SpokeError::Validation { .. } => {
                "Re-measure the rim and hub; use calipers for flange dimensions"
            }
            SpokeError::Calculation { .. } => {
                "Validate the geometry before computing spoke lengths"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SpokeError::Validation { violations } => {
                let mut message = String::from("The wheel cannot be built as specified:");
                for violation in violations {
                    message.push_str("\n  - ");
                    message.push_str(&violation.to_string());
                }
                message
            }
            SpokeError::IoError(e) => format!("Could not read input: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpokeError>;
