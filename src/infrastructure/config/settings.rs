//! Application configuration loading and validation.
//!
//! # Example
//!
//! ```no_run
//! use waterfill::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("waterfill.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::logging::LoggingConfig;
use super::solver::SolverConfig;
use crate::error::{ConfigError, Result};

const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Solver backend settings.
    #[serde(default)]
    pub solver: SolverConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Initialize the tracing subscriber from the `[logging]` table.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LOG_FORMATS.join(", ")),
            }
            .into());
        }
        let tolerance = self.solver.tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "tolerance",
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            }
            .into());
        }
        if self.solver.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
