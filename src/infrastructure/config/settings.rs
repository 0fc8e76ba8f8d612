//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Every section is optional; a missing file section falls back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use hedgebook::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("hedgebook.toml")?;
//!     config.logging.init();
//!     let settings = config.engine_settings()?;
//!     println!("{} houses", settings.house_count.get());
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::application::engine::EngineSettings;
use crate::domain::convergence::ConvergencePolicy;
use crate::domain::state::{Granularity, HouseCount};
use crate::error::{ConfigError, Result};

/// Engine defaults applied at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Active house count (2 to 5).
    #[serde(default = "default_houses")]
    pub houses: usize,
    /// Rounding step for back stakes: 0.01, 0.10, 0.50 or 1.00.
    #[serde(default = "default_rounding")]
    pub rounding: Decimal,
    /// Maximum settlement passes per command.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Smallest stake change committed by the solver.
    #[serde(default = "default_epsilon")]
    pub epsilon: Decimal,
}

const fn default_houses() -> usize {
    HouseCount::MIN
}

fn default_rounding() -> Decimal {
    dec!(0.01)
}

const fn default_max_iterations() -> usize {
    10
}

fn default_epsilon() -> Decimal {
    dec!(0.01)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            houses: default_houses(),
            rounding: default_rounding(),
            max_iterations: default_max_iterations(),
            epsilon: default_epsilon(),
        }
    }
}

impl TryFrom<&EngineConfig> for EngineSettings {
    type Error = ConfigError;

    fn try_from(config: &EngineConfig) -> std::result::Result<Self, Self::Error> {
        let house_count =
            HouseCount::try_from(config.houses).map_err(|e| ConfigError::InvalidValue {
                field: "houses",
                reason: e.to_string(),
            })?;
        let granularity =
            Granularity::try_from(config.rounding).map_err(|e| ConfigError::InvalidValue {
                field: "rounding",
                reason: e.to_string(),
            })?;
        if config.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_iterations",
                reason: "must be greater than 0".to_string(),
            });
        }
        if config.epsilon <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "epsilon",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            house_count,
            granularity,
            policy: ConvergencePolicy {
                epsilon: config.epsilon,
                max_iterations: config.max_iterations,
            },
        })
    }
}

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Engine defaults.
    #[serde(default)]
    pub engine: EngineConfig,
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
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load the file if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or is invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LoggingConfig::FORMATS.join(", ")),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        self.engine_settings()?;
        Ok(())
    }

    /// Engine settings derived from the `[engine]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn engine_settings(&self) -> Result<EngineSettings> {
        Ok(EngineSettings::try_from(&self.engine)?)
    }
}
