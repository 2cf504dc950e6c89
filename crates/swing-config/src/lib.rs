//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, LoggingConfig, RiskSettings, ScanSettings};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Errors from loading a validated configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Load configuration from file and environment.
///
/// Environment variables use the `SWING` prefix and `__` as the section
/// separator, e.g. `SWING__RISK__CAPITAL=25000`.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("SWING")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Load configuration and reject it when any rule is violated.
pub fn load_validated_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = load_config(path)?;
    config.ensure_valid()?;
    Ok(config)
}
