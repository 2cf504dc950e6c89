//! Configuration structures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use swing_core::types::{Style, StyleProfile, StyleTable};

use crate::SettingsError;

/// Smallest reward:risk multiple a style may use.
const MIN_REWARD_RATIO: Decimal = dec!(1.2);

/// Largest risk ceiling a configuration may set.
const MAX_RISK_CEILING: Decimal = dec!(0.03);

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub risk: RiskSettings,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub styles: StyleTable,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "swing-screener".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Daily-rolled log file, in addition to stdout
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Capital and sizing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    pub capital: Decimal,
    /// Fraction of capital risked per trade (0.01 = 1%)
    pub risk_fraction: Decimal,
    /// Ceiling for `risk_fraction`
    pub max_risk_fraction: Decimal,
    pub style: Style,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            capital: dec!(10000),
            risk_fraction: dec!(0.01),
            max_risk_fraction: dec!(0.03),
            style: Style::Normal,
        }
    }
}

/// Where scans read from and write to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub data_dir: PathBuf,
    pub universe_file: PathBuf,
    pub log_dir: PathBuf,
    /// Scan only the first N symbols of the universe
    pub top_n: Option<usize>,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            universe_file: PathBuf::from("stocks_list.csv"),
            log_dir: PathBuf::from("logs"),
            top_n: None,
        }
    }
}

impl AppConfig {
    /// Profile of the configured style.
    pub fn active_profile(&self) -> &StyleProfile {
        self.styles.profile(self.risk.style)
    }

    /// Every rule violation, empty when the configuration is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let risk = &self.risk;

        if risk.capital <= Decimal::ZERO {
            errors.push("Capital must be greater than 0".to_string());
        }

        if risk.max_risk_fraction <= Decimal::ZERO || risk.max_risk_fraction > MAX_RISK_CEILING {
            errors.push(format!(
                "max_risk_fraction must be between 0 and {}%",
                (MAX_RISK_CEILING * dec!(100)).normalize()
            ));
        }

        if risk.risk_fraction <= Decimal::ZERO || risk.risk_fraction > risk.max_risk_fraction {
            errors.push(format!(
                "Risk fraction should be between 0 and {}%",
                (risk.max_risk_fraction * dec!(100)).normalize()
            ));
        }

        if self.scan.top_n == Some(0) {
            errors.push("top_n must be a positive integer or unset".to_string());
        }

        for (style, profile) in self.styles.iter() {
            let in_range = |v: f64| (0.0..=100.0).contains(&v);
            if !in_range(profile.rsi_low) || !in_range(profile.rsi_high) {
                errors.push(format!("RSI band for {} must lie within 0-100", style));
            }
            if profile.rsi_low >= profile.rsi_high {
                errors.push(format!("Invalid RSI band for {}: low >= high", style));
            }
            if profile.reward_ratio < MIN_REWARD_RATIO {
                errors.push(format!(
                    "RR too low for {} (must be >= {})",
                    style, MIN_REWARD_RATIO
                ));
            }
            if profile.stop_pct <= Decimal::ZERO || profile.stop_pct >= Decimal::ONE {
                errors.push(format!("Stop percent for {} must be between 0 and 1", style));
            }
        }

        errors
    }

    /// Fail with every violation when the configuration is not usable.
    pub fn ensure_valid(&self) -> Result<(), SettingsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Invalid(errors))
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
