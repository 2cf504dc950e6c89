//! Trading styles and their parameter bundles.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Risk/aggressiveness profile selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    Conservative,
    #[default]
    Normal,
    Aggressive,
}

/// Style name that matched none of the known styles.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown style '{0}', expected CONSERVATIVE, NORMAL or AGGRESSIVE")]
pub struct UnknownStyle(pub String);

impl Style {
    pub const ALL: [Style; 3] = [Style::Conservative, Style::Normal, Style::Aggressive];

    /// Upper-case name used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Conservative => "CONSERVATIVE",
            Style::Normal => "NORMAL",
            Style::Aggressive => "AGGRESSIVE",
        }
    }

    /// Built-in parameters for this style.
    pub fn default_profile(&self) -> StyleProfile {
        match self {
            Style::Conservative => StyleProfile {
                rsi_low: 40.0,
                rsi_high: 55.0,
                reward_ratio: dec!(2.0),
                stop_pct: dec!(0.03),
                holding_label: "5–10 days".to_string(),
            },
            Style::Normal => StyleProfile {
                rsi_low: 35.0,
                rsi_high: 65.0,
                reward_ratio: dec!(2.5),
                stop_pct: dec!(0.02),
                holding_label: "3–7 days".to_string(),
            },
            Style::Aggressive => StyleProfile {
                rsi_low: 30.0,
                rsi_high: 70.0,
                reward_ratio: dec!(3.0),
                stop_pct: dec!(0.015),
                holding_label: "1–3 days".to_string(),
            },
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Style {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONSERVATIVE" => Ok(Style::Conservative),
            "NORMAL" => Ok(Style::Normal),
            "AGGRESSIVE" => Ok(Style::Aggressive),
            _ => Err(UnknownStyle(s.to_string())),
        }
    }
}

// Case-insensitive so config files may say "normal" or "NORMAL".
impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Parameter bundle carried by a style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    /// Lower bound of the RSI acceptance band (inclusive)
    pub rsi_low: f64,
    /// Upper bound of the RSI acceptance band (inclusive)
    pub rsi_high: f64,
    /// Reward:risk multiple for targets
    pub reward_ratio: Decimal,
    /// Live stop distance as a fraction of entry
    pub stop_pct: Decimal,
    /// Qualitative holding period
    pub holding_label: String,
}

impl StyleProfile {
    /// Check whether an RSI reading falls inside the band.
    #[inline]
    pub fn rsi_in_band(&self, rsi: f64) -> bool {
        rsi >= self.rsi_low && rsi <= self.rsi_high
    }
}

/// One profile per style.
///
/// Every style is a field, so a lookup can never miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTable {
    pub conservative: StyleProfile,
    pub normal: StyleProfile,
    pub aggressive: StyleProfile,
}

impl StyleTable {
    /// Get the profile for a style.
    pub fn profile(&self, style: Style) -> &StyleProfile {
        match style {
            Style::Conservative => &self.conservative,
            Style::Normal => &self.normal,
            Style::Aggressive => &self.aggressive,
        }
    }

    /// Iterate over (style, profile) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Style, &StyleProfile)> {
        Style::ALL.into_iter().map(move |s| (s, self.profile(s)))
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            conservative: Style::Conservative.default_profile(),
            normal: Style::Normal.default_profile(),
            aggressive: Style::Aggressive.default_profile(),
        }
    }
}
