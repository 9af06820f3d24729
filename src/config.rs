//! Wheel configuration.
//!
//! Everything has a default matching the stock reward wheel, so an empty JSON
//! object `{}` is a complete config.

use serde::{Deserialize, Serialize};

use crate::animator::DEFAULT_SPIN_DURATION_MS;
use crate::celebration::CelebrationPolicy;
use crate::error::WheelError;
use crate::rotation::DEFAULT_EXTRA_TURNS;
use crate::types::{WeightedOption, WheelOptions};

/// Stock slice colors, cycled when options are generated.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#cc9933", // gold
    "#ffffff", // white
    "#4a6d5c", // green
    "#b3862b", // dark gold
    "#e5e7eb", // platinum
    "#1e332a", // dark green
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpinConfig {
    pub duration_ms: f64,
    /// Full turns added on top of the landing displacement. Must be at least 1.
    pub extra_turns: u32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_SPIN_DURATION_MS,
            extra_turns: DEFAULT_EXTRA_TURNS,
        }
    }
}

impl SpinConfig {
    pub fn validate(&self) -> Result<(), WheelError> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(WheelError::InvalidConfig(format!(
                "durationMs must be positive, got {}",
                self.duration_ms
            )));
        }
        if self.extra_turns < 1 {
            return Err(WheelError::InvalidConfig("extraTurns must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WheelConfig {
    pub spin: SpinConfig,
    pub options: Vec<WeightedOption>,
    pub palette: Vec<String>,
    pub celebration: CelebrationPolicy,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin: SpinConfig::default(),
            options: default_options(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            celebration: CelebrationPolicy::default(),
        }
    }
}

impl WheelConfig {
    pub fn from_json(text: &str) -> Result<Self, WheelError> {
        let config: WheelConfig =
            serde_json::from_str(text).map_err(|e| WheelError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WheelError> {
        self.spin.validate()?;
        if self.palette.is_empty() {
            return Err(WheelError::InvalidConfig("palette must not be empty".to_string()));
        }
        WheelOptions::new(self.options.clone())?;
        Ok(())
    }

    /// Validated copy of the configured option list.
    pub fn wheel_options(&self) -> Result<WheelOptions, WheelError> {
        WheelOptions::new(self.options.clone())
    }
}

/// The stock reward list.
pub fn default_options() -> Vec<WeightedOption> {
    let p = DEFAULT_PALETTE;
    vec![
        WeightedOption::new("1", "50% DISCOUNT", p[0], 4.0),
        WeightedOption::new("2", "20% DISCOUNT", p[1], 7.0),
        WeightedOption::new("3", "BETTER LUCK NEXT TIME", p[2], 70.0),
        WeightedOption::new("4", "100% DISCOUNT", p[3], 2.0),
        WeightedOption::new("5", "100 RS CASHBACK", p[4], 3.0),
        WeightedOption::new("6", "50 RS CASHBACK", p[5], 14.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = WheelConfig::from_json("{}").unwrap();
        assert_eq!(config, WheelConfig::default());
        assert_eq!(config.spin.duration_ms, 5000.0);
        assert_eq!(config.spin.extra_turns, 8);
        assert_eq!(config.options.len(), 6);
    }

    #[test]
    fn test_default_weights_total_100() {
        let options = WheelConfig::default().wheel_options().unwrap();
        assert_eq!(options.total_weight(), 100.0);
    }

    #[test]
    fn test_partial_spin_override() {
        let config = WheelConfig::from_json(r#"{"spin":{"durationMs":1200}}"#).unwrap();
        assert_eq!(config.spin.duration_ms, 1200.0);
        assert_eq!(config.spin.extra_turns, 8);
    }

    #[test]
    fn test_rejects_zero_turns_and_bad_duration() {
        assert!(matches!(
            WheelConfig::from_json(r#"{"spin":{"extraTurns":0}}"#),
            Err(WheelError::InvalidConfig(_))
        ));
        assert!(matches!(
            WheelConfig::from_json(r#"{"spin":{"durationMs":-5}}"#),
            Err(WheelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_option_list() {
        let err = WheelConfig::from_json(
            r##"{"options":[{"id":"1","label":"only","color":"#fff","weight":1}]}"##,
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(WheelConfig::from_json("{"), Err(WheelError::InvalidConfig(_))));
    }
}
