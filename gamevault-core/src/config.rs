//! Tunable storefront constants loaded from JSON.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_JSON: &str = include_str!("../../gamevault-web/static/data/config.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Storefront and simulator tuning.
/// All fields fall back to their defaults when missing from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Milliseconds between two install ticks
    pub install_tick_ms: u32,
    /// Lower bound (inclusive) of the per-tick progress increment
    pub install_step_min: f64,
    /// Upper bound (exclusive) of the per-tick progress increment
    pub install_step_max: f64,
    /// Simulated payment processing time
    pub checkout_delay_ms: u32,
    pub items_per_page: usize,
    /// Catalog id given away for free this week
    pub free_game_id: u32,
    /// Ids divisible by this value are on sale
    pub sale_modulus: u32,
    /// Multiplier applied to sale prices before flooring
    pub sale_multiplier: f64,
    /// Weight of the catalog baseline when blending in a user vote
    pub rating_blend_weight: f64,
    /// Release-date fragments that mark a game as not yet released
    pub unreleased_years: Vec<String>,
    /// Release-date fragments listed under "new releases"
    pub new_release_years: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            install_tick_ms: 500,
            install_step_min: 5.0,
            install_step_max: 20.0,
            checkout_delay_ms: 2000,
            items_per_page: 8,
            free_game_id: 28,
            sale_modulus: 3,
            sale_multiplier: 0.8,
            rating_blend_weight: 50.0,
            unreleased_years: vec!["2026".to_string(), "2027".to_string()],
            new_release_years: vec!["2023".to_string(), "2024".to_string(), "2025".to_string()],
        }
    }
}

impl StoreConfig {
    /// Parse and validate a config document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or describes an unusable config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Config bundled with the web assets, falling back to built-in defaults.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(DEFAULT_CONFIG_JSON).unwrap_or_else(|err| {
            log::warn!("bundled store config rejected, using defaults: {err}");
            Self::default()
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.install_step_min > 0.0 && self.install_step_min < self.install_step_max) {
            return Err(ConfigError::Invalid(format!(
                "install step range {}..{} must be positive and non-empty",
                self.install_step_min, self.install_step_max
            )));
        }
        if self.items_per_page == 0 {
            return Err(ConfigError::Invalid("items_per_page must be > 0".into()));
        }
        if self.sale_modulus == 0 {
            return Err(ConfigError::Invalid("sale_modulus must be > 0".into()));
        }
        if self.install_tick_ms == 0 {
            return Err(ConfigError::Invalid("install_tick_ms must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_matches_defaults() {
        assert_eq!(StoreConfig::default_config(), StoreConfig::default());
    }

    #[test]
    fn partial_json_fills_missing_fields() {
        let cfg = StoreConfig::from_json(r#"{ "items_per_page": 12 }"#).unwrap();
        assert_eq!(cfg.items_per_page, 12);
        assert_eq!(cfg.install_tick_ms, 500);
        assert_eq!(cfg.free_game_id, 28);
    }

    #[test]
    fn rejects_empty_step_range() {
        let err = StoreConfig::from_json(r#"{ "install_step_min": 20.0, "install_step_max": 5.0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(StoreConfig::from_json("{ nope").is_err());
    }
}
