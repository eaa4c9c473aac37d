//! Tunable game rules.
//!
//! Defaults reproduce the classic balance. A partial JSON override can be
//! stored in localStorage under [`STORAGE_KEY`]; any field left out keeps
//! its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::Rarity;

/// localStorage key for a JSON config override.
#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "pixel_math_config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Relative shop weights per rarity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RarityWeights {
    pub common: u32,
    pub rare: u32,
    pub epic: u32,
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self {
            common: 70,
            rare: 25,
            epic: 5,
        }
    }
}

impl RarityWeights {
    pub fn weight(&self, rarity: Rarity) -> u32 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Epic => self.epic,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub start_lives: u32,
    /// The shop opens whenever the round number is a multiple of this.
    pub rounds_before_shop: u32,
    pub max_inventory: usize,
    pub start_time_ms: u32,
    pub min_time_ms: u32,
    /// Upper clamp for AddTime bonuses.
    pub max_time_ms: u32,
    pub time_decrease_after_shop: u32,
    pub base_point: u32,
    pub rarity_weights: RarityWeights,
    /// Countdown granularity.
    pub tick_ms: u32,
    /// Pause between a resolved round and the next problem.
    pub feedback_delay_ms: u32,
    pub add_time_bonus_ms: u32,
    /// Fraction of the paid price returned on sale.
    pub sell_ratio: f64,
    pub min_offer_price: u32,
    /// Offer prices are `base * U[low, high)`.
    pub price_jitter_low: f64,
    pub price_jitter_high: f64,
    pub max_offers: usize,
    pub log_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_lives: 3,
            rounds_before_shop: 5,
            max_inventory: 3,
            start_time_ms: 3000,
            min_time_ms: 1000,
            max_time_ms: 10_000,
            time_decrease_after_shop: 200,
            base_point: 10,
            rarity_weights: RarityWeights::default(),
            tick_ms: 50,
            feedback_delay_ms: 150,
            add_time_bonus_ms: 500,
            sell_ratio: 0.5,
            min_offer_price: 10,
            price_jitter_low: 0.9,
            price_jitter_high: 1.3,
            max_offers: 3,
            log_capacity: 30,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.start_lives == 0 {
            return invalid("start_lives must be at least 1");
        }
        if self.rounds_before_shop == 0 {
            return invalid("rounds_before_shop must be at least 1");
        }
        if self.tick_ms == 0 {
            return invalid("tick_ms must be positive");
        }
        if self.min_time_ms == 0 || self.min_time_ms > self.start_time_ms {
            return invalid("min_time_ms must be in 1..=start_time_ms");
        }
        if self.max_time_ms < self.start_time_ms {
            return invalid("max_time_ms must be >= start_time_ms");
        }
        if self.add_time_bonus_ms > self.max_time_ms {
            return invalid("add_time_bonus_ms must not exceed max_time_ms");
        }
        if !(self.price_jitter_low > 0.0 && self.price_jitter_low < self.price_jitter_high) {
            return invalid("price jitter range is empty");
        }
        if !(0.0..=1.0).contains(&self.sell_ratio) {
            return invalid("sell_ratio must be within 0..=1");
        }
        if self.max_offers == 0 {
            return invalid("max_offers must be at least 1");
        }
        let w = self.rarity_weights;
        if w.common == 0 && w.rare == 0 && w.epic == 0 {
            return invalid("at least one rarity weight must be positive");
        }
        Ok(())
    }

    /// Load the override from localStorage, falling back to defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config override from {}", STORAGE_KEY);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring config override: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
