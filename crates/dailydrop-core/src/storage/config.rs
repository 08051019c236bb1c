//! TOML-based game configuration.
//!
//! Covers:
//! - Daily reward bounds, the optional static reward override, and the
//!   fixed clock offset
//! - Shop item prices and donation bundles
//! - Challenge definitions
//!
//! Configuration is stored at `<data_dir>/config.toml` and validated once at
//! startup; the rest of the crate only ever sees a well-formed struct.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::data_dir;
use crate::challenges::{ChallengePeriod, ChallengeSeed};
use crate::clock::GameClock;
use crate::error::ConfigError;
use crate::rewards::CYCLE_DAYS;

/// Daily reward configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyConfig {
    #[serde(default = "default_min_coins")]
    pub min_coins: u32,
    #[serde(default = "default_max_coins")]
    pub max_coins: u32,
    /// Fixed UTC offset of the game calendar, in whole hours (no DST).
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    /// Optional static 7-element reward override. When set, the generator
    /// returns it verbatim and the rotation seed is ignored.
    #[serde(default)]
    pub rewards: Option<Vec<u32>>,
}

impl DailyConfig {
    /// The static reward override as a fixed-size week, when configured and
    /// well-formed.
    pub fn static_rewards(&self) -> Option<[u32; CYCLE_DAYS]> {
        self.rewards
            .as_ref()
            .and_then(|r| <[u32; CYCLE_DAYS]>::try_from(r.as_slice()).ok())
    }

    /// Clock for the configured offset. Validation keeps the offset in
    /// range, so the UTC fallback is unreachable in practice.
    pub fn clock(&self) -> GameClock {
        GameClock::from_east_hours(self.utc_offset_hours).unwrap_or_else(GameClock::utc)
    }
}

/// Shop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Item id -> price in coins.
    #[serde(default = "default_item_prices")]
    pub item_prices: HashMap<String, u64>,
    /// Coin bundles accepted by the donation flow.
    #[serde(default = "default_donation_amounts")]
    pub donation_amounts: Vec<u64>,
}

/// Game configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub daily: DailyConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default = "default_challenges")]
    pub challenges: Vec<ChallengeSeed>,
}

// Default functions
fn default_min_coins() -> u32 {
    50
}
fn default_max_coins() -> u32 {
    300
}
fn default_utc_offset_hours() -> i32 {
    5
}
fn default_item_prices() -> HashMap<String, u64> {
    HashMap::from([
        ("theme_dark".to_string(), 500),
        ("booster_pack".to_string(), 250),
        ("avatar_frame".to_string(), 800),
    ])
}
fn default_donation_amounts() -> Vec<u64> {
    vec![500, 1200, 2600]
}
fn default_challenges() -> Vec<ChallengeSeed> {
    vec![
        ChallengeSeed {
            id: "daily_merge_5".to_string(),
            title: "Make 5 merges".to_string(),
            description: String::new(),
            goal: 5,
            reward_coins: 100,
            period: ChallengePeriod::Daily,
        },
        ChallengeSeed {
            id: "daily_score_500".to_string(),
            title: "Score 500 points".to_string(),
            description: String::new(),
            goal: 500,
            reward_coins: 150,
            period: ChallengePeriod::Daily,
        },
    ]
}

impl Default for DailyConfig {
    fn default() -> Self {
        Self {
            min_coins: default_min_coins(),
            max_coins: default_max_coins(),
            utc_offset_hours: default_utc_offset_hours(),
            rewards: None,
        }
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            item_prices: default_item_prices(),
            donation_amounts: default_donation_amounts(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            daily: DailyConfig::default(),
            shop: ShopConfig::default(),
            challenges: default_challenges(),
        }
    }
}

impl GameConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("."),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk or write out the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, if
    /// it fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        let cfg = match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str::<GameConfig>(&content).map_err(|e| ConfigError::LoadFailed {
                    path,
                    message: e.to_string(),
                })?
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                cfg
            }
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Check every configured value once, before anything is built from it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily.min_coins == 0 {
            return Err(ConfigError::InvalidValue {
                key: "daily.min_coins".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.daily.max_coins < self.daily.min_coins {
            return Err(ConfigError::InvalidValue {
                key: "daily.max_coins".to_string(),
                message: format!("must be >= min_coins ({})", self.daily.min_coins),
            });
        }
        if !(-12..=14).contains(&self.daily.utc_offset_hours) {
            return Err(ConfigError::InvalidValue {
                key: "daily.utc_offset_hours".to_string(),
                message: "must be between -12 and 14".to_string(),
            });
        }
        if let Some(rewards) = &self.daily.rewards {
            if rewards.len() != CYCLE_DAYS {
                return Err(ConfigError::InvalidValue {
                    key: "daily.rewards".to_string(),
                    message: format!("must have exactly {CYCLE_DAYS} entries, got {}", rewards.len()),
                });
            }
            if rewards.iter().any(|&r| r == 0) {
                return Err(ConfigError::InvalidValue {
                    key: "daily.rewards".to_string(),
                    message: "entries must be positive integers".to_string(),
                });
            }
        }
        for challenge in &self.challenges {
            if challenge.goal == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("challenges.{}.goal", challenge.id),
                    message: "must be a positive integer".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// the resulting config fails validation, or the save fails.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: GameConfig =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        self.save()?;
        Ok(())
    }

    fn json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }
        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(ConfigError::ParseFailed(format!(
                                "cannot parse '{value}' as number"
                            )));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }
}
