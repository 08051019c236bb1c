//! Player wallet and profile.
//!
//! One JSON blob in the kv store per player. All fields are serde-defaulted
//! so partially written blobs from older versions still parse; a blob that
//! does not parse at all falls back to the starting profile at the read
//! boundary.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, StorageError};
use crate::ledger::CoinLedger;
use crate::storage::Database;

/// Key of the player profile blob in the kv store.
pub const PLAYER_PROFILE_KEY: &str = "player_profile";

/// Lifetime gameplay counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameStats {
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub best_score: u64,
    #[serde(default)]
    pub merges: u64,
}

/// The player's persisted economy profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_starting_coins")]
    pub coins: u64,
    #[serde(default)]
    pub diamonds: u64,
    #[serde(default)]
    pub boosters: u32,
    #[serde(default)]
    pub extra_moves: u32,
    #[serde(default)]
    pub purchased_items: Vec<String>,
    /// Slot -> item id.
    #[serde(default)]
    pub equipped_items: HashMap<String, String>,
    #[serde(default)]
    pub stats: PlayerGameStats,
}

fn default_display_name() -> String {
    "Player".to_string()
}
fn default_starting_coins() -> u64 {
    1500
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            coins: default_starting_coins(),
            diamonds: 0,
            boosters: 0,
            extra_moves: 0,
            purchased_items: Vec::new(),
            equipped_items: HashMap::new(),
            stats: PlayerGameStats::default(),
        }
    }
}

/// Kv-backed store for the player profile. Implements [`CoinLedger`] for
/// the claim paths.
pub struct PlayerStore<'a> {
    db: &'a Database,
}

impl<'a> PlayerStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Load the profile; an unparsable blob recovers to the starting
    /// profile, a missing blob is the starting profile.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn profile(&self) -> Result<PlayerProfile, StorageError> {
        match self.db.kv_get(PLAYER_PROFILE_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("player profile blob unparsable, using defaults: {e}");
                PlayerProfile::default()
            })),
            None => Ok(PlayerProfile::default()),
        }
    }

    /// Persist the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the kv write fails.
    pub fn save(&self, profile: &PlayerProfile) -> Result<(), StorageError> {
        let json = serde_json::to_string(profile)
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.db.kv_set(PLAYER_PROFILE_KEY, &json)
    }

    /// Add coins and return the updated balance.
    pub fn credit_coins(&self, amount: u64) -> Result<u64, LedgerError> {
        let mut profile = self.profile().map_err(store_failed)?;
        profile.coins = profile.coins.saturating_add(amount);
        self.save(&profile).map_err(store_failed)?;
        Ok(profile.coins)
    }

    /// Remove coins; refuses when the balance cannot cover the debit.
    pub fn debit_coins(&self, amount: u64) -> Result<u64, LedgerError> {
        let mut profile = self.profile().map_err(store_failed)?;
        if profile.coins < amount {
            return Err(LedgerError::InsufficientCoins {
                balance: profile.coins,
                needed: amount,
            });
        }
        profile.coins -= amount;
        self.save(&profile).map_err(store_failed)?;
        Ok(profile.coins)
    }

    /// Fold one finished game into the lifetime counters.
    ///
    /// # Errors
    ///
    /// Returns an error on storage failure.
    pub fn record_game(&self, score: u64, merges: u64) -> Result<PlayerGameStats, StorageError> {
        let mut profile = self.profile()?;
        profile.stats.games_played += 1;
        profile.stats.best_score = profile.stats.best_score.max(score);
        profile.stats.merges += merges;
        self.save(&profile)?;
        Ok(profile.stats)
    }
}

fn store_failed(e: StorageError) -> LedgerError {
    LedgerError::StoreFailed(e.to_string())
}

impl CoinLedger for PlayerStore<'_> {
    fn balance(&self) -> Result<u64, LedgerError> {
        Ok(self.profile().map_err(store_failed)?.coins)
    }

    fn credit(&mut self, amount: u64) -> Result<u64, LedgerError> {
        self.credit_coins(amount)
    }
}
