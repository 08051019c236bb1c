//! Persisted daily reward state.

use serde::{Deserialize, Serialize};

use crate::clock::LocalDay;
use crate::rewards;
use crate::storage::config::DailyConfig;

/// The one record the daily reward system persists per player.
///
/// Every field is serde-defaulted so partial blobs from older versions still
/// parse; a blob that does not parse at all is replaced with
/// [`DailyRewardState::fresh`] at the storage-read boundary, never inside
/// the state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRewardState {
    /// Local calendar day of the most recent successful claim; `None`
    /// before the first claim. Once set to day D, no further claim mutates
    /// state until the observed day advances past D.
    #[serde(default)]
    pub last_claim_day: Option<LocalDay>,
    /// Consecutive qualifying days claimed, 0..=7. Zero means no active
    /// streak, either never started or just reset.
    #[serde(default)]
    pub streak: u8,
    /// Reward amount for each day-index 1..7 of the current cycle.
    #[serde(default)]
    pub active_rewards: Vec<u32>,
    /// Seed the current `active_rewards` were generated from. Only ever
    /// increases; bumped exactly once per completed cycle.
    #[serde(default)]
    pub rotation_seed: u64,
}

impl DailyRewardState {
    /// Fresh state for a player with no history: no claim, no streak, a
    /// newly generated week.
    pub fn fresh(seed: u64, config: &DailyConfig) -> Self {
        Self {
            last_claim_day: None,
            streak: 0,
            active_rewards: rewards::weekly_rewards(seed, config).to_vec(),
            rotation_seed: seed,
        }
    }
}
