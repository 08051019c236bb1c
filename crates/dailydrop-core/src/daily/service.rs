//! Storage- and ledger-facing surface of the daily reward system.
//!
//! Everything impure lives here: the state blob read (with its
//! default-state fallback), the coin credit, the state write, and the
//! claim-history row. The state machine itself never sees any of it.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ledger::CoinLedger;
use crate::storage::config::DailyConfig;
use crate::storage::Database;

use super::machine::{ClaimDecision, DailyEngine, DailyStatus};
use super::state::DailyRewardState;

/// Key of the daily reward state blob in the kv store.
pub const DAILY_STATE_KEY: &str = "daily_reward_state";

/// What a successful claim returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimResult {
    pub coins: u32,
    pub day_index: u8,
    /// Pre-reset streak: the 7th claim reports 7.
    pub streak: u8,
    pub active_rewards: Vec<u32>,
    /// Coin balance after the credit.
    pub balance: u64,
}

/// Daily reward operations over a database and a coin ledger.
pub struct DailyRewardService<'a> {
    db: &'a Database,
    engine: DailyEngine,
}

impl<'a> DailyRewardService<'a> {
    pub fn new(db: &'a Database, config: DailyConfig) -> Self {
        Self {
            db,
            engine: DailyEngine::new(config),
        }
    }

    /// Load the persisted state, creating it lazily on first read.
    ///
    /// An unparsable blob recovers to a fresh state seeded from `now`; the
    /// fallback lives here at the read boundary, never in the machine.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn load_state(&self, now: DateTime<Utc>) -> Result<DailyRewardState> {
        let state = match self.db.kv_get(DAILY_STATE_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("daily reward state unparsable, starting fresh: {e}");
                self.fresh_state(now)
            }),
            None => self.fresh_state(now),
        };
        Ok(state)
    }

    fn fresh_state(&self, now: DateTime<Utc>) -> DailyRewardState {
        DailyRewardState::fresh(now.timestamp_millis() as u64, self.engine.config())
    }

    /// Status query. Read-only.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure.
    pub fn status(&self, now: DateTime<Utc>) -> Result<DailyStatus> {
        let state = self.load_state(now)?;
        Ok(self.engine.status(&state, now))
    }

    /// Attempt a claim. `None` is a benign refusal (window not open, or
    /// already claimed today); the caller distinguishes the two by
    /// re-querying [`Self::status`].
    ///
    /// The ledger credit runs before the state write, so a failed credit
    /// leaves the day unclaimed.
    ///
    /// # Errors
    ///
    /// Returns an error on storage or ledger failure.
    pub fn claim(
        &self,
        now: DateTime<Utc>,
        ledger: &mut dyn CoinLedger,
    ) -> Result<Option<ClaimResult>> {
        let state = self.load_state(now)?;
        match self.engine.claim(&state, now) {
            ClaimDecision::Granted { grant, state: next } => {
                let balance = ledger.credit(u64::from(grant.coins))?;
                self.db.kv_set(DAILY_STATE_KEY, &serde_json::to_string(&next)?)?;
                if let Some(day) = next.last_claim_day {
                    self.db
                        .record_claim(day, grant.day_index, grant.streak, grant.coins, now)?;
                }
                debug!(
                    "daily claim granted: day {} of cycle, {} coins",
                    grant.day_index, grant.coins
                );
                Ok(Some(ClaimResult {
                    coins: grant.coins,
                    day_index: grant.day_index,
                    streak: grant.streak,
                    active_rewards: grant.active_rewards,
                    balance,
                }))
            }
            ClaimDecision::NotYetOpen => {
                debug!("daily claim refused: window not open yet");
                Ok(None)
            }
            ClaimDecision::AlreadyClaimed => {
                debug!("daily claim refused: already claimed today");
                Ok(None)
            }
        }
    }
}
