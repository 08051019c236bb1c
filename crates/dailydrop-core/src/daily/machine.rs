//! The streak state machine.
//!
//! Pure functions over an explicit [`DailyRewardState`] value: `status`
//! inspects, `claim` returns a decision plus the successor state. Nothing
//! here touches storage or the ledger; every transition is a function of a
//! state value and an instant.
//!
//! ## Derived states
//!
//! ```text
//! NoPriorClaim ──claim──> ClaimedToday ──day advances──> WindowNotYetOpen
//!                              ^                               │
//!                              │                        window opens
//!                              └──claim── ClaimWindowOpenUnclaimed
//! ```
//!
//! These are never stored; they fall out of comparing `now` against the
//! window-open instant and `last_claim_day` against today.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::GameClock;
use crate::rewards;
use crate::storage::config::DailyConfig;

use super::state::DailyRewardState;

/// Streak cap; day-index of the last slot in a cycle.
pub const MAX_STREAK: u8 = rewards::CYCLE_DAYS as u8;

/// Read-only view returned by the status query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStatus {
    /// Whether a claim right now would grant.
    pub available: bool,
    /// When the reward can (next) be claimed; `now` itself when available.
    pub next_open: DateTime<Utc>,
    pub streak: u8,
    /// 1-based day-index the next successful claim would land on; lets the
    /// caller preview the reward value without mutating anything.
    pub upcoming_day_index: u8,
    pub active_rewards: Vec<u32>,
}

/// What a successful claim granted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimGrant {
    pub coins: u32,
    /// 1-based slot in the reward week this claim consumed.
    pub day_index: u8,
    /// Streak as reported to the caller: the pre-reset value, so the 7th
    /// claim says 7 even though the stored streak restarts at 0.
    pub streak: u8,
    /// The week after this claim, rotated when the claim completed a cycle.
    pub active_rewards: Vec<u32>,
}

/// Result of a claim attempt. The two refusals are expected outcomes the
/// caller polls for via [`DailyEngine::status`], never errors.
#[derive(Debug, Clone)]
pub enum ClaimDecision {
    /// Claim granted; `state` is the successor to persist.
    Granted {
        grant: ClaimGrant,
        state: DailyRewardState,
    },
    /// Today's window has not opened yet.
    NotYetOpen,
    /// A claim already succeeded on this local day.
    AlreadyClaimed,
}

/// The daily reward state machine.
#[derive(Debug, Clone)]
pub struct DailyEngine {
    clock: GameClock,
    config: DailyConfig,
}

impl DailyEngine {
    /// Build the engine from validated configuration.
    pub fn new(config: DailyConfig) -> Self {
        Self {
            clock: config.clock(),
            config,
        }
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub(crate) fn config(&self) -> &DailyConfig {
        &self.config
    }

    /// Status query. No side effects.
    pub fn status(&self, state: &DailyRewardState, now: DateTime<Utc>) -> DailyStatus {
        let today = self.clock.local_day(now);
        let window_open = self.clock.window_open_instant(today);
        let available = now >= window_open && state.last_claim_day != Some(today);
        let next_open = if available {
            now
        } else {
            self.clock.next_window_open(now)
        };
        let upcoming_day_index = state
            .streak
            .saturating_add(u8::from(available))
            .min(MAX_STREAK);

        DailyStatus {
            available,
            next_open,
            streak: state.streak,
            upcoming_day_index,
            active_rewards: state.active_rewards.clone(),
        }
    }

    /// The claim transition.
    ///
    /// Eligibility: today's window must be open and no claim may have
    /// succeeded today. The streak continues only when the previous claim
    /// was exactly one local calendar day ago (computed by day-count, so
    /// variable-length months are handled); any other gap restarts at day
    /// 1. Completing day 7 bumps the rotation seed, regenerates the week,
    /// and restarts the stored streak at 0 while still reporting 7 to the
    /// caller.
    pub fn claim(&self, state: &DailyRewardState, now: DateTime<Utc>) -> ClaimDecision {
        let today = self.clock.local_day(now);
        if now < self.clock.window_open_instant(today) {
            return ClaimDecision::NotYetOpen;
        }
        if state.last_claim_day == Some(today) {
            return ClaimDecision::AlreadyClaimed;
        }

        let new_streak = match &state.last_claim_day {
            Some(last) if today.days_since(last) == 1 => {
                state.streak.saturating_add(1).min(MAX_STREAK)
            }
            Some(_) => 1,
            None => 1,
        };

        let coins = state
            .active_rewards
            .get(usize::from(new_streak - 1))
            .copied()
            .unwrap_or_else(|| rewards::fallback_reward(&self.config));

        let mut next = state.clone();
        next.last_claim_day = Some(today);
        next.streak = new_streak;
        if new_streak == MAX_STREAK {
            // Cycle complete: rotate the week from the bumped seed.
            next.rotation_seed = state.rotation_seed + 1;
            next.active_rewards = rewards::weekly_rewards(next.rotation_seed, &self.config).to_vec();
            // Stored streak restarts; tomorrow's claim is day 1 of the new
            // cycle. last_claim_day stays at today, so a same-day retry is
            // still refused.
            next.streak = 0;
        }

        let grant = ClaimGrant {
            coins,
            day_index: new_streak,
            streak: new_streak,
            active_rewards: next.active_rewards.clone(),
        };
        ClaimDecision::Granted { grant, state: next }
    }
}
