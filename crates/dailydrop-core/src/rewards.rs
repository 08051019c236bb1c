//! Deterministic weekly reward generation.
//!
//! A week's rewards are either taken verbatim from static configuration or
//! derived from the stored rotation seed with a linear congruential
//! recurrence. The recurrence is part of the persisted-state contract: the
//! same seed must always reproduce the same week, so the sequence never needs
//! to be stored redundantly and old weeks stay auditable.

use crate::storage::config::DailyConfig;

/// Number of day slots in one reward cycle.
pub const CYCLE_DAYS: usize = 7;

// Numerical Recipes LCG constants.
const LCG_MULTIPLIER: u64 = 1_664_525;
const LCG_INCREMENT: u64 = 1_013_904_223;
const LCG_MODULUS: u64 = 1 << 32;
// The seed is folded into this space before the recurrence starts, so any
// two seeds congruent mod 10^6 generate the same week.
const SEED_SPACE: u64 = 1_000_000;

/// Generate the 7-element reward sequence for `seed`.
///
/// Static mode: when the config carries an explicit 7-element reward list it
/// is returned unchanged and the seed is ignored. Otherwise each value is
/// scaled into `[min_coins, max_coins]` from the next LCG state. Pure
/// function: identical inputs always produce identical output.
pub fn weekly_rewards(seed: u64, config: &DailyConfig) -> [u32; CYCLE_DAYS] {
    if let Some(fixed) = config.static_rewards() {
        return fixed;
    }

    let min = u64::from(config.min_coins);
    let max = u64::from(config.max_coins);
    let span = (max.saturating_sub(min) + 1) as f64;

    let mut out = [0u32; CYCLE_DAYS];
    let mut r = seed % SEED_SPACE;
    for slot in &mut out {
        r = (r * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        let scaled = (r as f64 / LCG_MODULUS as f64) * span;
        *slot = (min + scaled as u64) as u32;
    }
    out
}

/// Reward used when a persisted reward array is missing or malformed: the
/// midpoint of the configured bounds.
pub fn fallback_reward(config: &DailyConfig) -> u32 {
    (config.min_coins + config.max_coins) / 2
}
