//! Daily reward engine.
//!
//! Split the way the rest of the crate is: a serde state blob
//! ([`DailyRewardState`]), a pure state machine over it ([`DailyEngine`]),
//! and a thin service ([`DailyRewardService`]) that is the only place
//! touching storage and the coin ledger.

mod machine;
mod service;
mod state;

pub use machine::{ClaimDecision, ClaimGrant, DailyEngine, DailyStatus, MAX_STREAK};
pub use service::{ClaimResult, DailyRewardService, DAILY_STATE_KEY};
pub use state::DailyRewardState;
