//! # DailyDrop Core Library
//!
//! Core business logic for the DailyDrop daily-reward system: one
//! time-gated reward per calendar day, consecutive-day streaks, and a
//! deterministically rotated 7-day reward cycle, plus the surrounding
//! meta-game economy (wallet, shop, challenges). All operations are
//! available via a standalone CLI binary; a game client would be a thin
//! layer over this same library.
//!
//! ## Architecture
//!
//! - **Clock Adapter**: fixed-offset calendar arithmetic; the claim window
//!   opens at local midday, not midnight
//! - **Reward Generator**: pure seed-to-week function, so a stored seed
//!   alone reproduces any cycle's rewards
//! - **Daily Engine**: the streak state machine, pure over an explicit
//!   state value; storage and the coin ledger are touched only by the
//!   service wrapper
//! - **Storage**: SQLite kv blobs and claim history, TOML configuration
//!
//! ## Key Components
//!
//! - [`DailyEngine`]: eligibility and claim transitions
//! - [`DailyRewardService`]: the storage/ledger-facing surface
//! - [`PlayerStore`]: player wallet, the shipped [`CoinLedger`]
//! - [`GameConfig`]: validated configuration

pub mod challenges;
pub mod clock;
pub mod daily;
pub mod economy;
pub mod error;
pub mod ledger;
pub mod rewards;
pub mod shop;
pub mod storage;

pub use challenges::{Challenge, ChallengeBook, ChallengePeriod, ChallengeStore};
pub use clock::{GameClock, LocalDay};
pub use daily::{ClaimResult, DailyEngine, DailyRewardService, DailyRewardState, DailyStatus};
pub use economy::{PlayerProfile, PlayerStore};
pub use error::{ConfigError, CoreError, LedgerError, StorageError};
pub use ledger::CoinLedger;
pub use storage::{Database, GameConfig};
