//! Local challenge tracking.
//!
//! Challenges accumulate progress from gameplay events and pay out coins
//! through the same [`CoinLedger`] seam the daily reward uses. The whole
//! book is persisted as one kv blob; a missing or corrupt blob falls back to
//! the config-seeded defaults.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::clock::LocalDay;
use crate::error::{CoreError, StorageError};
use crate::ledger::CoinLedger;
use crate::storage::Database;

/// Key of the challenge book blob in the kv store.
pub const CHALLENGES_KEY: &str = "challenge_book";

/// How often a challenge can be claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengePeriod {
    Daily,
    Weekly,
    #[default]
    Oneoff,
}

/// A challenge definition as it appears in configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeSeed {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub goal: u64,
    pub reward_coins: u64,
    #[serde(default)]
    pub period: ChallengePeriod,
}

/// A challenge with its live progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub goal: u64,
    #[serde(default)]
    pub progress: u64,
    pub reward_coins: u64,
    #[serde(default)]
    pub completed: bool,
    /// Local day the reward was last claimed; gates repeat claims.
    #[serde(default)]
    pub claim_day: Option<LocalDay>,
    #[serde(default)]
    pub period: ChallengePeriod,
}

impl Challenge {
    fn from_seed(seed: &ChallengeSeed) -> Self {
        Self {
            id: seed.id.clone(),
            title: seed.title.clone(),
            description: seed.description.clone(),
            goal: seed.goal,
            progress: 0,
            reward_coins: seed.reward_coins,
            completed: false,
            claim_day: None,
            period: seed.period,
        }
    }
}

/// Outcome of a challenge claim attempt. Refusals are plain values, not
/// errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ChallengeClaimOutcome {
    Claimed { id: String, coins: u64, balance: u64 },
    NotCompleted { id: String },
    AlreadyClaimed { id: String },
    UnknownChallenge { id: String },
}

/// The full set of challenges for one player.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeBook {
    challenges: Vec<Challenge>,
}

impl ChallengeBook {
    pub fn from_seeds(seeds: &[ChallengeSeed]) -> Self {
        Self {
            challenges: seeds.iter().map(Challenge::from_seed).collect(),
        }
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Advance progress on every uncompleted challenge whose id matches the
    /// event kind (a "merge" event advances merge challenges, and so on).
    /// Progress caps at the goal; reaching it marks the challenge completed.
    /// Returns how many challenges advanced.
    pub fn record_event(&mut self, kind: &str, amount: u64) -> usize {
        let mut advanced = 0;
        for challenge in &mut self.challenges {
            if challenge.completed || !challenge.id.contains(kind) {
                continue;
            }
            challenge.progress = (challenge.progress + amount).min(challenge.goal);
            if challenge.progress >= challenge.goal {
                challenge.completed = true;
            }
            advanced += 1;
        }
        advanced
    }

    /// Reset daily challenges whose claim day has passed, so they come back
    /// the next local day.
    pub fn refresh(&mut self, today: LocalDay) {
        for challenge in &mut self.challenges {
            if challenge.period != ChallengePeriod::Daily {
                continue;
            }
            if let Some(claimed) = challenge.claim_day {
                if today.days_since(&claimed) >= 1 {
                    challenge.progress = 0;
                    challenge.completed = false;
                    challenge.claim_day = None;
                }
            }
        }
    }

    /// Claim a completed challenge: credit its reward and stamp the claim
    /// day so it cannot be claimed again this period.
    ///
    /// # Errors
    ///
    /// Only the ledger can fail here; every refusal is an outcome value.
    pub fn claim(
        &mut self,
        id: &str,
        today: LocalDay,
        ledger: &mut dyn CoinLedger,
    ) -> Result<ChallengeClaimOutcome, CoreError> {
        let Some(challenge) = self.challenges.iter_mut().find(|c| c.id == id) else {
            return Ok(ChallengeClaimOutcome::UnknownChallenge { id: id.to_string() });
        };
        if !challenge.completed {
            return Ok(ChallengeClaimOutcome::NotCompleted { id: id.to_string() });
        }
        if challenge.claim_day.is_some() {
            return Ok(ChallengeClaimOutcome::AlreadyClaimed { id: id.to_string() });
        }

        let balance = ledger.credit(challenge.reward_coins)?;
        challenge.claim_day = Some(today);
        Ok(ChallengeClaimOutcome::Claimed {
            id: id.to_string(),
            coins: challenge.reward_coins,
            balance,
        })
    }
}

/// Kv-backed persistence for the challenge book.
pub struct ChallengeStore<'a> {
    db: &'a Database,
    seeds: Vec<ChallengeSeed>,
}

impl<'a> ChallengeStore<'a> {
    pub fn new(db: &'a Database, seeds: Vec<ChallengeSeed>) -> Self {
        Self { db, seeds }
    }

    /// Load the book, falling back to the seeded defaults when the blob is
    /// missing or unparsable, and refresh daily challenges for `today`.
    ///
    /// # Errors
    ///
    /// Returns an error only on storage failure; parse failures recover to
    /// the defaults.
    pub fn load(&self, today: LocalDay) -> Result<ChallengeBook, StorageError> {
        let mut book = match self.db.kv_get(CHALLENGES_KEY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("challenge book blob unparsable, reseeding: {e}");
                ChallengeBook::from_seeds(&self.seeds)
            }),
            None => ChallengeBook::from_seeds(&self.seeds),
        };
        book.refresh(today);
        Ok(book)
    }

    /// Persist the book.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the kv write fails.
    pub fn save(&self, book: &ChallengeBook) -> Result<(), CoreError> {
        let json = serde_json::to_string(book)?;
        self.db.kv_set(CHALLENGES_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use chrono::NaiveDate;

    struct TestLedger {
        coins: u64,
    }

    impl CoinLedger for TestLedger {
        fn balance(&self) -> Result<u64, LedgerError> {
            Ok(self.coins)
        }

        fn credit(&mut self, amount: u64) -> Result<u64, LedgerError> {
            self.coins += amount;
            Ok(self.coins)
        }
    }

    fn day(d: u32) -> LocalDay {
        LocalDay::new(NaiveDate::from_ymd_opt(2026, 8, d).unwrap())
    }

    fn seeds() -> Vec<ChallengeSeed> {
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

    #[test]
    fn progress_caps_at_goal_and_completes() {
        let mut book = ChallengeBook::from_seeds(&seeds());
        assert_eq!(book.record_event("merge", 3), 1);
        assert!(!book.challenges()[0].completed);
        assert_eq!(book.record_event("merge", 10), 1);
        let merge = &book.challenges()[0];
        assert_eq!(merge.progress, 5);
        assert!(merge.completed);
    }

    #[test]
    fn events_only_touch_matching_challenges() {
        let mut book = ChallengeBook::from_seeds(&seeds());
        book.record_event("score", 120);
        assert_eq!(book.challenges()[0].progress, 0);
        assert_eq!(book.challenges()[1].progress, 120);
    }

    #[test]
    fn completed_challenge_stops_accumulating() {
        let mut book = ChallengeBook::from_seeds(&seeds());
        book.record_event("merge", 5);
        assert_eq!(book.record_event("merge", 1), 0);
        assert_eq!(book.challenges()[0].progress, 5);
    }

    #[test]
    fn claim_credits_once() {
        let mut book = ChallengeBook::from_seeds(&seeds());
        let mut ledger = TestLedger { coins: 0 };
        book.record_event("merge", 5);

        let outcome = book.claim("daily_merge_5", day(1), &mut ledger).unwrap();
        assert!(matches!(
            outcome,
            ChallengeClaimOutcome::Claimed { coins: 100, balance: 100, .. }
        ));

        let outcome = book.claim("daily_merge_5", day(1), &mut ledger).unwrap();
        assert!(matches!(outcome, ChallengeClaimOutcome::AlreadyClaimed { .. }));
        assert_eq!(ledger.coins, 100);
    }

    #[test]
    fn claim_refuses_incomplete_and_unknown() {
        let mut book = ChallengeBook::from_seeds(&seeds());
        let mut ledger = TestLedger { coins: 0 };
        assert!(matches!(
            book.claim("daily_merge_5", day(1), &mut ledger).unwrap(),
            ChallengeClaimOutcome::NotCompleted { .. }
        ));
        assert!(matches!(
            book.claim("nope", day(1), &mut ledger).unwrap(),
            ChallengeClaimOutcome::UnknownChallenge { .. }
        ));
        assert_eq!(ledger.coins, 0);
    }

    #[test]
    fn daily_challenges_reset_next_day() {
        let mut book = ChallengeBook::from_seeds(&seeds());
        let mut ledger = TestLedger { coins: 0 };
        book.record_event("merge", 5);
        book.claim("daily_merge_5", day(1), &mut ledger).unwrap();

        // Same day: still claimed.
        book.refresh(day(1));
        assert!(book.challenges()[0].claim_day.is_some());

        // Next day: fresh again.
        book.refresh(day(2));
        let merge = &book.challenges()[0];
        assert_eq!(merge.progress, 0);
        assert!(!merge.completed);
        assert!(merge.claim_day.is_none());
    }

    #[test]
    fn store_reseeds_on_corrupt_blob() {
        let db = Database::open_memory().unwrap();
        db.kv_set(CHALLENGES_KEY, "{not json").unwrap();
        let store = ChallengeStore::new(&db, seeds());
        let book = store.load(day(1)).unwrap();
        assert_eq!(book.challenges().len(), 2);
        assert_eq!(book.challenges()[0].progress, 0);
    }

    #[test]
    fn store_roundtrips() {
        let db = Database::open_memory().unwrap();
        let store = ChallengeStore::new(&db, seeds());
        let mut book = store.load(day(1)).unwrap();
        book.record_event("merge", 2);
        store.save(&book).unwrap();

        let reloaded = store.load(day(1)).unwrap();
        assert_eq!(reloaded.challenges()[0].progress, 2);
    }
}
