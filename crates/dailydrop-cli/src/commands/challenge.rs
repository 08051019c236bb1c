use chrono::Utc;
use clap::Subcommand;
use dailydrop_core::challenges::ChallengeStore;
use dailydrop_core::economy::PlayerStore;
use dailydrop_core::storage::{Database, GameConfig};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// Print all challenges with their progress
    List,
    /// Record a gameplay event against matching challenges
    Record {
        /// Event kind, e.g. "merge" or "score"
        kind: String,
        #[arg(long, default_value = "1")]
        amount: u64,
    },
    /// Claim a completed challenge's reward
    Claim {
        id: String,
    },
}

pub fn run(action: ChallengeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load()?;
    let db = Database::open()?;
    let store = ChallengeStore::new(&db, config.challenges.clone());
    let today = config.daily.clock().local_day(Utc::now());

    match action {
        ChallengeAction::List => {
            let book = store.load(today)?;
            println!("{}", serde_json::to_string_pretty(book.challenges())?);
        }
        ChallengeAction::Record { kind, amount } => {
            let mut book = store.load(today)?;
            book.record_event(&kind, amount);
            store.save(&book)?;
            println!("{}", serde_json::to_string_pretty(book.challenges())?);
        }
        ChallengeAction::Claim { id } => {
            let mut book = store.load(today)?;
            let mut wallet = PlayerStore::new(&db);
            let outcome = book.claim(&id, today, &mut wallet)?;
            store.save(&book)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
