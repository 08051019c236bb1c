use chrono::{DateTime, Utc};
use clap::Subcommand;
use dailydrop_core::daily::DailyRewardService;
use dailydrop_core::economy::PlayerStore;
use dailydrop_core::storage::{Database, GameConfig};

#[derive(Subcommand)]
pub enum DailyAction {
    /// Print today's reward status as JSON
    Status {
        /// Evaluate at this instant instead of the wall clock (RFC 3339)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// Claim today's reward; prints the grant, or null when unavailable
    Claim {
        /// Evaluate at this instant instead of the wall clock (RFC 3339)
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

pub fn run(action: DailyAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load()?;
    let db = Database::open()?;
    let service = DailyRewardService::new(&db, config.daily.clone());

    match action {
        DailyAction::Status { now } => {
            let status = service.status(now.unwrap_or_else(Utc::now))?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        DailyAction::Claim { now } => {
            let mut wallet = PlayerStore::new(&db);
            let result = service.claim(now.unwrap_or_else(Utc::now), &mut wallet)?;
            // A refusal prints as a literal null; the caller re-queries
            // status to see why.
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
