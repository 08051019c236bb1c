use chrono::Utc;
use clap::Subcommand;
use dailydrop_core::storage::{Database, GameConfig};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Aggregated claim statistics
    Summary,
    /// Most recent claims, newest first
    Recent {
        #[arg(long, default_value = "10")]
        limit: u32,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load()?;
    let db = Database::open()?;

    match action {
        StatsAction::Summary => {
            let today = config.daily.clock().local_day(Utc::now());
            let stats = db.claim_stats(today)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Recent { limit } => {
            let records = db.recent_claims(limit)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}
