use clap::Subcommand;
use dailydrop_core::economy::PlayerStore;
use dailydrop_core::storage::Database;

#[derive(Subcommand)]
pub enum WalletAction {
    /// Print the player profile as JSON
    Show,
    /// Credit coins
    Credit {
        amount: u64,
    },
    /// Debit coins; fails when the balance cannot cover it
    Debit {
        amount: u64,
    },
    /// Fold a finished game into the lifetime counters
    RecordGame {
        #[arg(long)]
        score: u64,
        #[arg(long, default_value = "0")]
        merges: u64,
    },
}

pub fn run(action: WalletAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let store = PlayerStore::new(&db);

    match action {
        WalletAction::Show => {
            println!("{}", serde_json::to_string_pretty(&store.profile()?)?);
        }
        WalletAction::Credit { amount } => {
            let balance = store.credit_coins(amount)?;
            println!("{}", serde_json::json!({ "balance": balance }));
        }
        WalletAction::Debit { amount } => {
            let balance = store.debit_coins(amount)?;
            println!("{}", serde_json::json!({ "balance": balance }));
        }
        WalletAction::RecordGame { score, merges } => {
            let stats = store.record_game(score, merges)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
