use clap::Subcommand;
use dailydrop_core::economy::PlayerStore;
use dailydrop_core::shop;
use dailydrop_core::storage::{Database, GameConfig};

#[derive(Subcommand)]
pub enum ShopAction {
    /// Print item prices and donation bundles
    Catalog,
    /// Buy an item by id
    Buy {
        item: String,
    },
    /// Equip a purchased item
    Equip {
        item: String,
        #[arg(long, default_value = shop::DEFAULT_SLOT)]
        slot: String,
    },
    /// Credit a donation coin bundle
    Donate {
        amount: u64,
    },
}

pub fn run(action: ShopAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load()?;
    let db = Database::open()?;
    let mut store = PlayerStore::new(&db);

    match action {
        ShopAction::Catalog => {
            println!("{}", serde_json::to_string_pretty(&config.shop)?);
        }
        ShopAction::Buy { item } => {
            let outcome = shop::buy(&mut store, &config.shop, &item)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        ShopAction::Equip { item, slot } => {
            let outcome = shop::equip(&mut store, &item, &slot)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        ShopAction::Donate { amount } => {
            let outcome = shop::donate(&mut store, &config.shop, amount)?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}
