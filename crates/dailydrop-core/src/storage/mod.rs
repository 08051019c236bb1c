pub mod config;
pub mod database;

pub use config::{DailyConfig, GameConfig, ShopConfig};
pub use database::{ClaimRecord, ClaimStats, Database};

use std::path::PathBuf;

/// Returns `~/.config/dailydrop[-dev]/` based on DAILYDROP_ENV.
///
/// Set DAILYDROP_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAILYDROP_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dailydrop-dev")
    } else {
        base_dir.join("dailydrop")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
