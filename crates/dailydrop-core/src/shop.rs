//! Shop purchases, equipment, and coin bundles.
//!
//! Purchasing only records ownership; applying/equipping an item is a
//! separate step. Refusals (unknown item, not enough coins) are outcome
//! values, never errors.

use serde::{Deserialize, Serialize};

use crate::economy::PlayerStore;
use crate::error::{CoreError, LedgerError};
use crate::storage::config::ShopConfig;

/// Default equipment slot when the caller does not name one.
pub const DEFAULT_SLOT: &str = "default";

/// Outcome of a purchase attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PurchaseOutcome {
    Purchased { item: String, price: u64, balance: u64 },
    InsufficientCoins { item: String, price: u64, balance: u64 },
    UnknownItem { item: String },
}

/// Outcome of an equip attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum EquipOutcome {
    Equipped { item: String, slot: String },
    NotOwned { item: String },
}

/// Outcome of a donation purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DonateOutcome {
    Credited { amount: u64, balance: u64 },
    UnknownBundle { amount: u64 },
}

/// Buy an item: check the configured price, debit, record ownership.
///
/// # Errors
///
/// Returns an error on storage failure; price refusals are outcomes.
pub fn buy(
    store: &mut PlayerStore<'_>,
    config: &ShopConfig,
    item: &str,
) -> Result<PurchaseOutcome, CoreError> {
    let Some(&price) = config.item_prices.get(item) else {
        return Ok(PurchaseOutcome::UnknownItem {
            item: item.to_string(),
        });
    };

    match store.debit_coins(price) {
        Ok(balance) => {
            let mut profile = store.profile().map_err(CoreError::Storage)?;
            profile.purchased_items.push(item.to_string());
            store.save(&profile).map_err(CoreError::Storage)?;
            Ok(PurchaseOutcome::Purchased {
                item: item.to_string(),
                price,
                balance,
            })
        }
        Err(LedgerError::InsufficientCoins { balance, .. }) => {
            Ok(PurchaseOutcome::InsufficientCoins {
                item: item.to_string(),
                price,
                balance,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Equip a previously purchased item into a slot.
///
/// # Errors
///
/// Returns an error on storage failure.
pub fn equip(
    store: &mut PlayerStore<'_>,
    item: &str,
    slot: &str,
) -> Result<EquipOutcome, CoreError> {
    let mut profile = store.profile().map_err(CoreError::Storage)?;
    if !profile.purchased_items.iter().any(|owned| owned == item) {
        return Ok(EquipOutcome::NotOwned {
            item: item.to_string(),
        });
    }
    profile
        .equipped_items
        .insert(slot.to_string(), item.to_string());
    store.save(&profile).map_err(CoreError::Storage)?;
    Ok(EquipOutcome::Equipped {
        item: item.to_string(),
        slot: slot.to_string(),
    })
}

/// Credit a donation coin bundle. Only the configured bundle sizes are
/// accepted.
///
/// # Errors
///
/// Returns an error on storage failure.
pub fn donate(
    store: &mut PlayerStore<'_>,
    config: &ShopConfig,
    amount: u64,
) -> Result<DonateOutcome, CoreError> {
    if !config.donation_amounts.contains(&amount) {
        return Ok(DonateOutcome::UnknownBundle { amount });
    }
    let balance = store.credit_coins(amount)?;
    Ok(DonateOutcome::Credited { amount, balance })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn config() -> ShopConfig {
        ShopConfig::default()
    }

    #[test]
    fn buy_debits_and_records_ownership() {
        let db = Database::open_memory().unwrap();
        let mut store = PlayerStore::new(&db);
        let outcome = buy(&mut store, &config(), "booster_pack").unwrap();
        assert!(matches!(
            outcome,
            PurchaseOutcome::Purchased { price: 250, balance: 1250, .. }
        ));
        let profile = store.profile().unwrap();
        assert_eq!(profile.purchased_items, vec!["booster_pack".to_string()]);
    }

    #[test]
    fn buy_refuses_when_broke() {
        let db = Database::open_memory().unwrap();
        let mut store = PlayerStore::new(&db);
        store.debit_coins(1400).unwrap();
        let outcome = buy(&mut store, &config(), "theme_dark").unwrap();
        assert!(matches!(
            outcome,
            PurchaseOutcome::InsufficientCoins { price: 500, balance: 100, .. }
        ));
        assert!(store.profile().unwrap().purchased_items.is_empty());
    }

    #[test]
    fn buy_refuses_unknown_item() {
        let db = Database::open_memory().unwrap();
        let mut store = PlayerStore::new(&db);
        let outcome = buy(&mut store, &config(), "jetpack").unwrap();
        assert!(matches!(outcome, PurchaseOutcome::UnknownItem { .. }));
        assert_eq!(store.profile().unwrap().coins, 1500);
    }

    #[test]
    fn equip_requires_ownership() {
        let db = Database::open_memory().unwrap();
        let mut store = PlayerStore::new(&db);
        let outcome = equip(&mut store, "theme_dark", DEFAULT_SLOT).unwrap();
        assert!(matches!(outcome, EquipOutcome::NotOwned { .. }));

        buy(&mut store, &config(), "theme_dark").unwrap();
        let outcome = equip(&mut store, "theme_dark", "theme").unwrap();
        assert!(matches!(outcome, EquipOutcome::Equipped { .. }));
        let profile = store.profile().unwrap();
        assert_eq!(
            profile.equipped_items.get("theme").map(String::as_str),
            Some("theme_dark")
        );
    }

    #[test]
    fn donate_accepts_configured_bundles_only() {
        let db = Database::open_memory().unwrap();
        let mut store = PlayerStore::new(&db);
        let outcome = donate(&mut store, &config(), 1200).unwrap();
        assert!(matches!(
            outcome,
            DonateOutcome::Credited { amount: 1200, balance: 2700 }
        ));
        let outcome = donate(&mut store, &config(), 999).unwrap();
        assert!(matches!(outcome, DonateOutcome::UnknownBundle { amount: 999 }));
    }
}
