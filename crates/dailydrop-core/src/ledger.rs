//! Currency ledger seam.
//!
//! The claim path only ever reads a balance and applies a credit; everything
//! else about the player economy lives behind this trait. The workspace
//! ships one implementation ([`crate::economy::PlayerStore`]), a game client
//! would supply its own.

use crate::error::LedgerError;

/// External collaborator holding the player's coin balance.
pub trait CoinLedger {
    /// Current coin balance.
    fn balance(&self) -> Result<u64, LedgerError>;

    /// Credit `amount` coins and return the updated balance.
    fn credit(&mut self, amount: u64) -> Result<u64, LedgerError>;
}
