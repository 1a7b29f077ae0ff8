//! Score ledger: guarded credit/debit of the player's balance.
//!
//! Stored in `SimulationEngine`, NOT as an ECS entity.

use hoverstrike_core::error::LedgerError;

/// Integral score balance plus running tallies for the HUD.
#[derive(Debug, Clone, Default)]
pub struct ScoreLedger {
    balance: u64,
    pub enemies_destroyed: u32,
    pub orbs_destroyed: u32,
    pub hits_landed: u32,
    pub orbs_absorbed: u32,
}

impl ScoreLedger {
    pub fn new(starting_balance: u64) -> Self {
        Self {
            balance: starting_balance,
            ..Default::default()
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Always succeeds.
    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Withdraw `amount`. Leaves the balance untouched when it would go negative.
    pub fn debit(&mut self, amount: u64) -> Result<(), LedgerError> {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                Ok(())
            }
            None => Err(LedgerError::InsufficientFunds {
                requested: amount,
                balance: self.balance,
            }),
        }
    }
}
