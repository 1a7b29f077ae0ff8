//! Error types shared across the simulation crates.

use thiserror::Error;

use crate::enums::AbilityId;

/// Why an ability activation was rejected. Rejections never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("insufficient funds: ability costs {cost}, balance is {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },
    #[error("no skill charges remaining")]
    NoChargesRemaining,
    #[error("{0:?} is already active")]
    AlreadyActive(AbilityId),
}

/// Score ledger debit failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("cannot debit {requested} from balance {balance}")]
    InsufficientFunds { requested: u64, balance: u64 },
}

/// Aiming failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TargetingError {
    #[error("source and destination centres coincide")]
    DegenerateGeometry,
}

/// Tuning file loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

impl From<LedgerError> for AbilityError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { requested, balance } => {
                AbilityError::InsufficientFunds {
                    cost: requested,
                    balance,
                }
            }
        }
    }
}
