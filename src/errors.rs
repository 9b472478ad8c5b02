use thiserror::Error;
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::LockPeriod;

#[derive(Error, Debug)]
pub enum SavingsError {
    #[error("unknown plan: lock period {period:?} is not offered")]
    UnknownPlan {
        period: LockPeriod,
    },

    #[error("invalid account name")]
    InvalidAccountName,

    #[error("invalid amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("below minimum deposit: minimum {minimum}, provided {provided}")]
    BelowMinimumDeposit {
        minimum: Money,
        provided: Money,
    },

    // cross-owner lookups also land here so account existence never leaks
    #[error("account not found: {account_id}")]
    NotFound {
        account_id: Uuid,
    },

    #[error("account already withdrawn: {account_id}")]
    AlreadyWithdrawn {
        account_id: Uuid,
    },

    #[error("invalid plan: {message}")]
    InvalidPlan {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, SavingsError>;
