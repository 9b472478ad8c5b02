pub mod accrual;
pub mod account;
pub mod catalog;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod settlement;
pub mod types;

// re-export key types
pub use account::SavingsAccount;
pub use catalog::{PlanCatalog, SavingsPlan};
pub use decimal::{Money, Rate};
pub use errors::{Result, SavingsError};
pub use events::{Event, EventStore};
pub use ledger::SavingsLedger;
pub use settlement::{SavingsSnapshot, SettlementService, WithdrawalReceipt};
pub use types::{AccountId, AccountStatus, LockPeriod};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
