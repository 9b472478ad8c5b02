use std::sync::Mutex;

use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accrual;
use crate::account::SavingsAccount;
use crate::catalog::PlanCatalog;
use crate::decimal::Money;
use crate::errors::{Result, SavingsError};
use crate::events::{Event, EventStore};
use crate::ledger::SavingsLedger;
use crate::types::{AccountId, AccountStatus, LockPeriod};

/// read-only view of one account with every derived figure the
/// presentation layer renders. the engine is the single source of these
/// numbers; the UI must not recompute interest on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSnapshot {
    pub account: SavingsAccount,
    pub accrued_interest: Money,
    pub projected_interest_at_maturity: Money,
    pub progress: Decimal,
    pub is_matured: bool,
    pub early_withdrawal_penalty: Money,
}

impl SavingsSnapshot {
    /// export as pretty-printed json
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// immutable record of a completed withdrawal. the wallet-crediting
/// collaborator moves `payout`; the engine itself moves no money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub account_id: AccountId,
    pub principal: Money,
    pub interest_portion: Money,
    pub penalty: Money,
    pub payout: Money,
    pub was_early: bool,
    pub withdrawn_at: DateTime<Utc>,
}

impl WithdrawalReceipt {
    /// export as pretty-printed json
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// the caller-facing entry point: composes the plan catalog, the ledger,
/// and the accrual calculator into whole operations with receipts.
pub struct SettlementService {
    catalog: PlanCatalog,
    ledger: SavingsLedger,
    events: Mutex<EventStore>,
}

impl SettlementService {
    pub fn new(catalog: PlanCatalog, ledger: SavingsLedger) -> Self {
        Self {
            catalog,
            ledger,
            events: Mutex::new(EventStore::new()),
        }
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// open a locked savings account at the provider's current time
    pub fn create_account(
        &self,
        owner_id: &str,
        account_name: &str,
        amount: Money,
        lock_period: LockPeriod,
        time_provider: &SafeTimeProvider,
    ) -> Result<SavingsAccount> {
        let plan = self.catalog.plan_for(lock_period)?;
        let account =
            self.ledger
                .create(owner_id, account_name, amount, plan, time_provider.now())?;

        debug!(
            account_id = %account.id,
            owner_id,
            principal = %account.principal,
            period = ?lock_period,
            "savings account opened"
        );

        self.emit(Event::AccountOpened {
            account_id: account.id,
            owner_id: account.owner_id.clone(),
            principal: account.principal,
            lock_period,
            maturity_timestamp: account.maturity_timestamp,
            timestamp: account.start_timestamp,
        });

        Ok(account)
    }

    /// snapshot at the provider's current time
    pub fn view_account(
        &self,
        owner_id: &str,
        account_id: AccountId,
        time_provider: &SafeTimeProvider,
    ) -> Result<SavingsSnapshot> {
        self.view_account_at(owner_id, account_id, time_provider.now())
    }

    /// snapshot at an explicit instant
    pub fn view_account_at(
        &self,
        owner_id: &str,
        account_id: AccountId,
        as_of: DateTime<Utc>,
    ) -> Result<SavingsSnapshot> {
        let pre = self.ledger.get(owner_id, account_id)?;
        let account = self.promote(&pre, as_of)?;

        // a withdrawn account's figures are frozen at the withdrawal instant
        let effective = account.withdrawn_timestamp.unwrap_or(as_of);
        let duration_days = account.plan.lock_period.duration_days();

        let accrued_interest = accrual::accrued_interest(
            account.principal,
            account.plan.annual_rate,
            account.start_timestamp,
            effective,
            duration_days,
        )?;
        let projected_interest_at_maturity = accrual::projected_interest(
            account.principal,
            account.plan.annual_rate,
            duration_days,
        )?;
        let early_withdrawal_penalty = accrual::early_withdrawal_penalty(
            account.principal,
            account.plan.annual_rate,
            account.start_timestamp,
            effective,
            duration_days,
        )?;
        let progress = accrual::progress_fraction(
            account.start_timestamp,
            account.maturity_timestamp,
            effective,
        );
        let is_matured = account.is_lock_elapsed(effective);

        Ok(SavingsSnapshot {
            account,
            accrued_interest,
            projected_interest_at_maturity,
            progress,
            is_matured,
            early_withdrawal_penalty,
        })
    }

    /// all accounts for one owner, oldest first; withdrawn accounts are
    /// included as history
    pub fn list_accounts(&self, owner_id: &str) -> Vec<SavingsAccount> {
        self.ledger.list_for(owner_id)
    }

    /// settle an account at the provider's current time
    pub fn withdraw(
        &self,
        owner_id: &str,
        account_id: AccountId,
        time_provider: &SafeTimeProvider,
    ) -> Result<WithdrawalReceipt> {
        self.withdraw_at(owner_id, account_id, time_provider.now())
    }

    /// settle an account at an explicit instant. the receipt is issued only
    /// after the status transition commits: a caller that loses the race
    /// gets `AlreadyWithdrawn` and nothing is paid twice.
    pub fn withdraw_at(
        &self,
        owner_id: &str,
        account_id: AccountId,
        at: DateTime<Utc>,
    ) -> Result<WithdrawalReceipt> {
        let pre = self.ledger.get(owner_id, account_id)?;
        let account = self.promote(&pre, at)?;

        if account.is_withdrawn() {
            return Err(SavingsError::AlreadyWithdrawn { account_id });
        }

        let duration_days = account.plan.lock_period.duration_days();
        let interest_portion = accrual::accrued_interest(
            account.principal,
            account.plan.annual_rate,
            account.start_timestamp,
            at,
            duration_days,
        )?
        .round_payout();
        let penalty = accrual::early_withdrawal_penalty(
            account.principal,
            account.plan.annual_rate,
            account.start_timestamp,
            at,
            duration_days,
        )?
        .round_payout();

        // early: penalty == interest, payout == principal exactly.
        // matured: penalty == 0, payout == principal + interest.
        let payout = account.principal + interest_portion - penalty;
        let was_early = !account.is_lock_elapsed(at);

        self.ledger.transition_to_withdrawn(account_id, at)?;

        debug!(
            account_id = %account_id,
            payout = %payout,
            was_early,
            "savings account settled"
        );

        self.emit(Event::AccountWithdrawn {
            account_id,
            principal: account.principal,
            interest_portion,
            penalty,
            payout,
            was_early,
            timestamp: at,
        });

        Ok(WithdrawalReceipt {
            account_id,
            principal: account.principal,
            interest_portion,
            penalty,
            payout,
            was_early,
            withdrawn_at: at,
        })
    }

    /// hand the collected events to the audit / wallet-crediting collaborator
    pub fn drain_events(&self) -> Vec<Event> {
        self.events
            .lock()
            .expect("event store poisoned")
            .take_events()
    }

    fn promote(&self, pre: &SavingsAccount, at: DateTime<Utc>) -> Result<SavingsAccount> {
        let account = self.ledger.promote_if_matured(pre.id, at)?;
        if pre.status == AccountStatus::Active && account.status == AccountStatus::Matured {
            self.emit(Event::AccountMatured {
                account_id: account.id,
                matured_at: account.maturity_timestamp,
            });
        }
        Ok(account)
    }

    fn emit(&self, event: Event) {
        self.events
            .lock()
            .expect("event store poisoned")
            .emit(event);
    }
}

impl Default for SettlementService {
    fn default() -> Self {
        Self::new(PlanCatalog::standard(), SavingsLedger::new())
    }
}
