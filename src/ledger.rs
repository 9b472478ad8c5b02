use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::account::SavingsAccount;
use crate::catalog::SavingsPlan;
use crate::decimal::Money;
use crate::errors::{Result, SavingsError};
use crate::types::AccountId;

struct LedgerInner {
    accounts: HashMap<AccountId, SavingsAccount>,
    // insertion order; breaks start_timestamp ties in list_for
    order: Vec<AccountId>,
}

/// the authoritative collection of savings accounts. the only component
/// that mutates `status` / `withdrawn_timestamp`; all mutations for a given
/// account are serialized under the write lock, so exactly one of several
/// concurrent withdrawal attempts can win.
pub struct SavingsLedger {
    inner: RwLock<LedgerInner>,
}

impl SavingsLedger {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LedgerInner {
                accounts: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// open a new account. validates the name, the amount, and the plan
    /// minimum; on success the account is immediately visible to `list_for`.
    pub fn create(
        &self,
        owner_id: &str,
        account_name: &str,
        principal: Money,
        plan: SavingsPlan,
        opened_at: DateTime<Utc>,
    ) -> Result<SavingsAccount> {
        if account_name.trim().is_empty() {
            return Err(SavingsError::InvalidAccountName);
        }
        if !principal.is_positive() {
            return Err(SavingsError::InvalidAmount { amount: principal });
        }
        if principal < plan.minimum_deposit {
            return Err(SavingsError::BelowMinimumDeposit {
                minimum: plan.minimum_deposit,
                provided: principal,
            });
        }

        let account = SavingsAccount::new(
            Uuid::new_v4(),
            owner_id.to_string(),
            account_name.trim().to_string(),
            principal,
            plan,
            opened_at,
        );

        let mut inner = self.inner.write().expect("ledger lock poisoned");
        inner.order.push(account.id);
        inner.accounts.insert(account.id, account.clone());

        Ok(account)
    }

    /// all accounts for one owner, start_timestamp ascending; equal
    /// timestamps keep creation order
    pub fn list_for(&self, owner_id: &str) -> Vec<SavingsAccount> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        let mut accounts: Vec<SavingsAccount> = inner
            .order
            .iter()
            .filter_map(|id| inner.accounts.get(id))
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .collect();
        accounts.sort_by_key(|a| a.start_timestamp);
        accounts
    }

    /// fetch one account with the ownership check. a cross-owner lookup
    /// reports `NotFound` so account existence never leaks.
    pub fn get(&self, owner_id: &str, account_id: AccountId) -> Result<SavingsAccount> {
        let inner = self.inner.read().expect("ledger lock poisoned");
        inner
            .accounts
            .get(&account_id)
            .filter(|a| a.owner_id == owner_id)
            .cloned()
            .ok_or(SavingsError::NotFound { account_id })
    }

    /// terminal ACTIVE/MATURED -> WITHDRAWN transition, atomic per account.
    /// concurrent callers race under the write lock; the losers observe
    /// `AlreadyWithdrawn`.
    pub fn transition_to_withdrawn(
        &self,
        account_id: AccountId,
        at: DateTime<Utc>,
    ) -> Result<SavingsAccount> {
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        let account = inner
            .accounts
            .get_mut(&account_id)
            .ok_or(SavingsError::NotFound { account_id })?;
        account.mark_withdrawn(at)?;
        Ok(account.clone())
    }

    /// lazy ACTIVE -> MATURED promotion, evaluated on demand; there is no
    /// background scheduler. returns the (possibly updated) record.
    pub fn promote_if_matured(
        &self,
        account_id: AccountId,
        at: DateTime<Utc>,
    ) -> Result<SavingsAccount> {
        let mut inner = self.inner.write().expect("ledger lock poisoned");
        let account = inner
            .accounts
            .get_mut(&account_id)
            .ok_or(SavingsError::NotFound { account_id })?;
        account.promote_if_matured(at);
        Ok(account.clone())
    }
}

impl Default for SavingsLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::{AccountStatus, LockPeriod};
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn plan() -> SavingsPlan {
        SavingsPlan::new(
            LockPeriod::OneYear,
            Rate::from_percentage(9),
            Money::from_major(500),
        )
    }

    fn opened_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_create_validations() {
        let ledger = SavingsLedger::new();

        let blank = ledger.create("owner-1", "   ", Money::from_major(500), plan(), opened_at());
        assert!(matches!(blank, Err(SavingsError::InvalidAccountName)));

        let zero = ledger.create("owner-1", "Rainy day", Money::ZERO, plan(), opened_at());
        assert!(matches!(zero, Err(SavingsError::InvalidAmount { .. })));

        let small = ledger.create(
            "owner-1",
            "Rainy day",
            Money::from_major(499),
            plan(),
            opened_at(),
        );
        assert!(matches!(small, Err(SavingsError::BelowMinimumDeposit { .. })));

        // nothing was recorded
        assert!(ledger.list_for("owner-1").is_empty());
    }

    #[test]
    fn test_create_and_list() {
        let ledger = SavingsLedger::new();

        let later = ledger
            .create(
                "owner-1",
                "Second",
                Money::from_major(600),
                plan(),
                opened_at() + Duration::days(5),
            )
            .unwrap();
        let earlier = ledger
            .create("owner-1", "First", Money::from_major(500), plan(), opened_at())
            .unwrap();
        ledger
            .create("owner-2", "Other owner", Money::from_major(500), plan(), opened_at())
            .unwrap();

        let listed = ledger.list_for("owner-1");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, earlier.id);
        assert_eq!(listed[1].id, later.id);
    }

    #[test]
    fn test_list_ties_keep_creation_order() {
        let ledger = SavingsLedger::new();

        let first = ledger
            .create("owner-1", "A", Money::from_major(500), plan(), opened_at())
            .unwrap();
        let second = ledger
            .create("owner-1", "B", Money::from_major(500), plan(), opened_at())
            .unwrap();

        let listed = ledger.list_for("owner-1");
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[test]
    fn test_get_checks_ownership() {
        let ledger = SavingsLedger::new();
        let account = ledger
            .create("owner-1", "Mine", Money::from_major(500), plan(), opened_at())
            .unwrap();

        assert!(ledger.get("owner-1", account.id).is_ok());

        let cross = ledger.get("owner-2", account.id);
        assert!(matches!(cross, Err(SavingsError::NotFound { .. })));

        let missing = ledger.get("owner-1", Uuid::new_v4());
        assert!(matches!(missing, Err(SavingsError::NotFound { .. })));
    }

    #[test]
    fn test_transition_to_withdrawn_once() {
        let ledger = SavingsLedger::new();
        let account = ledger
            .create("owner-1", "Mine", Money::from_major(500), plan(), opened_at())
            .unwrap();
        let at = opened_at() + Duration::days(10);

        let withdrawn = ledger.transition_to_withdrawn(account.id, at).unwrap();
        assert_eq!(withdrawn.status, AccountStatus::Withdrawn);
        assert_eq!(withdrawn.withdrawn_timestamp, Some(at));

        let again = ledger.transition_to_withdrawn(account.id, at + Duration::days(1));
        assert!(matches!(again, Err(SavingsError::AlreadyWithdrawn { .. })));
    }

    #[test]
    fn test_promote_if_matured() {
        let ledger = SavingsLedger::new();
        let account = ledger
            .create("owner-1", "Mine", Money::from_major(500), plan(), opened_at())
            .unwrap();

        let early = ledger
            .promote_if_matured(account.id, opened_at() + Duration::days(100))
            .unwrap();
        assert_eq!(early.status, AccountStatus::Active);

        let matured = ledger
            .promote_if_matured(account.id, account.maturity_timestamp)
            .unwrap();
        assert_eq!(matured.status, AccountStatus::Matured);
    }

    #[test]
    fn test_concurrent_withdrawals_single_winner() {
        let ledger = Arc::new(SavingsLedger::new());
        let account = ledger
            .create("owner-1", "Contended", Money::from_major(500), plan(), opened_at())
            .unwrap();
        let at = opened_at() + Duration::days(30);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                let id = account.id;
                std::thread::spawn(move || ledger.transition_to_withdrawn(id, at).is_ok())
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();

        assert_eq!(wins, 1);
    }
}
