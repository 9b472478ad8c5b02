use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::SavingsPlan;
use crate::decimal::Money;
use crate::errors::{Result, SavingsError};
use crate::types::{AccountId, AccountStatus};

/// a locked savings account. `principal` and `plan` are fixed at creation;
/// `maturity_timestamp` is computed once at creation and stored, so calendar
/// anomalies never shift maturity after the fact. never deleted: a withdrawn
/// account stays on the ledger as the audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAccount {
    pub id: AccountId,
    pub owner_id: String,
    pub account_name: String,
    pub principal: Money,
    pub plan: SavingsPlan,
    pub start_timestamp: DateTime<Utc>,
    pub maturity_timestamp: DateTime<Utc>,
    pub status: AccountStatus,
    pub withdrawn_timestamp: Option<DateTime<Utc>>,
}

impl SavingsAccount {
    pub(crate) fn new(
        id: AccountId,
        owner_id: String,
        account_name: String,
        principal: Money,
        plan: SavingsPlan,
        opened_at: DateTime<Utc>,
    ) -> Self {
        let maturity_timestamp =
            opened_at + Duration::days(plan.lock_period.duration_days() as i64);

        Self {
            id,
            owner_id,
            account_name,
            principal,
            plan,
            start_timestamp: opened_at,
            maturity_timestamp,
            status: AccountStatus::Active,
            withdrawn_timestamp: None,
        }
    }

    /// whether the lock period has elapsed at `at`
    pub fn is_lock_elapsed(&self, at: DateTime<Utc>) -> bool {
        at >= self.maturity_timestamp
    }

    pub fn is_withdrawn(&self) -> bool {
        self.status == AccountStatus::Withdrawn
    }

    /// lazily promote ACTIVE to MATURED once the lock has elapsed.
    /// returns true when the promotion fired.
    pub(crate) fn promote_if_matured(&mut self, at: DateTime<Utc>) -> bool {
        if self.status == AccountStatus::Active && self.is_lock_elapsed(at) {
            self.status = AccountStatus::Matured;
            return true;
        }
        false
    }

    /// terminal transition. status and `withdrawn_timestamp` are set
    /// together, so no reader can observe one without the other.
    pub(crate) fn mark_withdrawn(&mut self, at: DateTime<Utc>) -> Result<()> {
        if self.is_withdrawn() {
            return Err(SavingsError::AlreadyWithdrawn {
                account_id: self.id,
            });
        }
        self.status = AccountStatus::Withdrawn;
        self.withdrawn_timestamp = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::types::LockPeriod;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn account() -> SavingsAccount {
        let plan = SavingsPlan::new(
            LockPeriod::OneYear,
            Rate::from_percentage(9),
            Money::from_major(500),
        );
        SavingsAccount::new(
            Uuid::new_v4(),
            "owner-1".to_string(),
            "School fees".to_string(),
            Money::from_major(500),
            plan,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_maturity_frozen_at_creation() {
        let account = account();
        assert_eq!(
            account.maturity_timestamp,
            account.start_timestamp + Duration::days(365)
        );
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.withdrawn_timestamp, None);
    }

    #[test]
    fn test_promotion_only_after_lock_elapses() {
        let mut account = account();
        let before = account.start_timestamp + Duration::days(100);
        let after = account.maturity_timestamp;

        assert!(!account.promote_if_matured(before));
        assert_eq!(account.status, AccountStatus::Active);

        assert!(account.promote_if_matured(after));
        assert_eq!(account.status, AccountStatus::Matured);

        // idempotent once matured
        assert!(!account.promote_if_matured(after));
    }

    #[test]
    fn test_withdrawn_pairs_status_and_timestamp() {
        let mut account = account();
        let at = account.start_timestamp + Duration::days(10);

        account.mark_withdrawn(at).unwrap();
        assert_eq!(account.status, AccountStatus::Withdrawn);
        assert_eq!(account.withdrawn_timestamp, Some(at));

        let again = account.mark_withdrawn(at + Duration::days(1));
        assert!(matches!(again, Err(SavingsError::AlreadyWithdrawn { .. })));
        assert_eq!(account.withdrawn_timestamp, Some(at));
    }
}
