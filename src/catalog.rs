use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SavingsError};
use crate::types::LockPeriod;

/// an offered savings product: a lock period with its guaranteed rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub lock_period: LockPeriod,
    pub annual_rate: Rate,
    pub minimum_deposit: Money,
}

impl SavingsPlan {
    pub fn new(lock_period: LockPeriod, annual_rate: Rate, minimum_deposit: Money) -> Self {
        Self {
            lock_period,
            annual_rate,
            minimum_deposit,
        }
    }
}

/// the catalog of offered plans, fixed at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanCatalog {
    plans: Vec<SavingsPlan>,
}

impl PlanCatalog {
    /// build a catalog from explicit plans. plans are ordered shortest
    /// lock period first; duplicate periods are a catalog data bug.
    pub fn new(plans: Vec<SavingsPlan>) -> Result<Self> {
        let mut plans = plans;
        plans.sort_by_key(|p| p.lock_period.duration_days());

        for pair in plans.windows(2) {
            if pair[0].lock_period == pair[1].lock_period {
                warn!(period = ?pair[0].lock_period, "duplicate plan in catalog");
                return Err(SavingsError::InvalidPlan {
                    message: format!("duplicate plan for {:?}", pair[0].lock_period),
                });
            }
        }

        Ok(Self { plans })
    }

    /// the standard offered product table
    pub fn standard() -> Self {
        Self {
            plans: vec![
                SavingsPlan::new(
                    LockPeriod::OneMonth,
                    Rate::from_percentage(5),
                    Money::from_major(50),
                ),
                SavingsPlan::new(
                    LockPeriod::ThreeMonths,
                    Rate::from_percentage(6),
                    Money::from_major(100),
                ),
                SavingsPlan::new(
                    LockPeriod::SixMonths,
                    Rate::from_percentage(7),
                    Money::from_major(250),
                ),
                SavingsPlan::new(
                    LockPeriod::OneYear,
                    Rate::from_percentage(9),
                    Money::from_major(500),
                ),
                SavingsPlan::new(
                    LockPeriod::TwoYears,
                    Rate::from_percentage(10),
                    Money::from_major(500),
                ),
                SavingsPlan::new(
                    LockPeriod::FiveYears,
                    Rate::from_percentage(12),
                    Money::from_major(1000),
                ),
            ],
        }
    }

    /// offered plans, shortest lock period first
    pub fn plans(&self) -> &[SavingsPlan] {
        &self.plans
    }

    /// look up the plan for a lock period
    pub fn plan_for(&self, period: LockPeriod) -> Result<SavingsPlan> {
        self.plans
            .iter()
            .find(|p| p.lock_period == period)
            .copied()
            .ok_or(SavingsError::UnknownPlan { period })
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
