use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a savings account
pub type AccountId = Uuid;

/// offered lock durations; the catalog attaches rates and minimums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LockPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
}

impl LockPeriod {
    /// all offered periods, shortest first
    pub const ALL: [LockPeriod; 6] = [
        LockPeriod::OneMonth,
        LockPeriod::ThreeMonths,
        LockPeriod::SixMonths,
        LockPeriod::OneYear,
        LockPeriod::TwoYears,
        LockPeriod::FiveYears,
    ];

    /// lock duration in whole days
    pub fn duration_days(&self) -> u32 {
        match self {
            LockPeriod::OneMonth => 30,
            LockPeriod::ThreeMonths => 90,
            LockPeriod::SixMonths => 180,
            LockPeriod::OneYear => 365,
            LockPeriod::TwoYears => 730,
            LockPeriod::FiveYears => 1825,
        }
    }

    /// display label for the presentation layer
    pub fn label(&self) -> &'static str {
        match self {
            LockPeriod::OneMonth => "1 Month",
            LockPeriod::ThreeMonths => "3 Months",
            LockPeriod::SixMonths => "6 Months",
            LockPeriod::OneYear => "1 Year",
            LockPeriod::TwoYears => "2 Years",
            LockPeriod::FiveYears => "5 Years",
        }
    }
}

/// savings account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    /// deposit locked and accruing interest
    Active,
    /// lock period elapsed, interest frozen, withdrawable without penalty
    Matured,
    /// settled and closed; kept as an audit record
    Withdrawn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_ordered_shortest_first() {
        let days: Vec<u32> = LockPeriod::ALL.iter().map(|p| p.duration_days()).collect();
        let mut sorted = days.clone();
        sorted.sort_unstable();
        assert_eq!(days, sorted);
        assert_eq!(days, vec![30, 90, 180, 365, 730, 1825]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(LockPeriod::OneMonth.label(), "1 Month");
        assert_eq!(LockPeriod::FiveYears.label(), "5 Years");
    }
}
