use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::warn;

use crate::decimal::{Money, Rate};
use crate::errors::{Result, SavingsError};

/// actual/365 day count, the convention the advertised rates assume
const DAYS_PER_YEAR: u32 = 365;

fn validate(principal: Money, duration_days: u32) -> Result<()> {
    if duration_days == 0 {
        // catalog data bug; the catalog never produces this
        warn!("plan with zero lock duration reached the accrual calculator");
        return Err(SavingsError::InvalidPlan {
            message: "lock duration must be positive".to_string(),
        });
    }
    if principal.is_negative() {
        return Err(SavingsError::InvalidAmount { amount: principal });
    }
    Ok(())
}

/// simple (non-compounding) interest for a whole number of days
fn simple_interest(principal: Money, annual_rate: Rate, days: u32) -> Money {
    let interest = principal.as_decimal() * annual_rate.as_decimal() * Decimal::from(days)
        / Decimal::from(DAYS_PER_YEAR);
    Money::from_decimal(interest)
}

/// whole elapsed days since `start`, clamped to `[0, duration_days]`
pub fn elapsed_days(start: DateTime<Utc>, as_of: DateTime<Utc>, duration_days: u32) -> u32 {
    (as_of - start).num_days().clamp(0, duration_days as i64) as u32
}

/// guaranteed interest over the full lock period
pub fn projected_interest(
    principal: Money,
    annual_rate: Rate,
    duration_days: u32,
) -> Result<Money> {
    validate(principal, duration_days)?;
    Ok(simple_interest(principal, annual_rate, duration_days))
}

/// interest earned up to `as_of`. accrual stops at maturity: elapsed days
/// are clamped to the lock duration, so reading late never grows the value.
pub fn accrued_interest(
    principal: Money,
    annual_rate: Rate,
    start: DateTime<Utc>,
    as_of: DateTime<Utc>,
    duration_days: u32,
) -> Result<Money> {
    validate(principal, duration_days)?;
    let days = elapsed_days(start, as_of, duration_days);
    Ok(simple_interest(principal, annual_rate, days))
}

/// penalty for withdrawing at `withdraw_at`. zero at or after maturity;
/// before maturity the accrued interest is forfeited in full, so the net
/// payout of an early exit is exactly the principal.
pub fn early_withdrawal_penalty(
    principal: Money,
    annual_rate: Rate,
    start: DateTime<Utc>,
    withdraw_at: DateTime<Utc>,
    duration_days: u32,
) -> Result<Money> {
    validate(principal, duration_days)?;
    let maturity = start + Duration::days(duration_days as i64);
    if withdraw_at >= maturity {
        return Ok(Money::ZERO);
    }
    accrued_interest(principal, annual_rate, start, withdraw_at, duration_days)
}

/// fraction of the lock period elapsed at `as_of`, clamped to `[0, 1]`
pub fn progress_fraction(
    start: DateTime<Utc>,
    maturity: DateTime<Utc>,
    as_of: DateTime<Utc>,
) -> Decimal {
    let total = (maturity - start).num_seconds();
    if total <= 0 {
        return Decimal::ONE;
    }
    let elapsed = (as_of - start).num_seconds();
    (Decimal::from(elapsed) / Decimal::from(total)).clamp(Decimal::ZERO, Decimal::ONE)
}
