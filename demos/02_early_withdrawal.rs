/// early withdrawal - the penalty forfeits accrued interest, never principal
use locked_savings_rs::{LockPeriod, Money, SafeTimeProvider, SettlementService, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let service = SettlementService::default();

    let account = service.create_account(
        "customer-001",
        "Emergency fund",
        Money::from_major(500),
        LockPeriod::OneYear,
        &time,
    )?;

    // six months in, the money is needed back
    controller.advance(Duration::days(180));

    let snapshot = service.view_account("customer-001", account.id, &time)?;
    println!(
        "accrued so far: {}, exit penalty today: {}",
        snapshot.accrued_interest.round_dp(2),
        snapshot.early_withdrawal_penalty.round_dp(2),
    );

    let receipt = service.withdraw("customer-001", account.id, &time)?;
    println!(
        "early exit: interest {} - penalty {} = payout {}",
        receipt.interest_portion, receipt.penalty, receipt.payout
    );
    assert_eq!(receipt.payout, account.principal);

    Ok(())
}
