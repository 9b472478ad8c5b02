/// time control - watch accrual and maturity with a controlled clock
use locked_savings_rs::{LockPeriod, Money, SafeTimeProvider, SettlementService, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let service = SettlementService::default();

    let account = service.create_account(
        "customer-001",
        "Harvest float",
        Money::from_major(10_000),
        LockPeriod::SixMonths,
        &time,
    )?;
    println!("opened on {}", time.now().format("%Y-%m-%d"));

    // sample the balance monthly
    for month in 1..=6 {
        controller.advance(Duration::days(30));
        let snapshot = service.view_account("customer-001", account.id, &time)?;
        println!(
            "month {}: accrued {} of {} ({}% through)",
            month,
            snapshot.accrued_interest.round_dp(2),
            snapshot.projected_interest_at_maturity.round_dp(2),
            (snapshot.progress * locked_savings_rs::Decimal::from(100)).round_dp(1),
        );
    }

    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    let snapshot = service.view_account("customer-001", account.id, &time)?;
    println!("matured: {}", snapshot.is_matured);

    let receipt = service.withdraw("customer-001", account.id, &time)?;
    println!("payout at maturity: {}", receipt.payout);

    Ok(())
}
