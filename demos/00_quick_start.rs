/// quick start - open a locked savings account and settle it at maturity
use locked_savings_rs::{LockPeriod, Money, SafeTimeProvider, SettlementService, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let control = time.test_control().unwrap();

    let service = SettlementService::default();

    // lock 500.00 for one year at the catalog rate
    let account = service.create_account(
        "customer-001",
        "School fees",
        Money::from_major(500),
        LockPeriod::OneYear,
        &time,
    )?;
    println!("opened {} maturing {}", account.id, account.maturity_timestamp.format("%Y-%m-%d"));

    // jump to maturity and settle
    control.advance(Duration::days(365));
    let receipt = service.withdraw("customer-001", account.id, &time)?;
    println!("{}", receipt.json());

    Ok(())
}
