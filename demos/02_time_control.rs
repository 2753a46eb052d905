/// time control - dates taken from a controllable clock
use advance_ledger_rs::{Ledger, Money, Rate, SafeTimeProvider, TimeSource};
use chrono::{Duration, TimeZone, Utc};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut ledger = Ledger::builder()
        .daily_interest_rate(Rate::from_bps(10))
        .build()?;

    ledger.add_advance_with_time(Money::from_major(5_000), &time)?;
    println!("advance taken on {}", time.now().format("%Y-%m-%d"));

    // advance 30 days
    controller.advance(Duration::days(30));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    println!("interest owed: {}", ledger.interest_payable_balance_with_time(&time)?);

    // weekly repayments
    for week in 1..=8 {
        let allocation = ledger.add_payment_with_time(Money::from_major(700), &time)?;
        println!(
            "week {}: interest {}, principal {}, balance {}",
            week,
            allocation.to_interest,
            allocation.to_principal,
            ledger.advances_balance()
        );
        controller.advance(Duration::days(7));
    }

    println!("\nleft in buffer: {}", ledger.cash_buffer());
    println!("total interest paid: {}", ledger.interest_paid());

    Ok(())
}
