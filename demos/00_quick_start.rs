/// quick start - minimal example to get started
use advance_ledger_rs::{parse_date, Ledger, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // 0.1% interest per day
    let mut ledger = Ledger::builder()
        .daily_interest_rate(Rate::from_bps(10))
        .build()?;

    ledger.add_advance(parse_date("2024-01-01")?, Money::from_major(1_000))?;

    // ten days later, pay 100: 10 goes to interest, 90 to principal
    let allocation = ledger.add_payment(parse_date("2024-01-11")?, Money::from_major(100))?;
    println!("interest: {}, principal: {}", allocation.to_interest, allocation.to_principal);

    println!("{}", ledger.json());

    Ok(())
}
