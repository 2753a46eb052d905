/// multiple advances - oldest first, interest before capital
use advance_ledger_rs::{parse_date, Ledger, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== multiple advances ===\n");

    let mut ledger = Ledger::builder()
        .daily_interest_rate(Rate::from_percentage(1))
        .build()?;

    ledger.add_advance(parse_date("2024-01-01")?, Money::from_major(100))?;
    ledger.add_advance(parse_date("2024-01-01")?, Money::from_major(50))?;
    // a pricier advance with its own rate
    ledger.add_advance_with_rate(parse_date("2024-01-01")?, Money::from_major(200), Some(Rate::from_percentage(2)))?;

    let day = parse_date("2024-01-02")?;
    println!("owed before payment: {} principal, {} interest", ledger.advances_balance(), ledger.interest_payable_balance(day)?);

    let allocation = ledger.add_payment(day, Money::from_major(60))?;
    println!("paid 60 on {}:", day);
    println!("  to interest:  {}", allocation.to_interest);
    println!("  to principal: {}", allocation.to_principal);

    for advance in ledger.advances() {
        println!(
            "  advance of {} at {}: {} remaining, interest paid through {}",
            advance.initial_amount(),
            advance.daily_interest_rate(),
            advance.remaining_amount(),
            advance.last_interest_payment_date()
        );
    }

    // a payment that only buys part of the accrued interest
    let later = parse_date("2024-01-20")?;
    println!("\ninterest owed through {}: {}", later, ledger.interest_payable_balance(later)?);
    let allocation = ledger.add_payment(later, Money::from_str_exact("2.9")?)?;
    println!("paid 2.9: {} credited as interest, {} kept in buffer", allocation.to_interest, allocation.excess);

    Ok(())
}
