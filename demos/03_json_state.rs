/// json state - configuration in, state out
use advance_ledger_rs::{parse_date, Ledger, LedgerConfig, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== json state serialization ===\n");

    let config = LedgerConfig::from_json(
        r#"{ "daily_interest_rate": "0.0015", "opening_cash_buffer": "250" }"#,
    )?;
    let mut ledger = Ledger::builder().config(config).build()?;

    // the opening buffer pre-funds part of the first advance
    ledger.add_advance(parse_date("2024-02-01")?, Money::from_major(1_000))?;
    println!("after first advance:");
    println!("{}\n", ledger.json());

    ledger.add_payment(parse_date("2024-02-15")?, Money::from_major(800))?;
    println!("after payment of 800:");
    println!("{}\n", ledger.json());

    for event in ledger.take_events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
