//! serialization support for the ledger
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::ledger::Ledger;
use crate::payments::Payment;
use crate::types::{AdvanceId, AdvanceStatus};

/// serializable view of a ledger's state
#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerView {
    pub daily_interest_rate: Rate,
    pub cash_buffer: Money,
    pub interest_paid: Money,
    pub advances_balance: Money,
    pub open_advances: usize,
    pub advances: Vec<AdvanceView>,
    pub payments: Vec<Payment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdvanceView {
    pub id: AdvanceId,
    pub status: AdvanceStatus,
    pub creation_date: NaiveDate,
    pub initial_amount: Money,
    pub remaining_amount: Money,
    pub daily_interest_rate: Rate,
    pub last_interest_payment_date: NaiveDate,
}

impl LedgerView {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let advances: Vec<AdvanceView> = ledger
            .advances()
            .iter()
            .map(|advance| AdvanceView {
                id: advance.id(),
                status: advance.status(),
                creation_date: advance.creation_date(),
                initial_amount: advance.initial_amount(),
                remaining_amount: advance.remaining_amount(),
                daily_interest_rate: advance.daily_interest_rate(),
                last_interest_payment_date: advance.last_interest_payment_date(),
            })
            .collect();

        LedgerView {
            daily_interest_rate: ledger.daily_interest_rate(),
            cash_buffer: ledger.cash_buffer(),
            interest_paid: ledger.interest_paid(),
            advances_balance: ledger.open_advances().map(|advance| advance.remaining_amount()).sum(),
            open_advances: ledger.open_advance_count(),
            advances,
            payments: ledger.payments().to_vec(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_reflects_ledger() {
        let mut ledger = Ledger::builder().daily_interest_rate(Rate::from_percentage(1)).build().unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        ledger.add_advance(day, Money::from_major(100)).unwrap();
        ledger.add_advance(day, Money::from_major(20)).unwrap();
        ledger.add_payment(day, Money::from_major(100)).unwrap();

        let view = LedgerView::from_ledger(&ledger);

        assert_eq!(view.advances.len(), 2);
        assert_eq!(view.advances[0].status, AdvanceStatus::Closed);
        assert_eq!(view.open_advances, 1);
        assert_eq!(view.advances_balance, Money::from_major(20));
        assert_eq!(view.payments.len(), 1);
    }

    #[test]
    fn test_json_output() {
        let mut ledger = Ledger::builder().daily_interest_rate(Rate::from_bps(10)).build().unwrap();
        ledger
            .add_advance(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(), Money::from_major(1_000))
            .unwrap();

        let json = ledger.json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["advances_balance"], "1000");
        assert_eq!(value["advances"][0]["creation_date"], "2024-03-09");
        assert_eq!(value["advances"][0]["status"], "Open");
    }
}
