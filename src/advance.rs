use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::interest::{daily_interest, days_between, interest_for_days, whole_days_covered, InterestCalculation};
use crate::types::{AdvanceId, AdvanceStatus, InterestPayment};

/// one disbursed amount with its own interest clock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advance {
    id: AdvanceId,
    creation_date: NaiveDate,
    initial_amount: Money,
    remaining_amount: Money,
    daily_interest_rate: Rate,
    last_interest_payment_date: NaiveDate,
}

impl Advance {
    /// create an advance owing its full amount
    pub fn new(creation_date: NaiveDate, amount: Money, daily_interest_rate: Rate) -> Self {
        Self::with_remaining(creation_date, amount, daily_interest_rate, amount)
    }

    /// create an advance where part of `amount` was already covered at creation
    pub(crate) fn with_remaining(
        creation_date: NaiveDate,
        amount: Money,
        daily_interest_rate: Rate,
        remaining_amount: Money,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            creation_date,
            initial_amount: amount,
            remaining_amount: remaining_amount.max(Money::ZERO),
            daily_interest_rate,
            last_interest_payment_date: creation_date,
        }
    }

    pub fn id(&self) -> AdvanceId {
        self.id
    }

    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    pub fn initial_amount(&self) -> Money {
        self.initial_amount
    }

    pub fn remaining_amount(&self) -> Money {
        self.remaining_amount
    }

    pub fn daily_interest_rate(&self) -> Rate {
        self.daily_interest_rate
    }

    pub fn last_interest_payment_date(&self) -> NaiveDate {
        self.last_interest_payment_date
    }

    /// principal repaid so far, including any part covered at creation
    pub fn paid_capital(&self) -> Money {
        self.initial_amount - self.remaining_amount
    }

    pub fn status(&self) -> AdvanceStatus {
        if self.is_closed() {
            AdvanceStatus::Closed
        } else {
            AdvanceStatus::Open
        }
    }

    pub fn is_closed(&self) -> bool {
        self.remaining_amount.is_zero()
    }

    /// interest one day costs on the current remaining amount
    pub fn interest_by_day(&self) -> Result<Money> {
        daily_interest(self.remaining_amount, self.daily_interest_rate)
    }

    pub fn days_since_last_interest_payment(&self, to_date: NaiveDate) -> i64 {
        days_between(self.last_interest_payment_date, to_date)
    }

    /// interest accrued but not yet paid as of `to_date`
    pub fn interest_payable_balance(&self, to_date: NaiveDate) -> Result<Money> {
        Ok(self.interest_calculation(to_date)?.interest_amount)
    }

    /// full breakdown of the interest accrued as of `to_date`
    pub fn interest_calculation(&self, to_date: NaiveDate) -> Result<InterestCalculation> {
        InterestCalculation::simple(
            self.remaining_amount,
            self.daily_interest_rate,
            self.last_interest_payment_date,
            to_date,
        )
    }

    /// reduce the remaining amount, returning whatever `amount` did not consume
    pub fn pay_capital(&mut self, amount: Money) -> Money {
        self.remaining_amount -= amount;
        if self.remaining_amount.is_negative() {
            let rest = -self.remaining_amount;
            self.remaining_amount = Money::ZERO;
            debug!("advance {} paid off with {} left over", self.id, rest);
            return rest;
        }
        Money::ZERO
    }

    /// pay accrued interest as of `payment_date` out of `amount`
    ///
    /// When `amount` does not cover everything accrued, only whole days are
    /// credited: the interest clock moves forward by the number of full days
    /// paid for and the remainder of `amount` is handed back.
    pub fn pay_interest(&mut self, amount: Money, payment_date: NaiveDate) -> Result<InterestPayment> {
        let interest = self.interest_payable_balance(payment_date)?;

        if amount >= interest {
            // an earlier-dated payment must not wind the clock back
            self.last_interest_payment_date = self.last_interest_payment_date.max(payment_date);
            return Ok(InterestPayment {
                rest: amount - interest,
                interest_paid: interest,
                paid_through: self.last_interest_payment_date,
            });
        }

        let interest_by_day = self.interest_by_day()?;
        if interest_by_day.is_zero() {
            return Err(LedgerError::DivisionHazard { advance_id: self.id });
        }

        let days_covered = whole_days_covered(amount, interest_by_day).ok_or_else(|| {
            LedgerError::CalculationError {
                message: format!("cannot count days covered by {} at {} per day", amount, interest_by_day),
            }
        })?;

        let interest_amount = interest_for_days(interest_by_day, days_covered)?;
        self.last_interest_payment_date = self
            .last_interest_payment_date
            .checked_add_days(Days::new(days_covered as u64))
            .ok_or_else(|| LedgerError::CalculationError {
                message: format!("{} days after {} is out of range", days_covered, self.last_interest_payment_date),
            })?;

        debug!(
            "advance {}: partial interest {} covers {} days, paid through {}",
            self.id, interest_amount, days_covered, self.last_interest_payment_date
        );

        Ok(InterestPayment {
            rest: amount - interest_amount,
            interest_paid: interest_amount,
            paid_through: self.last_interest_payment_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn thousand_at_point_one_percent() -> Advance {
        Advance::new(date(2024, 1, 1), Money::from_major(1_000), Rate::from_decimal(dec!(0.001)))
    }

    #[test]
    fn test_new_advance_is_open() {
        let advance = thousand_at_point_one_percent();

        assert_eq!(advance.remaining_amount(), Money::from_major(1_000));
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 1));
        assert_eq!(advance.status(), AdvanceStatus::Open);
        assert_eq!(advance.paid_capital(), Money::ZERO);
    }

    #[test]
    fn test_interest_by_day_follows_paydown() {
        let mut advance = thousand_at_point_one_percent();
        assert_eq!(advance.interest_by_day().unwrap(), Money::ONE);

        advance.pay_capital(Money::from_major(500));
        assert_eq!(advance.interest_by_day().unwrap(), money("0.5"));
    }

    #[test]
    fn test_days_since_last_interest_payment() {
        let advance = thousand_at_point_one_percent();

        assert_eq!(advance.days_since_last_interest_payment(date(2024, 1, 5)), 4);
        assert_eq!(advance.days_since_last_interest_payment(date(2024, 1, 1)), 0);
        assert_eq!(advance.days_since_last_interest_payment(date(2023, 12, 1)), 0);
    }

    #[test]
    fn test_interest_payable_balance() {
        let advance = thousand_at_point_one_percent();

        assert_eq!(advance.interest_payable_balance(date(2024, 1, 5)).unwrap(), Money::from_major(4));
        assert_eq!(advance.interest_payable_balance(date(2023, 12, 25)).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_pay_capital_partial() {
        let mut advance = thousand_at_point_one_percent();

        let rest = advance.pay_capital(Money::from_major(400));

        assert_eq!(rest, Money::ZERO);
        assert_eq!(advance.remaining_amount(), Money::from_major(600));
        assert!(!advance.is_closed());
    }

    #[test]
    fn test_pay_capital_exact_closes() {
        let mut advance = thousand_at_point_one_percent();

        let rest = advance.pay_capital(Money::from_major(1_000));

        assert_eq!(rest, Money::ZERO);
        assert!(advance.is_closed());
        assert_eq!(advance.status(), AdvanceStatus::Closed);
    }

    #[test]
    fn test_pay_capital_overpayment_clamps() {
        let mut advance = thousand_at_point_one_percent();

        let rest = advance.pay_capital(money("1250.75"));

        assert_eq!(rest, money("250.75"));
        assert_eq!(advance.remaining_amount(), Money::ZERO);
        assert_eq!(advance.paid_capital(), Money::from_major(1_000));

        // closed stays closed
        assert_eq!(advance.pay_capital(Money::from_major(5)), Money::from_major(5));
        assert!(advance.is_closed());
    }

    #[test]
    fn test_pay_interest_in_full() {
        let mut advance = thousand_at_point_one_percent();

        let payment = advance.pay_interest(Money::from_major(10), date(2024, 1, 5)).unwrap();

        assert_eq!(payment.interest_paid, Money::from_major(4));
        assert_eq!(payment.rest, Money::from_major(6));
        assert_eq!(payment.paid_through, date(2024, 1, 5));
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 5));
        assert_eq!(advance.remaining_amount(), Money::from_major(1_000));
    }

    #[test]
    fn test_pay_interest_partial_day_rounding() {
        let mut advance = thousand_at_point_one_percent();

        let payment = advance.pay_interest(money("2.5"), date(2024, 1, 5)).unwrap();

        assert_eq!(payment.rest, money("0.5"));
        assert_eq!(payment.interest_paid, Money::from_major(2));
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 3));
        assert_eq!(advance.interest_payable_balance(date(2024, 1, 5)).unwrap(), Money::from_major(2));
    }

    #[test]
    fn test_pay_interest_less_than_one_day() {
        let mut advance = thousand_at_point_one_percent();

        let payment = advance.pay_interest(money("0.4"), date(2024, 1, 5)).unwrap();

        assert_eq!(payment.rest, money("0.4"));
        assert_eq!(payment.interest_paid, Money::ZERO);
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 1));
    }

    #[test]
    fn test_pay_interest_never_moves_clock_back() {
        let mut advance = thousand_at_point_one_percent();
        advance.pay_interest(Money::from_major(10), date(2024, 1, 10)).unwrap();

        let payment = advance.pay_interest(Money::from_major(3), date(2024, 1, 4)).unwrap();

        assert_eq!(payment.interest_paid, Money::ZERO);
        assert_eq!(payment.rest, Money::from_major(3));
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 10));
    }

    #[test]
    fn test_zero_rate_pays_nothing() {
        let mut advance = Advance::new(date(2024, 1, 1), Money::from_major(100), Rate::ZERO);

        let payment = advance.pay_interest(Money::from_major(5), date(2024, 2, 1)).unwrap();

        assert_eq!(payment.interest_paid, Money::ZERO);
        assert_eq!(payment.rest, Money::from_major(5));
        assert_eq!(advance.last_interest_payment_date(), date(2024, 2, 1));
    }

    #[test]
    fn test_division_hazard_is_reported() {
        // a negative offer is the only way past the full-payment branch with a
        // zero per-day cost, the ledger rejects those before they get here
        let mut advance = Advance::new(date(2024, 1, 1), Money::from_major(100), Rate::ZERO);

        let err = advance.pay_interest(Money::from_major(-1), date(2024, 1, 3)).unwrap_err();

        assert_eq!(err, LedgerError::DivisionHazard { advance_id: advance.id() });
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 1));
    }

    #[test]
    fn test_overflowing_interest_is_an_error() {
        let mut advance = Advance::new(
            date(2024, 1, 1),
            money("10000000000000000000000000"),
            Rate::from_percentage(1),
        );

        assert!(matches!(
            advance.interest_payable_balance(date(9999, 12, 31)),
            Err(LedgerError::CalculationError { .. })
        ));
        assert!(advance.pay_interest(Money::from_major(5), date(9999, 12, 31)).is_err());
        assert_eq!(advance.last_interest_payment_date(), date(2024, 1, 1));
    }

    #[test]
    fn test_prefunded_advance_is_closed() {
        let advance = Advance::with_remaining(
            date(2024, 1, 1),
            Money::from_major(100),
            Rate::from_percentage(1),
            Money::ZERO,
        );

        assert!(advance.is_closed());
        assert_eq!(advance.initial_amount(), Money::from_major(100));
        assert_eq!(advance.paid_capital(), Money::from_major(100));
    }
}
