use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// whole days from `from` to `to`, zero when `to` is not after `from`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}

/// interest one day costs on `principal`
pub fn daily_interest(principal: Money, daily_rate: Rate) -> Result<Money> {
    principal
        .checked_mul(daily_rate.as_decimal())
        .ok_or_else(|| LedgerError::CalculationError {
            message: format!("daily interest on {} at {} overflows", principal, daily_rate),
        })
}

/// interest for `days` full days at `interest_by_day`
pub fn interest_for_days(interest_by_day: Money, days: i64) -> Result<Money> {
    interest_by_day
        .checked_mul(Decimal::from(days))
        .ok_or_else(|| LedgerError::CalculationError {
            message: format!("{} days of interest at {} per day overflows", days, interest_by_day),
        })
}

/// number of full days of interest `amount` can pay for
///
/// `None` when `interest_by_day` is zero, so the caller has to decide what a
/// day that costs nothing means.
pub fn whole_days_covered(amount: Money, interest_by_day: Money) -> Option<i64> {
    if interest_by_day.is_zero() {
        return None;
    }
    amount
        .checked_ratio(interest_by_day)
        .and_then(|days| days.floor().to_i64())
        .map(|days| days.max(0))
}
