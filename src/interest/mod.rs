pub mod accrual;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use accrual::{daily_interest, days_between, interest_for_days, whole_days_covered};

/// interest accrued on one advance up to an evaluation date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub interest_by_day: Money,
    pub daily_rate: Rate,
    pub days: i64,
    pub principal_base: Money,
    pub accrued_from: NaiveDate,
    pub accrued_to: NaiveDate,
}

impl InterestCalculation {
    /// simple daily interest on `principal` from `from` (exclusive) to `to`
    pub fn simple(principal: Money, daily_rate: Rate, from: NaiveDate, to: NaiveDate) -> Result<Self> {
        let interest_by_day = daily_interest(principal, daily_rate)?;
        let days = days_between(from, to);

        Ok(Self {
            interest_amount: interest_for_days(interest_by_day, days)?,
            interest_by_day,
            daily_rate,
            days,
            principal_base: principal,
            accrued_from: from,
            accrued_to: to.max(from),
        })
    }
}
