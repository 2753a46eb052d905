mod waterfall;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::PaymentId;

pub(crate) use waterfall::allocate;

/// an amount received from the customer on a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub creation_date: NaiveDate,
    pub amount: Money,
}

impl Payment {
    pub fn new(creation_date: NaiveDate, amount: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            creation_date,
            amount,
        }
    }
}
