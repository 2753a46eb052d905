use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for an advance
pub type AdvanceId = Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// advance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceStatus {
    /// principal still outstanding
    Open,
    /// principal fully repaid, never reopens
    Closed,
}

/// outcome of paying interest on a single advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestPayment {
    /// part of the offered amount that was not used
    pub rest: Money,
    /// interest actually credited
    pub interest_paid: Money,
    /// the advance's last interest payment date after the call
    pub paid_through: NaiveDate,
}

/// how a payment was split across the open advances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PaymentAllocation {
    pub to_interest: Money,
    pub to_principal: Money,
    /// cash left in the buffer after both sweeps
    pub excess: Money,
}

impl PaymentAllocation {
    pub fn total_applied(&self) -> Money {
        self.to_interest + self.to_principal
    }
}
