use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::AdvanceId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    /// partial interest payment against an advance that accrues nothing per day
    #[error("division hazard: advance {advance_id} has zero interest per day")]
    DivisionHazard {
        advance_id: AdvanceId,
    },

    #[error("negative amount: {amount}")]
    NegativeAmount {
        amount: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
