use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// default daily rate for advances that do not set their own
    pub daily_interest_rate: Rate,
    /// cash available before any advance or payment is recorded
    #[serde(default)]
    pub opening_cash_buffer: Money,
}

impl LedgerConfig {
    pub fn new(daily_interest_rate: Rate) -> Self {
        Self {
            daily_interest_rate,
            opening_cash_buffer: Money::ZERO,
        }
    }

    pub fn with_opening_cash_buffer(mut self, cash_buffer: Money) -> Self {
        self.opening_cash_buffer = cash_buffer;
        self
    }

    /// parse and validate a json configuration
    ///
    /// ```json
    /// { "daily_interest_rate": "0.001", "opening_cash_buffer": "200" }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig =
            serde_json::from_str(json).map_err(|e| LedgerError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::InvalidConfiguration {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.daily_interest_rate.is_negative() {
            return Err(LedgerError::InvalidInterestRate {
                rate: self.daily_interest_rate,
            });
        }
        if self.opening_cash_buffer.is_negative() {
            return Err(LedgerError::NegativeAmount {
                amount: self.opening_cash_buffer,
            });
        }
        Ok(())
    }
}
