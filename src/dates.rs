//! Calendar date helpers for the ledger boundary.
//!
//! The ledger works on `NaiveDate` only: no time of day, no timezone.

use chrono::NaiveDate;

use crate::errors::{LedgerError, Result};

const ISO_DATE: &str = "%Y-%m-%d";

/// parse an ISO 8601 calendar date (`YYYY-MM-DD`)
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    // chrono accepts unpadded fields, the ledger only takes the canonical form
    if trimmed.len() != 10 {
        return Err(LedgerError::InvalidDate {
            message: format!("expected YYYY-MM-DD, got {:?}", raw),
        });
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE).map_err(|e| LedgerError::InvalidDate {
        message: format!("{:?}: {}", raw, e),
    })
}

/// the day after `date`
pub fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt().ok_or_else(|| LedgerError::InvalidDate {
        message: format!("no day after {}", date),
    })
}
