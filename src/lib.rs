pub mod advance;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod payments;
pub mod serialization;
pub mod types;
mod unpaid;

// re-export key types
pub use advance::Advance;
pub use config::LedgerConfig;
pub use dates::parse_date;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{Event, EventStore};
pub use interest::InterestCalculation;
pub use ledger::{Ledger, LedgerBuilder};
pub use payments::Payment;
pub use serialization::{AdvanceView, LedgerView};
pub use types::{AdvanceId, AdvanceStatus, InterestPayment, PaymentAllocation, PaymentId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
