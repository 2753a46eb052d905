use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{AdvanceId, PaymentId};

/// all events that can be emitted by the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // advance events
    AdvanceRecorded {
        advance_id: AdvanceId,
        amount: Money,
        remaining_amount: Money,
        daily_interest_rate: Rate,
        date: NaiveDate,
    },
    CashBufferApplied {
        advance_id: AdvanceId,
        amount: Money,
        buffer_left: Money,
    },
    AdvanceClosed {
        advance_id: AdvanceId,
        date: NaiveDate,
    },

    // payment events
    PaymentReceived {
        payment_id: PaymentId,
        amount: Money,
        to_interest: Money,
        to_principal: Money,
        excess: Money,
        date: NaiveDate,
    },
    InterestPaid {
        advance_id: AdvanceId,
        amount: Money,
        paid_through: NaiveDate,
    },
    CapitalPaid {
        advance_id: AdvanceId,
        amount: Money,
        remaining_amount: Money,
        date: NaiveDate,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// drop events recorded after `len`, used to undo a failed operation
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }
}
