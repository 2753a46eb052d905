use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::{debug, info, warn};

use crate::advance::Advance;
use crate::config::LedgerConfig;
use crate::dates::next_day;
use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::payments::{self, Payment};
use crate::serialization::LedgerView;
use crate::types::{AdvanceId, PaymentAllocation};
use crate::unpaid::UnpaidAdvances;

/// a customer's advances, payments and unallocated cash
#[derive(Debug, Clone)]
pub struct Ledger {
    advances: Vec<Advance>,
    unpaid: UnpaidAdvances,
    payments: Vec<Payment>,
    daily_interest_rate: Rate,
    cash_buffer: Money,
    interest_paid: Money,
    events: EventStore,
}

impl Ledger {
    /// create a ledger from a validated configuration
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        info!(
            "ledger created: daily rate {}, opening cash buffer {}",
            config.daily_interest_rate, config.opening_cash_buffer
        );

        Ok(Self {
            advances: Vec::new(),
            unpaid: UnpaidAdvances::new(),
            payments: Vec::new(),
            daily_interest_rate: config.daily_interest_rate,
            cash_buffer: config.opening_cash_buffer,
            interest_paid: Money::ZERO,
            events: EventStore::new(),
        })
    }

    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::new()
    }

    /// record a new advance at the ledger's default rate
    pub fn add_advance(&mut self, advance_date: NaiveDate, amount: Money) -> Result<AdvanceId> {
        self.add_advance_with_rate(advance_date, amount, None)
    }

    /// record a new advance, optionally overriding the daily rate
    ///
    /// Available cash is used first; only what it does not cover stays
    /// outstanding. A fully pre-funded advance is still recorded.
    pub fn add_advance_with_rate(
        &mut self,
        advance_date: NaiveDate,
        amount: Money,
        daily_interest_rate: Option<Rate>,
    ) -> Result<AdvanceId> {
        if amount.is_negative() {
            warn!("rejected advance of {} on {}", amount, advance_date);
            return Err(LedgerError::NegativeAmount { amount });
        }
        let rate = daily_interest_rate.unwrap_or(self.daily_interest_rate);
        if rate.is_negative() {
            warn!("rejected advance with daily rate {}", rate);
            return Err(LedgerError::InvalidInterestRate { rate });
        }

        let buffer_before = self.cash_buffer;
        let remaining_amount = if self.cash_buffer > amount {
            self.cash_buffer -= amount;
            Money::ZERO
        } else {
            let remaining = amount - self.cash_buffer;
            self.cash_buffer = Money::ZERO;
            remaining
        };

        let advance = Advance::with_remaining(advance_date, amount, rate, remaining_amount);
        let advance_id = advance.id();
        debug!(
            "advance {} of {} on {}: {} outstanding at {}",
            advance_id, amount, advance_date, remaining_amount, rate
        );

        self.events.emit(Event::AdvanceRecorded {
            advance_id,
            amount,
            remaining_amount,
            daily_interest_rate: rate,
            date: advance_date,
        });
        if buffer_before.is_positive() {
            self.events.emit(Event::CashBufferApplied {
                advance_id,
                amount: buffer_before - self.cash_buffer,
                buffer_left: self.cash_buffer,
            });
        }

        self.advances.push(advance);
        self.unpaid.push(self.advances.len() - 1);

        Ok(advance_id)
    }

    /// record an advance dated today according to `time_provider`
    pub fn add_advance_with_time(
        &mut self,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<AdvanceId> {
        self.add_advance(time_provider.now().date_naive(), amount)
    }

    /// record a payment and allocate the cash buffer to interest, then capital
    ///
    /// Either the whole payment is applied or, on error, the ledger is left
    /// exactly as it was before the call.
    pub fn add_payment(&mut self, payment_date: NaiveDate, amount: Money) -> Result<PaymentAllocation> {
        if amount.is_negative() {
            warn!("rejected payment of {} on {}", amount, payment_date);
            return Err(LedgerError::NegativeAmount { amount });
        }

        let cash = self
            .cash_buffer
            .checked_add(amount)
            .ok_or_else(|| LedgerError::CalculationError {
                message: format!("cash buffer {} plus payment {} overflows", self.cash_buffer, amount),
            })?;

        // sweeps only touch advances still tracked as unpaid
        let checkpoint = Checkpoint {
            advances: self
                .unpaid
                .indices()
                .iter()
                .map(|&index| (index, self.advances[index].clone()))
                .collect(),
            unpaid: self.unpaid.clone(),
            event_count: self.events.len(),
        };
        let payment = Payment::new(payment_date, amount);
        let payment_id = payment.id;

        let allocation = match payments::allocate(
            &mut self.advances,
            &mut self.unpaid,
            cash,
            payment_date,
            &mut self.events,
        ) {
            Ok(allocation) => allocation,
            Err(e) => {
                warn!("payment of {} on {} rolled back: {}", amount, payment_date, e);
                self.restore(checkpoint);
                return Err(e);
            }
        };

        self.payments.push(payment);
        self.cash_buffer = allocation.excess;
        self.interest_paid += allocation.to_interest;

        debug!(
            "payment {} of {} on {}: interest {}, principal {}, buffer {}",
            payment_id, amount, payment_date, allocation.to_interest, allocation.to_principal, allocation.excess
        );
        self.events.emit(Event::PaymentReceived {
            payment_id,
            amount,
            to_interest: allocation.to_interest,
            to_principal: allocation.to_principal,
            excess: allocation.excess,
            date: payment_date,
        });

        Ok(allocation)
    }

    /// record a payment dated today according to `time_provider`
    pub fn add_payment_with_time(
        &mut self,
        amount: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentAllocation> {
        self.add_payment(time_provider.now().date_naive(), amount)
    }

    /// principal still owed across all open advances
    ///
    /// Evicts advances that have closed since the last traversal.
    pub fn advances_balance(&mut self) -> Money {
        self.unpaid.open(&self.advances).into_iter().map(Advance::remaining_amount).sum()
    }

    /// interest accrued on open advances through the end of `to_date`
    pub fn interest_payable_balance(&mut self, to_date: NaiveDate) -> Result<Money> {
        let cutoff = next_day(to_date)?;
        self.unpaid
            .open(&self.advances)
            .into_iter()
            .try_fold(Money::ZERO, |total, advance| {
                checked_total(total, advance.interest_payable_balance(cutoff)?)
            })
    }

    /// interest accrued through today according to `time_provider`
    pub fn interest_payable_balance_with_time(&mut self, time_provider: &SafeTimeProvider) -> Result<Money> {
        self.interest_payable_balance(time_provider.now().date_naive())
    }

    /// principal plus interest owed through the end of `to_date`
    pub fn total_payable(&mut self, to_date: NaiveDate) -> Result<Money> {
        let interest = self.interest_payable_balance(to_date)?;
        checked_total(self.advances_balance(), interest)
    }

    pub fn advances(&self) -> &[Advance] {
        &self.advances
    }

    pub fn advance(&self, id: AdvanceId) -> Option<&Advance> {
        self.advances.iter().find(|advance| advance.id() == id)
    }

    /// open advances in creation order, without evicting anything
    pub fn open_advances(&self) -> impl Iterator<Item = &Advance> {
        self.unpaid
            .indices()
            .iter()
            .map(|&index| &self.advances[index])
            .filter(|advance| !advance.is_closed())
    }

    pub fn open_advance_count(&self) -> usize {
        self.open_advances().count()
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn daily_interest_rate(&self) -> Rate {
        self.daily_interest_rate
    }

    pub fn cash_buffer(&self) -> Money {
        self.cash_buffer
    }

    /// interest collected over the ledger's lifetime
    pub fn interest_paid(&self) -> Money {
        self.interest_paid
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// pretty json view of the ledger for debugging and monitoring
    pub fn json(&self) -> String {
        LedgerView::from_ledger(self)
            .to_json_pretty()
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        for (index, advance) in checkpoint.advances {
            self.advances[index] = advance;
        }
        self.unpaid = checkpoint.unpaid;
        self.events.truncate(checkpoint.event_count);
    }
}

/// state a payment may change, captured before its sweeps run
struct Checkpoint {
    advances: Vec<(usize, Advance)>,
    unpaid: UnpaidAdvances,
    event_count: usize,
}

fn checked_total(total: Money, amount: Money) -> Result<Money> {
    total.checked_add(amount).ok_or_else(|| LedgerError::CalculationError {
        message: format!("{} plus {} overflows", total, amount),
    })
}

/// builder for a ledger
#[derive(Debug, Default)]
pub struct LedgerBuilder {
    daily_interest_rate: Option<Rate>,
    cash_buffer: Option<Money>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self {
            daily_interest_rate: None,
            cash_buffer: None,
        }
    }

    pub fn daily_interest_rate(mut self, rate: Rate) -> Self {
        self.daily_interest_rate = Some(rate);
        self
    }

    pub fn cash_buffer(mut self, cash_buffer: Money) -> Self {
        self.cash_buffer = Some(cash_buffer);
        self
    }

    /// start from an existing configuration
    pub fn config(mut self, config: LedgerConfig) -> Self {
        self.daily_interest_rate = Some(config.daily_interest_rate);
        self.cash_buffer = Some(config.opening_cash_buffer);
        self
    }

    pub fn build(self) -> Result<Ledger> {
        let rate = self.daily_interest_rate.ok_or(LedgerError::InvalidConfiguration {
            message: "daily interest rate is required".to_string(),
        })?;
        let config = LedgerConfig::new(rate).with_opening_cash_buffer(self.cash_buffer.unwrap_or(Money::ZERO));
        Ledger::new(config)
    }
}
