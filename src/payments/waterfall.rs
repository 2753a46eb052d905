use std::ops::ControlFlow;

use chrono::NaiveDate;
use log::{debug, info};

use crate::advance::Advance;
use crate::decimal::Money;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::types::PaymentAllocation;
use crate::unpaid::UnpaidAdvances;

/// result of the interest pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InterestSweep {
    pub cash_remaining: Money,
    pub interest_collected: Money,
}

/// result of the capital pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CapitalSweep {
    pub cash_remaining: Money,
    pub capital_collected: Money,
    pub advances_closed: usize,
}

/// apply `cash` to accrued interest, oldest open advance first
///
/// Every advance is evaluated at `payment_date`. Stops as soon as the cash
/// runs out; a partial payment only credits whole days of interest.
pub(crate) fn sweep_interest(
    advances: &mut [Advance],
    unpaid: &mut UnpaidAdvances,
    cash: Money,
    payment_date: NaiveDate,
    events: &mut EventStore,
) -> Result<InterestSweep> {
    let mut cash = cash;
    let mut interest_collected = Money::ZERO;

    unpaid.sweep(advances, |advance| {
        if cash.is_zero() {
            return Ok(ControlFlow::Break(()));
        }

        let payment = advance.pay_interest(cash, payment_date)?;
        cash = payment.rest;
        interest_collected += payment.interest_paid;

        if !payment.interest_paid.is_zero() {
            debug!(
                "interest {} paid on advance {} through {}",
                payment.interest_paid,
                advance.id(),
                payment.paid_through
            );
            events.emit(Event::InterestPaid {
                advance_id: advance.id(),
                amount: payment.interest_paid,
                paid_through: payment.paid_through,
            });
        }

        Ok(ControlFlow::Continue(()))
    })?;

    Ok(InterestSweep {
        cash_remaining: cash,
        interest_collected,
    })
}

/// apply `cash` to principal, oldest open advance first
pub(crate) fn sweep_capital(
    advances: &mut [Advance],
    unpaid: &mut UnpaidAdvances,
    cash: Money,
    payment_date: NaiveDate,
    events: &mut EventStore,
) -> Result<CapitalSweep> {
    let mut cash = cash;
    let mut capital_collected = Money::ZERO;
    let mut advances_closed = 0;

    unpaid.sweep(advances, |advance| {
        if cash.is_zero() {
            return Ok(ControlFlow::Break(()));
        }

        let rest = advance.pay_capital(cash);
        let paid = cash - rest;
        cash = rest;
        capital_collected += paid;

        debug!("capital {} paid on advance {}", paid, advance.id());
        events.emit(Event::CapitalPaid {
            advance_id: advance.id(),
            amount: paid,
            remaining_amount: advance.remaining_amount(),
            date: payment_date,
        });

        if advance.is_closed() {
            advances_closed += 1;
            debug!("advance {} closed on {}", advance.id(), payment_date);
            events.emit(Event::AdvanceClosed {
                advance_id: advance.id(),
                date: payment_date,
            });
        }

        Ok(ControlFlow::Continue(()))
    })?;

    Ok(CapitalSweep {
        cash_remaining: cash,
        capital_collected,
        advances_closed,
    })
}

/// run the interest pass and then the capital pass over the open advances
///
/// Interest has to be settled first: paying down capital lowers the base the
/// outstanding interest was accrued on.
pub(crate) fn allocate(
    advances: &mut [Advance],
    unpaid: &mut UnpaidAdvances,
    cash: Money,
    payment_date: NaiveDate,
    events: &mut EventStore,
) -> Result<PaymentAllocation> {
    let interest = sweep_interest(advances, unpaid, cash, payment_date, events)?;
    let capital = sweep_capital(advances, unpaid, interest.cash_remaining, payment_date, events)?;
    if capital.advances_closed > 0 {
        info!("{} advances closed by payment on {}", capital.advances_closed, payment_date);
    }

    Ok(PaymentAllocation {
        to_interest: interest.interest_collected,
        to_principal: capital.capital_collected,
        excess: capital.cash_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn book(amounts: &[i64]) -> (Vec<Advance>, UnpaidAdvances) {
        let mut advances = Vec::new();
        let mut unpaid = UnpaidAdvances::new();
        for &amount in amounts {
            advances.push(Advance::new(
                date(2024, 1, 1),
                Money::from_major(amount),
                Rate::from_decimal(dec!(0.01)),
            ));
            unpaid.push(advances.len() - 1);
        }
        (advances, unpaid)
    }

    #[test]
    fn test_interest_sweep_in_creation_order() {
        let (mut advances, mut unpaid) = book(&[100, 50]);
        let mut events = EventStore::new();

        let sweep = sweep_interest(&mut advances, &mut unpaid, Money::from_major(60), date(2024, 1, 2), &mut events)
            .unwrap();

        assert_eq!(sweep.interest_collected, money("1.5"));
        assert_eq!(sweep.cash_remaining, money("58.5"));
        assert_eq!(advances[0].last_interest_payment_date(), date(2024, 1, 2));
        assert_eq!(advances[1].last_interest_payment_date(), date(2024, 1, 2));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_interest_sweep_partial_days_across_advances() {
        let (mut advances, mut unpaid) = book(&[100, 50]);
        let mut events = EventStore::new();

        // ten days accrued on A costs 10, only 7 whole days are affordable
        let sweep = sweep_interest(&mut advances, &mut unpaid, money("7.5"), date(2024, 1, 11), &mut events)
            .unwrap();

        assert_eq!(advances[0].last_interest_payment_date(), date(2024, 1, 8));

        // the 0.5 left over buys exactly one of B's days
        assert_eq!(advances[1].last_interest_payment_date(), date(2024, 1, 2));
        assert_eq!(sweep.interest_collected, money("7.5"));
        assert_eq!(sweep.cash_remaining, Money::ZERO);
    }

    #[test]
    fn test_interest_sweep_stops_on_empty_buffer() {
        let (mut advances, mut unpaid) = book(&[100, 50]);
        let mut events = EventStore::new();

        let sweep = sweep_interest(&mut advances, &mut unpaid, Money::from_major(10), date(2024, 1, 11), &mut events)
            .unwrap();

        assert_eq!(sweep.cash_remaining, Money::ZERO);
        assert_eq!(advances[1].last_interest_payment_date(), date(2024, 1, 1));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_capital_sweep_closes_and_carries_rest() {
        let (mut advances, mut unpaid) = book(&[10, 20, 30]);
        let mut events = EventStore::new();

        let sweep = sweep_capital(&mut advances, &mut unpaid, Money::from_major(35), date(2024, 1, 1), &mut events)
            .unwrap();

        assert_eq!(sweep.capital_collected, Money::from_major(35));
        assert_eq!(sweep.cash_remaining, Money::ZERO);
        assert_eq!(sweep.advances_closed, 2);
        assert_eq!(advances[2].remaining_amount(), Money::from_major(25));
        assert_eq!(unpaid.indices(), &[2]);
    }

    #[test]
    fn test_capital_sweep_overpayment_left_as_excess() {
        let (mut advances, mut unpaid) = book(&[10]);
        let mut events = EventStore::new();

        let sweep = sweep_capital(&mut advances, &mut unpaid, Money::from_major(15), date(2024, 1, 1), &mut events)
            .unwrap();

        assert_eq!(sweep.cash_remaining, Money::from_major(5));
        assert!(unpaid.indices().is_empty());
        assert!(events.events().iter().any(|e| matches!(e, Event::AdvanceClosed { .. })));
    }

    #[test]
    fn test_allocate_interest_before_capital() {
        let (mut advances, mut unpaid) = book(&[100, 50]);
        let mut events = EventStore::new();

        let allocation = allocate(&mut advances, &mut unpaid, Money::from_major(60), date(2024, 1, 2), &mut events)
            .unwrap();

        assert_eq!(allocation.to_interest, money("1.5"));
        assert_eq!(allocation.to_principal, money("58.5"));
        assert_eq!(allocation.excess, Money::ZERO);
        assert_eq!(advances[0].remaining_amount(), money("41.5"));
        assert_eq!(advances[1].remaining_amount(), Money::from_major(50));
    }

    #[test]
    fn test_allocate_interest_only_leaves_capital() {
        let (mut advances, mut unpaid) = book(&[100]);
        let mut events = EventStore::new();

        let allocation = allocate(&mut advances, &mut unpaid, Money::from_major(5), date(2024, 1, 6), &mut events)
            .unwrap();

        assert_eq!(allocation.to_interest, Money::from_major(5));
        assert_eq!(allocation.to_principal, Money::ZERO);
        assert_eq!(advances[0].remaining_amount(), Money::from_major(100));
    }
}
