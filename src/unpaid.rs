//! Working set of advances that still owe principal.
//!
//! Advances live in an append-only arena owned by the ledger; this set holds
//! arena indices in creation order. Closed advances are evicted lazily, the
//! first time a traversal reaches them or right after a visit closes them.

use std::ops::ControlFlow;

use crate::advance::Advance;
use crate::errors::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UnpaidAdvances {
    order: Vec<usize>,
}

impl UnpaidAdvances {
    pub(crate) fn new() -> Self {
        Self { order: Vec::new() }
    }

    /// track a freshly created advance, closed or not
    pub(crate) fn push(&mut self, index: usize) {
        self.order.push(index);
    }

    /// tracked entries, which may include not yet evicted closed ones
    pub(crate) fn indices(&self) -> &[usize] {
        &self.order
    }

    /// visit open advances in creation order
    ///
    /// `visit` may close the advance it is given; it is then evicted before
    /// the next one is visited. Returning `ControlFlow::Break` or an error
    /// stops further visits, but entries already closed are still evicted in
    /// the same compacting pass. Each tracked index is looked at exactly once.
    pub(crate) fn sweep<F>(&mut self, advances: &mut [Advance], mut visit: F) -> Result<()>
    where
        F: FnMut(&mut Advance) -> Result<ControlFlow<()>>,
    {
        let mut outcome = Ok(());
        let mut stopped = false;

        self.order.retain(|&index| {
            let advance = &mut advances[index];
            if advance.is_closed() {
                return false;
            }
            if stopped {
                return true;
            }
            match visit(advance) {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => stopped = true,
                Err(e) => {
                    outcome = Err(e);
                    stopped = true;
                }
            }
            !advance.is_closed()
        });

        outcome
    }

    /// evict closed advances and return the open ones in creation order
    pub(crate) fn open<'a>(&mut self, advances: &'a [Advance]) -> Vec<&'a Advance> {
        self.order.retain(|&index| !advances[index].is_closed());
        self.order.iter().map(|&index| &advances[index]).collect()
    }
}
