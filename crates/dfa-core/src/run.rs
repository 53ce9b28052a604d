//! A single evaluation over a transition table.

use crate::table::TransitionTable;
use crate::types::{StateId, Symbol};

/// Cursor of one input sequence through a [`TransitionTable`].
///
/// Holds nothing but the current state and a sticky failure flag, so it is
/// `Copy` and can be dropped at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    current_state: StateId,
    failed: bool,
}

impl Run {
    /// A fresh run at the table's start state.
    pub fn new(table: &TransitionTable) -> Self {
        Self::at(table.start())
    }

    /// A fresh run at an explicit state.
    pub fn at(state: StateId) -> Self {
        Self {
            current_state: state,
            failed: false,
        }
    }

    /// Current state, or `None` once an undefined transition was hit.
    #[inline]
    pub fn current_state(&self) -> Option<StateId> {
        if self.failed {
            None
        } else {
            Some(self.current_state)
        }
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Advance by one symbol. Once failed, the run never changes again.
    #[inline]
    pub fn step(&mut self, table: &TransitionTable, symbol: Symbol) {
        if self.failed {
            return;
        }
        match table.next_state(self.current_state, symbol) {
            Some(next) => self.current_state = next,
            None => self.failed = true,
        }
    }

    /// Feed every symbol of `symbols` in order.
    pub fn feed<I>(&mut self, table: &TransitionTable, symbols: I)
    where
        I: IntoIterator<Item = Symbol>,
    {
        for symbol in symbols {
            if self.failed {
                break;
            }
            self.step(table, symbol);
        }
    }

    /// True iff the run has not failed and sits in an accepting state.
    #[inline]
    pub fn matches(&self, table: &TransitionTable) -> bool {
        !self.failed && table.is_accepting(self.current_state)
    }
}
