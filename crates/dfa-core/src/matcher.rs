//! Matching Engine
//!
//! Every candidate token goes through here. The hot path does no allocation:
//! `evaluate` keeps a single `Copy` run on the stack.

use crate::run::Run;
use crate::table::TransitionTable;
use crate::types::{StateId, Symbol};

// =============================================================================
// Matcher
// =============================================================================

/// Evaluates inputs against a borrowed transition table.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    table: &'a TransitionTable,
}

/// Step-by-step record of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTrace {
    /// States entered, starting with the start state.
    pub visited: Vec<StateId>,
    /// Char index of the first symbol with no transition.
    pub failed_at: Option<usize>,
    pub matched: bool,
}

impl<'a> Matcher<'a> {
    pub fn new(table: &'a TransitionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'a TransitionTable {
        self.table
    }

    /// A fresh run at the start state.
    pub fn run(&self) -> Run {
        Run::new(self.table)
    }

    /// Feed `input` char by char and report whether the whole of it is accepted.
    #[inline]
    pub fn evaluate(&self, input: &str) -> bool {
        self.evaluate_symbols(input.chars())
    }

    pub fn evaluate_symbols<I>(&self, symbols: I) -> bool
    where
        I: IntoIterator<Item = Symbol>,
    {
        let mut run = self.run();
        run.feed(self.table, symbols);
        run.matches(self.table)
    }

    /// Keep the candidates that are accepted, preserving order.
    pub fn filter<'s, I>(&self, candidates: I) -> Vec<&'s str>
    where
        I: IntoIterator<Item = &'s str>,
    {
        candidates
            .into_iter()
            .filter(|candidate| self.evaluate(candidate))
            .collect()
    }

    /// Evaluate `input` while recording every state visited.
    pub fn trace(&self, input: &str) -> MatchTrace {
        let mut run = self.run();
        let mut visited = vec![self.table.start()];
        let mut failed_at = None;

        for (pos, symbol) in input.chars().enumerate() {
            run.step(self.table, symbol);
            match run.current_state() {
                Some(state) => visited.push(state),
                None => {
                    log::trace!("no transition on {:?} at position {}", symbol, pos);
                    failed_at = Some(pos);
                    break;
                }
            }
        }

        MatchTrace {
            visited,
            failed_at,
            matched: run.matches(self.table),
        }
    }
}
