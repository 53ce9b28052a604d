//! DFA Core Library
//!
//! This crate provides a table-driven deterministic finite automaton that
//! matches a stream of symbols incrementally.
//!
//! # Architecture
//!
//! A [`TransitionTable`] is built once (through [`TableBuilder`], which rejects
//! any state that has two successors for the same symbol) and is read-only
//! afterwards. A [`Run`] is a two-field cursor over it: the current state and a
//! sticky failure flag. An undefined transition is not an error, it sends the
//! run into an absorbing failed state that [`Run::matches`] reports as `false`.
//!
//! # Modules
//!
//! - `types`: State ids, symbols and transition triples
//! - `table`: Transition table and its builder
//! - `run`: Per-input cursor with `step` / `matches`
//! - `matcher`: Whole-input evaluation, filtering and tracing
//! - `patterns`: Built-in tables (`ab*c`)

pub mod matcher;
pub mod patterns;
pub mod run;
pub mod table;
pub mod types;

// Re-export commonly used types
pub use matcher::{MatchTrace, Matcher};
pub use patterns::{ab_star_c, AbStarC};
pub use run::Run;
pub use table::{TableBuilder, TableError, TransitionTable};
pub use types::{StateId, Symbol, Transition};

/// Evaluate `symbols` from a fresh run and report acceptance.
pub fn evaluate<I>(table: &TransitionTable, symbols: I) -> bool
where
    I: IntoIterator<Item = Symbol>,
{
    let mut run = Run::new(table);
    run.feed(table, symbols);
    run.matches(table)
}
