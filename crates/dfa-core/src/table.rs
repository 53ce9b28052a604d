//! Transition Table
//!
//! The immutable lookup structure a run is evaluated against. Each state owns a
//! row of `(symbol, next)` pairs sorted by symbol, so a lookup is a binary
//! search over that state's out-degree.

use std::collections::{BTreeMap, HashMap};

use crate::types::{escape_symbol, StateId, Symbol, Transition, MAX_STATES};

/// Error type for table construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Ambiguous transition: state '{state}' on '{symbol}' goes to both '{existing}' and '{conflicting}'")]
    AmbiguousTransition {
        state: String,
        symbol: String,
        existing: String,
        conflicting: String,
    },
    #[error("Unknown state: {0}")]
    UnknownState(String),
    #[error("Duplicate state: {0}")]
    DuplicateState(String),
    #[error("Too many states: limit is {0}")]
    TooManyStates(usize),
    #[error("No start state designated")]
    MissingStart,
}

// =============================================================================
// TransitionTable
// =============================================================================

/// A deterministic transition table.
///
/// Read-only once built, so a single table can back any number of runs on any
/// number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    names: Vec<String>,
    accepting: Vec<bool>,
    rows: Vec<Vec<(Symbol, StateId)>>,
    start: StateId,
}

impl TransitionTable {
    /// Start a new builder.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Assemble a table from rows that are already sorted and deterministic.
    pub(crate) fn from_sorted_parts(
        names: Vec<String>,
        accepting: Vec<bool>,
        rows: Vec<Vec<(Symbol, StateId)>>,
        start: StateId,
    ) -> Self {
        debug_assert_eq!(names.len(), accepting.len());
        debug_assert_eq!(names.len(), rows.len());
        debug_assert!(rows.iter().all(|row| row.windows(2).all(|w| w[0].0 < w[1].0)));
        Self {
            names,
            accepting,
            rows,
            start,
        }
    }

    /// The designated initial state.
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Successor of `state` on `symbol`, or `None` when the transition is undefined.
    #[inline]
    pub fn next_state(&self, state: StateId, symbol: Symbol) -> Option<StateId> {
        let row = self.rows.get(state.index())?;
        row.binary_search_by_key(&symbol, |&(s, _)| s)
            .ok()
            .map(|pos| row[pos].1)
    }

    #[inline]
    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.get(state.index()).copied().unwrap_or(false)
    }

    pub fn state_count(&self) -> usize {
        self.names.len()
    }

    pub fn transition_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn state_name(&self, state: StateId) -> Option<&str> {
        self.names.get(state.index()).map(String::as_str)
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(StateId::from_index)
    }

    /// All states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.names.len()).filter_map(StateId::from_index)
    }

    pub fn accepting_states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states().filter(move |&s| self.is_accepting(s))
    }

    /// Every transition, grouped by source state and ordered by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.states().flat_map(move |from| {
            self.rows[from.index()]
                .iter()
                .map(move |&(symbol, to)| Transition { from, symbol, to })
        })
    }

    /// Outgoing transitions of a single state.
    pub fn row(&self, state: StateId) -> &[(Symbol, StateId)] {
        self.rows.get(state.index()).map(Vec::as_slice).unwrap_or(&[])
    }
}

// =============================================================================
// TableBuilder
// =============================================================================

/// Collects states and triples, rejecting any non-determinism.
#[derive(Debug, Default)]
pub struct TableBuilder {
    names: Vec<String>,
    index: HashMap<String, StateId>,
    accepting: Vec<bool>,
    transitions: BTreeMap<(StateId, Symbol), StateId>,
    start: Option<StateId>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new state.
    pub fn add_state(&mut self, name: &str) -> Result<StateId, TableError> {
        if self.index.contains_key(name) {
            return Err(TableError::DuplicateState(name.to_string()));
        }
        if self.names.len() >= MAX_STATES {
            return Err(TableError::TooManyStates(MAX_STATES));
        }
        let id = StateId::from_index(self.names.len()).ok_or(TableError::TooManyStates(MAX_STATES))?;
        self.names.push(name.to_string());
        self.accepting.push(false);
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a declared state by name.
    pub fn state(&self, name: &str) -> Result<StateId, TableError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TableError::UnknownState(name.to_string()))
    }

    pub fn set_start(&mut self, state: StateId) -> Result<(), TableError> {
        self.check(state)?;
        self.start = Some(state);
        Ok(())
    }

    pub fn set_accepting(&mut self, state: StateId) -> Result<(), TableError> {
        self.check(state)?;
        self.accepting[state.index()] = true;
        Ok(())
    }

    /// Register a `(from, symbol) -> to` triple.
    ///
    /// Registering the same triple twice is a no-op; registering a different
    /// successor for an existing `(from, symbol)` fails.
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) -> Result<(), TableError> {
        self.check(from)?;
        self.check(to)?;
        match self.transitions.get(&(from, symbol)).copied() {
            Some(existing) if existing == to => {
                log::debug!(
                    "ignoring repeated transition {} '{}' {}",
                    self.names[from.index()],
                    escape_symbol(symbol),
                    self.names[to.index()]
                );
                Ok(())
            }
            Some(existing) => Err(TableError::AmbiguousTransition {
                state: self.names[from.index()].clone(),
                symbol: escape_symbol(symbol),
                existing: self.names[existing.index()].clone(),
                conflicting: self.names[to.index()].clone(),
            }),
            None => {
                self.transitions.insert((from, symbol), to);
                Ok(())
            }
        }
    }

    /// Register a triple by state names.
    pub fn add_named_transition(&mut self, from: &str, symbol: Symbol, to: &str) -> Result<(), TableError> {
        let from = self.state(from)?;
        let to = self.state(to)?;
        self.add_transition(from, symbol, to)
    }

    pub fn build(self) -> Result<TransitionTable, TableError> {
        let start = self.start.ok_or(TableError::MissingStart)?;

        let mut rows: Vec<Vec<(Symbol, StateId)>> = vec![Vec::new(); self.names.len()];
        // BTreeMap iteration is ordered by (state, symbol), so rows come out sorted.
        for ((from, symbol), to) in self.transitions {
            rows[from.index()].push((symbol, to));
        }

        log::debug!(
            "built transition table: {} states, {} transitions, {} accepting",
            self.names.len(),
            rows.iter().map(Vec::len).sum::<usize>(),
            self.accepting.iter().filter(|&&a| a).count()
        );

        Ok(TransitionTable::from_sorted_parts(self.names, self.accepting, rows, start))
    }

    fn check(&self, state: StateId) -> Result<(), TableError> {
        if state.index() < self.names.len() {
            Ok(())
        } else {
            Err(TableError::UnknownState(state.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_table() -> TransitionTable {
        let mut builder = TransitionTable::builder();
        let a = builder.add_state("A").unwrap();
        let b = builder.add_state("B").unwrap();
        builder.set_start(a).unwrap();
        builder.set_accepting(b).unwrap();
        builder.add_transition(a, 'x', b).unwrap();
        builder.add_transition(b, 'z', a).unwrap();
        builder.add_transition(b, 'y', b).unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_lookup() {
        let table = two_state_table();
        let a = table.state_id("A").unwrap();
        let b = table.state_id("B").unwrap();
        assert_eq!(table.start(), a);
        assert_eq!(table.next_state(a, 'x'), Some(b));
        assert_eq!(table.next_state(a, 'y'), None);
        assert_eq!(table.next_state(b, 'y'), Some(b));
        assert_eq!(table.next_state(b, 'z'), Some(a));
        assert!(table.is_accepting(b));
        assert!(!table.is_accepting(a));
    }

    #[test]
    fn test_rows_are_sorted() {
        let table = two_state_table();
        let b = table.state_id("B").unwrap();
        let symbols: Vec<char> = table.row(b).iter().map(|&(s, _)| s).collect();
        assert_eq!(symbols, vec!['y', 'z']);
        assert_eq!(table.transition_count(), 3);
        assert_eq!(table.transitions().count(), 3);
    }

    #[test]
    fn test_foreign_state_id_has_no_transitions() {
        let table = two_state_table();
        let foreign = StateId(42);
        assert_eq!(table.next_state(foreign, 'x'), None);
        assert!(!table.is_accepting(foreign));
        assert!(table.row(foreign).is_empty());
        assert_eq!(table.state_name(foreign), None);
    }

    #[test]
    fn test_ambiguous_transition_rejected() {
        let mut builder = TableBuilder::new();
        let a = builder.add_state("A").unwrap();
        let b = builder.add_state("B").unwrap();
        let c = builder.add_state("C").unwrap();
        builder.add_transition(a, 'x', b).unwrap();
        let err = builder.add_transition(a, 'x', c).unwrap_err();
        assert_eq!(
            err,
            TableError::AmbiguousTransition {
                state: "A".into(),
                symbol: "x".into(),
                existing: "B".into(),
                conflicting: "C".into(),
            }
        );
    }

    #[test]
    fn test_repeated_identical_transition_is_accepted() {
        let mut builder = TableBuilder::new();
        let a = builder.add_state("A").unwrap();
        builder.set_start(a).unwrap();
        builder.add_transition(a, 'x', a).unwrap();
        builder.add_transition(a, 'x', a).unwrap();
        let table = builder.build().unwrap();
        assert_eq!(table.transition_count(), 1);
    }

    #[test]
    fn test_duplicate_and_unknown_states() {
        let mut builder = TableBuilder::new();
        builder.add_state("A").unwrap();
        assert_eq!(builder.add_state("A"), Err(TableError::DuplicateState("A".into())));
        assert_eq!(
            builder.add_named_transition("A", 'x', "Nope"),
            Err(TableError::UnknownState("Nope".into()))
        );
        assert_eq!(
            builder.set_start(StateId(7)),
            Err(TableError::UnknownState("#7".into()))
        );
    }

    #[test]
    fn test_missing_start() {
        let mut builder = TableBuilder::new();
        builder.add_state("A").unwrap();
        assert_eq!(builder.build(), Err(TableError::MissingStart));
    }

    #[test]
    fn test_empty_accepting_set_is_allowed() {
        let mut builder = TableBuilder::new();
        let a = builder.add_state("A").unwrap();
        builder.set_start(a).unwrap();
        let table = builder.build().unwrap();
        assert_eq!(table.accepting_states().count(), 0);
    }

    #[test]
    fn test_table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TransitionTable>();
    }
}
