//! Core type definitions for the DFA engine.

use std::fmt;

/// A single unit of input.
pub type Symbol = char;

/// Maximum number of states a table can hold.
pub const MAX_STATES: usize = u16::MAX as usize;

// =============================================================================
// State Identifiers
// =============================================================================

/// Identifier of a state inside a [`TransitionTable`](crate::table::TransitionTable).
///
/// Ids are dense indices assigned in declaration order. They are only
/// meaningful for the table (or builder) that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u16);

impl StateId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Option<Self> {
        u16::try_from(index).ok().map(Self)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// One (state, symbol, next-state) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    pub from: StateId,
    pub symbol: Symbol,
    pub to: StateId,
}

/// Render a symbol the way the definition format spells it.
pub fn escape_symbol(symbol: Symbol) -> String {
    match symbol {
        ' ' => "\\s".to_string(),
        '\t' => "\\t".to_string(),
        '\\' => "\\\\".to_string(),
        '#' => "\\#".to_string(),
        c if c.is_whitespace() || c.is_control() => format!("\\u{{{:x}}}", c as u32),
        c => c.to_string(),
    }
}
