//! Built-in patterns.

use std::sync::OnceLock;

use crate::table::TransitionTable;
use crate::types::StateId;

/// Named states of the `ab*c` automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum AbStarC {
    Start = 0,
    S1 = 1,
    S2 = 2,
    /// The only accepting state.
    S3 = 3,
}

impl AbStarC {
    pub const ALL: [AbStarC; 4] = [Self::Start, Self::S1, Self::S2, Self::S3];

    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
        }
    }

    /// Id of this state in [`ab_star_c`].
    pub fn id(self) -> StateId {
        StateId(self as u16)
    }

    pub fn from_id(id: StateId) -> Option<Self> {
        Self::ALL.get(id.index()).copied()
    }
}

/// The shared `ab*c` table.
///
/// | State | 'a' | 'b' | 'c' |
/// |-------|-----|-----|-----|
/// | Start | S1  |     |     |
/// | S1    |     | S2  | S3  |
/// | S2    |     | S2  | S3  |
/// | S3    |     |     |     |
pub fn ab_star_c() -> &'static TransitionTable {
    static TABLE: OnceLock<TransitionTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        use AbStarC::*;
        let names = AbStarC::ALL.iter().map(|s| s.name().to_string()).collect();
        let accepting = AbStarC::ALL.iter().map(|&s| s == S3).collect();
        let rows = vec![
            vec![('a', S1.id())],
            vec![('b', S2.id()), ('c', S3.id())],
            vec![('b', S2.id()), ('c', S3.id())],
            vec![],
        ];
        TransitionTable::from_sorted_parts(names, accepting, rows, Start.id())
    })
}
