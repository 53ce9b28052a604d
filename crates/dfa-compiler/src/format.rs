//! JSON table format.
//!
//! ```json
//! {
//!   "version": 1,
//!   "start": "Start",
//!   "states": ["Start", "S1", "S2", "S3"],
//!   "accepting": ["S3"],
//!   "transitions": [{ "from": "Start", "symbol": "a", "to": "S1" }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use dfa_core::{StateId, TableError, TransitionTable};

/// Current format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u32),
    #[error("Invalid table: {0}")]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    pub version: u32,
    pub start: String,
    pub states: Vec<String>,
    #[serde(default)]
    pub accepting: Vec<String>,
    #[serde(default)]
    pub transitions: Vec<TransitionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub from: String,
    pub symbol: char,
    pub to: String,
}

impl TableDocument {
    pub fn from_table(table: &TransitionTable) -> Self {
        let name = |state: StateId| table.state_name(state).unwrap_or_default().to_string();
        Self {
            version: FORMAT_VERSION,
            start: name(table.start()),
            states: table.states().map(name).collect(),
            accepting: table.accepting_states().map(name).collect(),
            transitions: table
                .transitions()
                .map(|t| TransitionEntry {
                    from: name(t.from),
                    symbol: t.symbol,
                    to: name(t.to),
                })
                .collect(),
        }
    }

    /// Rebuild the table, re-checking determinism.
    pub fn to_table(&self) -> Result<TransitionTable, FormatError> {
        if self.version != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(self.version));
        }

        let mut builder = TransitionTable::builder();
        for state in &self.states {
            builder.add_state(state)?;
        }
        builder.set_start(builder.state(&self.start)?)?;
        for state in &self.accepting {
            builder.set_accepting(builder.state(state)?)?;
        }
        for entry in &self.transitions {
            builder.add_named_transition(&entry.from, entry.symbol, &entry.to)?;
        }
        Ok(builder.build()?)
    }
}

pub fn to_json(table: &TransitionTable) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(&TableDocument::from_table(table))?)
}

pub fn from_json(text: &str) -> Result<TransitionTable, FormatError> {
    let document: TableDocument = serde_json::from_str(text)?;
    document.to_table()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dfa_core::ab_star_c;

    #[test]
    fn test_document_from_builtin() {
        let doc = TableDocument::from_table(ab_star_c());
        assert_eq!(doc.start, "Start");
        assert_eq!(doc.states, vec!["Start", "S1", "S2", "S3"]);
        assert_eq!(doc.accepting, vec!["S3"]);
        assert_eq!(doc.transitions.len(), 5);
        assert_eq!(
            doc.transitions[0],
            TransitionEntry {
                from: "Start".into(),
                symbol: 'a',
                to: "S1".into()
            }
        );
    }

    #[test]
    fn test_load_rejects_ambiguity() {
        let text = r#"{
            "version": 1,
            "start": "A",
            "states": ["A", "B"],
            "transitions": [
                { "from": "A", "symbol": "x", "to": "A" },
                { "from": "A", "symbol": "x", "to": "B" }
            ]
        }"#;
        assert!(matches!(
            from_json(text),
            Err(FormatError::Table(TableError::AmbiguousTransition { .. }))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let text = r#"{ "version": 9, "start": "A", "states": ["A"] }"#;
        assert!(matches!(from_json(text), Err(FormatError::UnsupportedVersion(9))));
    }

    #[test]
    fn test_load_rejects_unknown_state() {
        let text = r#"{ "version": 1, "start": "Z", "states": ["A"] }"#;
        assert!(matches!(
            from_json(text),
            Err(FormatError::Table(TableError::UnknownState(_)))
        ));
    }

    #[test]
    fn test_load_rejects_multi_char_symbol() {
        let text = r#"{
            "version": 1, "start": "A", "states": ["A"],
            "transitions": [{ "from": "A", "symbol": "xy", "to": "A" }]
        }"#;
        assert!(matches!(from_json(text), Err(FormatError::Json(_))));
    }
}
