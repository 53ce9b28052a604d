//! DFA Table Compiler
//!
//! This crate compiles the line-based table definition format into a
//! [`TransitionTable`](dfa_core::TransitionTable), and reads and writes the
//! JSON table format.

pub mod parser;
pub mod optimizer;
pub mod builder;
pub mod format;

pub use builder::{build_table, compile_definition, CompileError};
pub use format::{from_json, to_json, FormatError, TableDocument};
pub use optimizer::{optimize_definition, OptimizeStats};
pub use parser::{parse_definition, ParseError, TableDefinition, TransitionRule};
