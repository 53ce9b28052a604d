use std::fs;
use std::path::Path;

use dfa_compiler::{compile_definition, from_json};
use dfa_core::TransitionTable;

/// How a table file is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFileKind {
    Json,
    Definition,
}

impl TableFileKind {
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Definition,
        }
    }
}

/// Load a table from a JSON table file or a definition file.
pub fn read_table(path: &Path) -> Result<TransitionTable, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    parse_table(TableFileKind::of(path), &content)
        .map_err(|e| format!("Invalid table '{}': {}", path.display(), e))
}

pub fn parse_table(kind: TableFileKind, content: &str) -> Result<TransitionTable, String> {
    match kind {
        TableFileKind::Json => from_json(content).map_err(|e| e.to_string()),
        TableFileKind::Definition => compile_definition(content)
            .map(|(table, _)| table)
            .map_err(|e| e.to_string()),
    }
}

pub fn write_table(path: &Path, json: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
        }
    }
    fs::write(path, json)
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))
}
