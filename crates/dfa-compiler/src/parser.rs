//! Table definition parser.
//!
//! ```text
//! # ab*c
//! start Start
//! accept S3
//! Start a S1
//! S1    b S2
//! S1    c S3
//! S2    b S2
//! S2    c S3
//! ```
//!
//! A transition line is `FROM SYMBOL TO`. A symbol is a single char or one of
//! the escapes `\s` (space), `\t`, `\\`, `\#` and `\u{HEX}`. A token starting
//! with `#` opens a comment that runs to the end of the line. The directive
//! keywords `start`, `accept` and `state` are never valid state names.

use dfa_core::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRule {
    pub from: String,
    pub symbol: Symbol,
    pub to: String,
    /// 1-based source line.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub start: String,
    /// Every state, in order of first mention.
    pub states: Vec<String>,
    pub accepting: Vec<String>,
    pub rules: Vec<TransitionRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineErrorKind {
    #[error("expected `FROM SYMBOL TO` or a directive")]
    MissingField,
    #[error("unexpected trailing field '{0}'")]
    TrailingField(String),
    #[error("invalid symbol '{0}'")]
    InvalidSymbol(String),
    #[error("start state already declared as '{0}'")]
    DuplicateStart(String),
    #[error("directive '{0}' needs at least one state")]
    EmptyDirective(&'static str),
    #[error("'{0}' is a directive keyword and cannot name a state")]
    ReservedStateName(String),
}

/// Words that open a directive line.
pub const DIRECTIVES: [&str; 3] = ["start", "accept", "state"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {kind}")]
    Line { line: usize, kind: LineErrorKind },
    #[error("no start state declared")]
    MissingStart,
}

pub fn parse_definition(text: &str) -> Result<TableDefinition, ParseError> {
    let mut start: Option<String> = None;
    let mut states: Vec<String> = Vec::new();
    let mut accepting: Vec<String> = Vec::new();
    let mut rules = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let fail = |kind| ParseError::Line { line, kind };

        let tokens: Vec<&str> = raw_line
            .split_whitespace()
            .take_while(|token| !token.starts_with('#'))
            .collect();

        match tokens.as_slice() {
            [] => continue,
            ["start", rest @ ..] => {
                let name = match rest {
                    [name] => *name,
                    [] => return Err(fail(LineErrorKind::EmptyDirective("start"))),
                    [_, extra, ..] => return Err(fail(LineErrorKind::TrailingField(extra.to_string()))),
                };
                if let Some(existing) = &start {
                    return Err(fail(LineErrorKind::DuplicateStart(existing.clone())));
                }
                mention(&mut states, name).map_err(fail)?;
                start = Some(name.to_string());
            }
            ["accept", names @ ..] => {
                if names.is_empty() {
                    return Err(fail(LineErrorKind::EmptyDirective("accept")));
                }
                for name in names {
                    mention(&mut states, name).map_err(fail)?;
                    if !accepting.iter().any(|a| a == name) {
                        accepting.push(name.to_string());
                    }
                }
            }
            ["state", names @ ..] => {
                if names.is_empty() {
                    return Err(fail(LineErrorKind::EmptyDirective("state")));
                }
                for name in names {
                    mention(&mut states, name).map_err(fail)?;
                }
            }
            [from, symbol, to] => {
                let symbol = parse_symbol(symbol)
                    .ok_or_else(|| fail(LineErrorKind::InvalidSymbol(symbol.to_string())))?;
                mention(&mut states, from).map_err(fail)?;
                mention(&mut states, to).map_err(fail)?;
                rules.push(TransitionRule {
                    from: from.to_string(),
                    symbol,
                    to: to.to_string(),
                    line,
                });
            }
            [_, _, _, extra, ..] => {
                return Err(fail(LineErrorKind::TrailingField(extra.to_string())));
            }
            _ => return Err(fail(LineErrorKind::MissingField)),
        }
    }

    let start = start.ok_or(ParseError::MissingStart)?;

    Ok(TableDefinition {
        start,
        states,
        accepting,
        rules,
    })
}

/// Decode a symbol token.
pub fn parse_symbol(token: &str) -> Option<Symbol> {
    if let Some(escape) = token.strip_prefix('\\') {
        return match escape {
            "s" => Some(' '),
            "t" => Some('\t'),
            "\\" => Some('\\'),
            "#" => Some('#'),
            _ => {
                let hex = escape.strip_prefix("u{")?.strip_suffix('}')?;
                if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            }
        };
    }

    let mut chars = token.chars();
    let symbol = chars.next()?;
    match chars.next() {
        None => Some(symbol),
        Some(_) => None,
    }
}

fn mention(states: &mut Vec<String>, name: &str) -> Result<(), LineErrorKind> {
    if DIRECTIVES.contains(&name) {
        return Err(LineErrorKind::ReservedStateName(name.to_string()));
    }
    if !states.iter().any(|s| s == name) {
        states.push(name.to_string());
    }
    Ok(())
}
