use dfa_core::{TableError, TransitionTable};

use crate::optimizer::{optimize_definition, OptimizeStats};
use crate::parser::{parse_definition, ParseError, TableDefinition};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("line {line}: {source}")]
    Table { line: usize, source: TableError },
    #[error(transparent)]
    Build(#[from] TableError),
}

/// Build a table from a parsed definition.
pub fn build_table(def: &TableDefinition) -> Result<TransitionTable, CompileError> {
    let mut builder = TransitionTable::builder();

    for name in &def.states {
        builder.add_state(name)?;
    }
    builder.set_start(builder.state(&def.start)?)?;
    for name in &def.accepting {
        builder.set_accepting(builder.state(name)?)?;
    }
    for rule in &def.rules {
        builder
            .add_named_transition(&rule.from, rule.symbol, &rule.to)
            .map_err(|source| CompileError::Table {
                line: rule.line,
                source,
            })?;
    }

    Ok(builder.build()?)
}

/// Parse, optimize and build in one go.
pub fn compile_definition(text: &str) -> Result<(TransitionTable, OptimizeStats), CompileError> {
    let mut def = parse_definition(text)?;
    let stats = optimize_definition(&mut def);
    let table = build_table(&def)?;
    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use dfa_core::{ab_star_c, Matcher, TableError};

    use crate::format::{from_json, to_json};
    use crate::optimizer::optimize_definition;
    use crate::parser::parse_definition;

    use super::{build_table, compile_definition, CompileError};

    const AB_STAR_C: &str = "\
start Start
accept S3
Start a S1
S1 b S2
S1 c S3
S2 b S2
S2 c S3
";

    #[test]
    fn builds_ab_star_c_equivalent_to_builtin() {
        let (table, stats) = compile_definition(AB_STAR_C).expect("definition should compile");
        assert_eq!(stats.deduped, 0);
        assert!(stats.unreachable.is_empty());
        assert_eq!(table.state_count(), 4);
        assert_eq!(table.transition_count(), 5);

        let matcher = Matcher::new(&table);
        let builtin = Matcher::new(ab_star_c());
        for input in ["ac", "abc", "abbbc", "abd", "c", "", "a", "abcb", "xyz"] {
            assert_eq!(matcher.evaluate(input), builtin.evaluate(input), "{input:?}");
        }
    }

    #[test]
    fn accepts_ab_star_c_inputs_through_compiled_table() {
        let (table, _) = compile_definition(AB_STAR_C).unwrap();
        let matcher = Matcher::new(&table);
        assert!(matcher.evaluate("ac"));
        assert!(matcher.evaluate("abc"));
        assert!(matcher.evaluate("abbbc"));
        assert!(!matcher.evaluate("abd"));
        assert!(!matcher.evaluate("c"));
        assert!(!matcher.evaluate(""));
    }

    #[test]
    fn rejects_ambiguous_definition_with_line() {
        let err = compile_definition("start A\nA x B\nA x C\n").unwrap_err();
        match err {
            CompileError::Table {
                line,
                source: TableError::AmbiguousTransition { state, existing, conflicting, .. },
            } => {
                assert_eq!(line, 3);
                assert_eq!(state, "A");
                assert_eq!(existing, "B");
                assert_eq!(conflicting, "C");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_lines_are_not_ambiguous() {
        let (table, stats) = compile_definition("start A\naccept B\nA x B\nA x B\n").unwrap();
        assert_eq!(stats.deduped, 1);
        assert!(Matcher::new(&table).evaluate("x"));
    }

    #[test]
    fn parse_errors_propagate() {
        let err = compile_definition("A x B\n").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }

    #[test]
    fn multi_char_alphabet_and_escapes() {
        let text = "start W\naccept W\nW \\s W\nW h W\nW i W\n";
        let (table, _) = compile_definition(text).unwrap();
        let matcher = Matcher::new(&table);
        assert!(matcher.evaluate(""));
        assert!(matcher.evaluate("hi hi"));
        assert!(!matcher.evaluate("hi!"));
    }

    #[test]
    fn json_round_trip_preserves_behavior() {
        let mut def = parse_definition(AB_STAR_C).unwrap();
        optimize_definition(&mut def);
        let table = build_table(&def).unwrap();
        let json = to_json(&table).unwrap();
        let reloaded = from_json(&json).unwrap();
        assert_eq!(reloaded, table);
    }
}
