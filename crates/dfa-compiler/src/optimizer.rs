use std::collections::{HashMap, HashSet, VecDeque};

use crate::parser::TableDefinition;

#[derive(Debug, Clone)]
pub struct OptimizeStats {
    pub before: usize,
    pub after: usize,
    pub deduped: usize,
    /// States with no path from the start state, in declaration order.
    pub unreachable: Vec<String>,
}

/// Drop repeated triples and report unreachable states.
///
/// Conflicting triples (same state and symbol, different target) are kept so
/// the builder can reject them.
pub fn optimize_definition(def: &mut TableDefinition) -> OptimizeStats {
    let before = def.rules.len();

    let mut seen: HashSet<(String, char, String)> = HashSet::new();
    let mut deduped = 0usize;
    def.rules.retain(|rule| {
        let key = (rule.from.clone(), rule.symbol, rule.to.clone());
        if seen.contains(&key) {
            log::warn!(
                "line {}: duplicate transition {} {:?} {}",
                rule.line,
                rule.from,
                rule.symbol,
                rule.to
            );
            deduped += 1;
            false
        } else {
            seen.insert(key);
            true
        }
    });

    let unreachable = unreachable_states(def);
    for state in &unreachable {
        log::warn!("state '{}' is unreachable from '{}'", state, def.start);
    }

    OptimizeStats {
        before,
        after: def.rules.len(),
        deduped,
        unreachable,
    }
}

fn unreachable_states(def: &TableDefinition) -> Vec<String> {
    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for rule in &def.rules {
        edges.entry(rule.from.as_str()).or_default().push(rule.to.as_str());
    }

    let mut reached: HashSet<&str> = HashSet::new();
    let mut queue = VecDeque::new();
    reached.insert(def.start.as_str());
    queue.push_back(def.start.as_str());

    while let Some(state) = queue.pop_front() {
        for &next in edges.get(state).map(Vec::as_slice).unwrap_or(&[]) {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }

    def.states
        .iter()
        .filter(|state| !reached.contains(state.as_str()))
        .cloned()
        .collect()
}
