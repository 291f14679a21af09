//! Non-fatal grammar diagnostics.
//!
//! None of these stop a parser from running. They explain outcomes that would
//! otherwise look surprising: a missing start rule rejects everything, left
//! recursion sends top-down parsers into their depth or step limits, and a
//! unit cycle can keep the greedy bottom-up parser reducing until its step
//! limit.

use crate::grammar::{Grammar, Symbol};
use compact_str::CompactString;
use hashbrown::{HashMap, HashSet};
use std::fmt;

type NameSet = HashSet<CompactString, ahash::RandomState>;
type Graph = HashMap<CompactString, Vec<CompactString>, ahash::RandomState>;

/// A single diagnostic produced by [`GrammarAnalysis`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarWarning {
    /// The grammar has no rules at all
    NoRules,
    /// No rule has the start symbol on its left-hand side
    MissingStartRule { start: CompactString },
    /// A right-hand side mentions a nonterminal that has no rule
    UndefinedNonterminal { name: CompactString, rule: usize },
    /// A nonterminal can derive a form starting with itself
    LeftRecursive { name: CompactString },
    /// Nonterminals that can rewrite into each other without consuming input
    UnitCycle { names: Vec<CompactString> },
    /// A nonterminal that cannot be reached from the start symbol
    Unreachable { name: CompactString },
}

impl fmt::Display for GrammarWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRules => write!(f, "grammar has no rules"),
            Self::MissingStartRule { start } => {
                write!(f, "no rule for start symbol `{start}`; every sentence is rejected")
            }
            Self::UndefinedNonterminal { name, rule } => {
                write!(f, "rule {} uses undefined nonterminal `{name}`", rule + 1)
            }
            Self::LeftRecursive { name } => write!(
                f,
                "`{name}` is left-recursive; top-down parsers will hit their limits"
            ),
            Self::UnitCycle { names } => write!(
                f,
                "unit cycle through {}; the greedy bottom-up parser may hit its step limit",
                names.iter().map(|n| format!("`{n}`")).collect::<Vec<_>>().join(", ")
            ),
            Self::Unreachable { name } => {
                write!(f, "`{name}` is unreachable from the start symbol")
            }
        }
    }
}

/// Result of analyzing a grammar.
#[derive(Debug, Clone)]
pub struct GrammarAnalysis {
    nullable: NameSet,
    warnings: Vec<GrammarWarning>,
}

impl GrammarAnalysis {
    #[must_use]
    pub fn new(grammar: &Grammar) -> Self {
        let nullable = nullable_set(grammar);
        let mut warnings = Vec::new();

        if grammar.is_empty() {
            warnings.push(GrammarWarning::NoRules);
            return Self { nullable, warnings };
        }

        if !grammar.has_rule_for(grammar.start()) {
            warnings.push(GrammarWarning::MissingStartRule {
                start: grammar.start().into(),
            });
        }

        for (index, rule) in grammar.rules().iter().enumerate() {
            for symbol in rule.rhs() {
                if let Symbol::Nonterminal(name) = symbol {
                    if !grammar.has_rule_for(name) {
                        warnings.push(GrammarWarning::UndefinedNonterminal {
                            name: name.clone(),
                            rule: index,
                        });
                    }
                }
            }
        }

        let order = nonterminals_in_order(grammar);

        let left = left_corner_graph(grammar, &nullable);
        for name in &order {
            if reaches(&left, name, name) {
                warnings.push(GrammarWarning::LeftRecursive { name: name.clone() });
            }
        }

        let unit = unit_graph(grammar, &nullable);
        let cyclic: Vec<CompactString> = order
            .iter()
            .filter(|name| reaches(&unit, name, name))
            .cloned()
            .collect();
        if !cyclic.is_empty() {
            warnings.push(GrammarWarning::UnitCycle { names: cyclic });
        }

        let reachable = reachable_from_start(grammar);
        for name in &order {
            if !reachable.contains(name) {
                warnings.push(GrammarWarning::Unreachable { name: name.clone() });
            }
        }

        Self { nullable, warnings }
    }

    #[must_use]
    pub fn warnings(&self) -> &[GrammarWarning] {
        &self.warnings
    }

    /// Whether `name` can derive the empty string.
    #[must_use]
    pub fn is_nullable(&self, name: &str) -> bool {
        self.nullable.contains(name)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Nonterminals on a left-hand side, in first-declaration order.
fn nonterminals_in_order(grammar: &Grammar) -> Vec<CompactString> {
    let mut seen = NameSet::default();
    grammar
        .rules()
        .iter()
        .filter(|rule| seen.insert(rule.lhs().into()))
        .map(|rule| rule.lhs().into())
        .collect()
}

fn nullable_set(grammar: &Grammar) -> NameSet {
    let mut nullable = NameSet::default();
    loop {
        let mut changed = false;
        for rule in grammar.rules() {
            if nullable.contains(rule.lhs()) {
                continue;
            }
            let all_nullable = rule
                .rhs()
                .iter()
                .all(|symbol| matches!(symbol, Symbol::Nonterminal(n) if nullable.contains(n)));
            if all_nullable {
                nullable.insert(rule.lhs().into());
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

/// Edge `A -> B` when some rule `A --> α B β` has a nullable prefix `α`.
fn left_corner_graph(grammar: &Grammar, nullable: &NameSet) -> Graph {
    let mut graph = Graph::default();
    for rule in grammar.rules() {
        for symbol in rule.rhs() {
            match symbol {
                Symbol::Nonterminal(name) => {
                    graph
                        .entry(rule.lhs().into())
                        .or_default()
                        .push(name.clone());
                    if !nullable.contains(name) {
                        break;
                    }
                }
                Symbol::Terminal(_) => break,
            }
        }
    }
    graph
}

/// Edge `A -> B` when some rule `A --> α B β` has nullable `α` and `β`.
fn unit_graph(grammar: &Grammar, nullable: &NameSet) -> Graph {
    let is_nullable = |symbol: &Symbol| matches!(symbol, Symbol::Nonterminal(n) if nullable.contains(n));
    let mut graph = Graph::default();
    for rule in grammar.rules() {
        let rhs = rule.rhs();
        for (i, symbol) in rhs.iter().enumerate() {
            if let Symbol::Nonterminal(name) = symbol {
                let others_nullable = rhs[..i].iter().all(is_nullable) && rhs[i + 1..].iter().all(is_nullable);
                if others_nullable {
                    graph
                        .entry(rule.lhs().into())
                        .or_default()
                        .push(name.clone());
                }
            }
        }
    }
    graph
}

/// Whether `to` is reachable from `from` through at least one edge.
fn reaches(graph: &Graph, from: &str, to: &str) -> bool {
    let mut visited = NameSet::default();
    let mut pending: Vec<&str> = graph
        .get(from)
        .map(|next| next.iter().map(CompactString::as_str).collect())
        .unwrap_or_default();

    while let Some(name) = pending.pop() {
        if name == to {
            return true;
        }
        if !visited.insert(name.into()) {
            continue;
        }
        if let Some(next) = graph.get(name) {
            pending.extend(next.iter().map(CompactString::as_str));
        }
    }
    false
}

fn reachable_from_start(grammar: &Grammar) -> NameSet {
    let mut reachable = NameSet::default();
    let mut pending: Vec<&str> = vec![grammar.start()];
    while let Some(name) = pending.pop() {
        if !reachable.insert(name.into()) {
            continue;
        }
        for (_, rule) in grammar.alternatives(name) {
            for symbol in rule.rhs() {
                if let Symbol::Nonterminal(next) = symbol {
                    pending.push(next);
                }
            }
        }
    }
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warnings(text: &str) -> Vec<GrammarWarning> {
        Grammar::from_text(text).unwrap().analyze().warnings().to_vec()
    }

    #[test]
    fn clean_grammar() {
        let analysis = Grammar::from_text("s --> np, vp\nnp --> [a]\nvp --> [b]")
            .unwrap()
            .analyze();
        assert!(analysis.is_clean(), "{:?}", analysis.warnings());
    }

    #[test]
    fn empty_grammar() {
        assert_eq!(warnings(""), vec![GrammarWarning::NoRules]);
    }

    #[test]
    fn missing_start_rule() {
        let found = warnings("t --> [a]");
        assert!(found.contains(&GrammarWarning::MissingStartRule { start: "s".into() }));
        assert!(found.contains(&GrammarWarning::Unreachable { name: "t".into() }));
    }

    #[test]
    fn undefined_nonterminal() {
        let found = warnings("s --> np, vp\nnp --> [a]");
        assert_eq!(
            found,
            vec![GrammarWarning::UndefinedNonterminal {
                name: "vp".into(),
                rule: 0
            }]
        );
    }

    #[test]
    fn direct_and_hidden_left_recursion() {
        let found = warnings("s --> s, [a]\ns --> [a]");
        assert!(found.contains(&GrammarWarning::LeftRecursive { name: "s".into() }));

        let found = warnings("s --> opt, s, [a]\ns --> [a]\nopt --> ε");
        assert!(found.contains(&GrammarWarning::LeftRecursive { name: "s".into() }));
    }

    #[test]
    fn unit_cycle() {
        let found = warnings("s --> a\na --> s\na --> [x]");
        assert!(found.contains(&GrammarWarning::UnitCycle {
            names: vec!["s".into(), "a".into()]
        }));
    }

    #[test]
    fn nullable_closure() {
        let analysis = Grammar::from_text("s --> a, b\na --> ε\nb --> a\nc --> [x]")
            .unwrap()
            .analyze();
        assert!(analysis.is_nullable("s"));
        assert!(analysis.is_nullable("b"));
        assert!(!analysis.is_nullable("c"));
    }
}
