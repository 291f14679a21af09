//! Dead-state pruning for the bottom-up search.
//!
//! Every shift and reduce happens at the top of the stack, so a search path
//! that reaches `[start]` replays a rightmost derivation backwards and each
//! stack along it is a viable prefix. Viable prefixes are the strings the
//! LR(0) item automaton accepts; the automaton is built lazily, one goto at a
//! time, as the search asks about new stacks.
//!
//! Epsilon reductions are offered in every state, so a stretch without shifts
//! can also pile up symbols that derive nothing. A minimal derivation tree
//! never nests a node inside another with the same nonterminal and span, and
//! that caps how many such symbols a useful stack can hold.

use crate::grammar::{Grammar, Symbol};
use hashbrown::{HashMap, HashSet};

/// Rule index and dot position
type Item = (usize, usize);

/// Viable-prefix and size checks for bottom-up stacks.
#[derive(Debug)]
pub(crate) struct Viability<'g> {
    grammar: &'g Grammar,
    /// Closed item sets; state 0 is the empty stack
    states: Vec<Vec<Item>>,
    ids: HashMap<Vec<Item>, usize, ahash::RandomState>,
    gotos: HashMap<(usize, Symbol), Option<usize>, ahash::RandomState>,
    nonterminals: usize,
    width: usize,
}

impl<'g> Viability<'g> {
    pub(crate) fn new(grammar: &'g Grammar) -> Self {
        let nonterminals = grammar
            .rules()
            .iter()
            .map(|rule| rule.lhs())
            .collect::<HashSet<&str, ahash::RandomState>>()
            .len();
        let width = grammar.rules().iter().map(|rule| rule.rhs().len()).max().unwrap_or(0).max(1);

        let mut viability = Self {
            grammar,
            states: Vec::new(),
            ids: HashMap::default(),
            gotos: HashMap::default(),
            nonterminals,
            width,
        };
        let kernel = grammar.alternatives(grammar.start()).map(|(index, _)| (index, 0)).collect();
        viability.intern(kernel);
        viability
    }

    /// Whether `stack` is a viable prefix.
    ///
    /// The stack `[start]` itself is only viable when the start symbol occurs
    /// on some right-hand side; callers test for acceptance first.
    pub(crate) fn admits(&mut self, stack: &[Symbol]) -> bool {
        let mut state = 0;
        for symbol in stack {
            match self.goto(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        true
    }

    /// Most symbols deriving the empty string that a useful stack can carry
    /// above its last consumed token, with `remaining` tokens still unread.
    pub(crate) fn epsilon_run_limit(&self, remaining: usize) -> usize {
        (self.nonterminals * (remaining + 1) + 2) * self.width
    }

    fn goto(&mut self, state: usize, symbol: &Symbol) -> Option<usize> {
        let key = (state, symbol.clone());
        if let Some(&next) = self.gotos.get(&key) {
            return next;
        }

        let rules = self.grammar.rules();
        let kernel: Vec<Item> = self.states[state]
            .iter()
            .filter(|&&(rule, dot)| rules[rule].rhs().get(dot) == Some(symbol))
            .map(|&(rule, dot)| (rule, dot + 1))
            .collect();
        let next = if kernel.is_empty() { None } else { Some(self.intern(kernel)) };
        self.gotos.insert(key, next);
        next
    }

    fn intern(&mut self, kernel: Vec<Item>) -> usize {
        let items = closure(self.grammar, kernel);
        if let Some(&id) = self.ids.get(&items) {
            return id;
        }
        let id = self.states.len();
        self.ids.insert(items.clone(), id);
        self.states.push(items);
        tracing::trace!(state = id, items = self.states[id].len(), "item set added");
        id
    }
}

/// Add `B --> . γ` for every item with the dot before `B`.
fn closure(grammar: &Grammar, mut items: Vec<Item>) -> Vec<Item> {
    let mut seen: HashSet<Item, ahash::RandomState> = items.iter().copied().collect();
    let mut next = 0;
    while next < items.len() {
        let (rule, dot) = items[next];
        next += 1;
        if let Some(Symbol::Nonterminal(name)) = grammar.rules()[rule].rhs().get(dot) {
            for (index, _) in grammar.alternatives(name) {
                if seen.insert((index, 0)) {
                    items.push((index, 0));
                }
            }
        }
    }
    items.sort_unstable();
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(literal: &str) -> Symbol {
        Symbol::terminal(literal)
    }

    fn n(name: &str) -> Symbol {
        Symbol::nonterminal(name)
    }

    #[test]
    fn nullable_symbols_reduce_in_order() {
        let grammar = Grammar::from_text("s --> [x], a, b\na --> ε\nb --> ε").unwrap();
        let mut viability = Viability::new(&grammar);

        assert!(viability.admits(&[]));
        assert!(viability.admits(&[t("x")]));
        assert!(viability.admits(&[t("x"), n("a")]));
        assert!(viability.admits(&[t("x"), n("a"), n("b")]));
        assert!(!viability.admits(&[t("x"), n("b")]));
        assert!(!viability.admits(&[t("x"), n("a"), n("a")]));
        assert!(!viability.admits(&[n("a")]));
    }

    #[test]
    fn nullable_prefix_is_reduced_before_shifting() {
        let grammar = Grammar::from_text("s --> a, [x]\na --> b, c\nb --> ε\nc --> ε").unwrap();
        let mut viability = Viability::new(&grammar);

        assert!(viability.admits(&[n("b")]));
        assert!(viability.admits(&[n("b"), n("c")]));
        assert!(viability.admits(&[n("a"), t("x")]));
        assert!(!viability.admits(&[t("x")]));
        assert!(!viability.admits(&[n("c")]));
        assert!(!viability.admits(&[n("c"), n("b")]));
        assert!(!viability.admits(&[t("y")]));
    }

    #[test]
    fn nested_rules() {
        let grammar = Grammar::from_text("s --> [lp], s, [rp], s\ns --> ε").unwrap();
        let mut viability = Viability::new(&grammar);

        assert!(viability.admits(&[t("lp"), t("lp")]));
        assert!(viability.admits(&[t("lp"), n("s"), t("rp"), n("s")]));
        assert!(!viability.admits(&[t("lp"), t("rp")]));
        assert!(!viability.admits(&[n("s")]));
        assert!(!viability.admits(&[n("s"), n("s")]));

        let states = viability.states.len();
        assert!(viability.admits(&[t("lp"), t("lp")]));
        assert_eq!(viability.states.len(), states);
    }

    #[test]
    fn empty_grammar_admits_only_the_empty_stack() {
        let grammar = Grammar::from_text("").unwrap();
        let mut viability = Viability::new(&grammar);
        assert!(viability.admits(&[]));
        assert!(!viability.admits(&[t("x")]));
    }

    #[test]
    fn epsilon_run_limit_grows_with_input() {
        let grammar = Grammar::from_text("s --> a, a, a, a\na --> ε").unwrap();
        let viability = Viability::new(&grammar);
        assert_eq!(viability.epsilon_run_limit(0), 16);
        assert_eq!(viability.epsilon_run_limit(3), 40);
    }
}
