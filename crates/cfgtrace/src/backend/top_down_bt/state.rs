use crate::grammar::{Grammar, Rule, Symbol};

/// A choice point of the top-down search.
///
/// The stack top is always a nonterminal: terminals are matched against the
/// input before a frame is created.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) stack: Vec<Symbol>,
    pub(crate) cursor: usize,
    /// Grammar index from which to look for the next alternative
    pub(crate) next_rule: usize,
    /// Trace length on entry; the trace is rewound here before each attempt
    pub(crate) trace_len: usize,
}

impl Frame {
    pub(crate) fn new(stack: Vec<Symbol>, cursor: usize, trace_len: usize) -> Self {
        Self {
            stack,
            cursor,
            next_rule: 0,
            trace_len,
        }
    }

    /// Advance to the next rule for the top nonterminal that can apply.
    ///
    /// A single-terminal rule only applies when its literal is the current
    /// token.
    pub(crate) fn next_alternative<'g>(&mut self, grammar: &'g Grammar, tokens: &[&str]) -> Option<&'g Rule> {
        let Some(Symbol::Nonterminal(name)) = self.stack.last() else {
            return None;
        };
        let token = tokens.get(self.cursor).copied();
        let found = grammar
            .rules()
            .iter()
            .enumerate()
            .skip(self.next_rule)
            .find(|(_, rule)| {
                rule.lhs() == name.as_str()
                    && rule.leaf_literal().map_or(true, |literal| token == Some(literal))
            });

        match found {
            Some((index, rule)) => {
                self.next_rule = index + 1;
                Some(rule)
            }
            None => {
                self.next_rule = grammar.len();
                None
            }
        }
    }

    /// The state after applying `rule` to the top nonterminal, before
    /// terminals are matched.
    pub(crate) fn successor(&self, rule: &Rule) -> (Vec<Symbol>, usize) {
        let mut stack = self.stack.clone();
        stack.pop();
        match rule.leaf_literal() {
            Some(_) => (stack, self.cursor + 1),
            None => {
                stack.extend(rule.rhs().iter().rev().cloned());
                (stack, self.cursor)
            }
        }
    }
}

/// Pop terminals off the top of `stack` while they match the input.
///
/// Returns `false` on the first mismatch, which fails the branch.
pub(crate) fn settle(stack: &mut Vec<Symbol>, cursor: &mut usize, tokens: &[&str]) -> bool {
    while let Some(top) = stack.last() {
        if top.is_nonterminal() {
            break;
        }
        if !tokens.get(*cursor).is_some_and(|token| top.matches_token(token)) {
            return false;
        }
        stack.pop();
        *cursor += 1;
    }
    true
}
