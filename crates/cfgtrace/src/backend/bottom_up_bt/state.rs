use crate::backend::common::{apply_reduction, find_reduction};
use crate::grammar::{Grammar, Rule, Symbol};

/// A candidate move out of a search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move<'g> {
    Reduce(&'g Rule),
    Shift,
}

/// A choice point of the bottom-up search.
///
/// Choices are the grammar's rules in order (as reductions, epsilon rules
/// included), followed by a single shift. `next_choice == grammar.len()`
/// means only the shift is left.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub(crate) stack: Vec<Symbol>,
    pub(crate) cursor: usize,
    pub(crate) next_choice: usize,
    pub(crate) trace_len: usize,
    /// Lowest stack height since the last shift; everything above
    /// `floor + 1` was built from epsilon reductions alone
    pub(crate) floor: usize,
}

impl Frame {
    pub(crate) fn root() -> Self {
        Self {
            stack: Vec::new(),
            cursor: 0,
            next_choice: 0,
            trace_len: 0,
            floor: 0,
        }
    }

    pub(crate) fn next_move<'g>(&mut self, grammar: &'g Grammar, token_count: usize) -> Option<Move<'g>> {
        let rule_count = grammar.len();
        if self.next_choice < rule_count {
            if let Some((index, rule)) = find_reduction(grammar, &self.stack, self.next_choice, true) {
                self.next_choice = index + 1;
                return Some(Move::Reduce(rule));
            }
            self.next_choice = rule_count;
        }
        if self.next_choice == rule_count {
            self.next_choice += 1;
            if self.cursor < token_count {
                return Some(Move::Shift);
            }
        }
        None
    }

    /// The child state produced by `mv`, entered at trace length `trace_len`.
    pub(crate) fn successor(&self, mv: Move<'_>, tokens: &[&str], trace_len: usize) -> Self {
        let mut stack = self.stack.clone();
        match mv {
            Move::Reduce(rule) => {
                apply_reduction(&mut stack, rule);
                Self {
                    stack,
                    cursor: self.cursor,
                    next_choice: 0,
                    trace_len,
                    floor: self.floor.min(self.stack.len() - rule.rhs().len()),
                }
            }
            Move::Shift => {
                stack.extend(tokens.get(self.cursor).map(|token| Symbol::terminal(*token)));
                Self {
                    floor: stack.len().saturating_sub(1),
                    stack,
                    cursor: self.cursor + 1,
                    next_choice: 0,
                    trace_len,
                }
            }
        }
    }

    /// Symbols stacked since the last shift that derive the empty string.
    pub(crate) fn epsilon_run(&self) -> usize {
        self.stack.len().saturating_sub(self.floor + 1)
    }

    /// Whether an ancestor on `path` already had this exact state. Any
    /// derivation through the repeat also works from the first visit.
    pub(crate) fn revisits(&self, path: &[Frame]) -> bool {
        path.iter()
            .rev()
            .take_while(|frame| frame.cursor == self.cursor)
            .any(|frame| frame.stack == self.stack)
    }
}
