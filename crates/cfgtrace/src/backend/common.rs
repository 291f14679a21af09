//! Helpers shared by more than one backend.

use crate::error::{ParseError, ParseMetrics};
use crate::grammar::{Grammar, Rule, Symbol};
use crate::trace::Trace;
use std::time::Instant;

pub(crate) const DEFAULT_MAX_STEPS: usize = 100_000;
pub(crate) const DEFAULT_MAX_DEPTH: usize = 10_000;
pub(crate) const DEFAULT_MAX_WORK: usize = 1_000_000;

/// Reject a zero limit.
pub(crate) fn require_nonzero(field: &str, value: usize) -> Result<(), ParseError> {
    if value == 0 {
        return Err(ParseError::InvalidConfig(format!("{field} must be greater than zero")));
    }
    Ok(())
}

/// Borrow every token as `&str`.
pub(crate) fn token_slices<S: AsRef<str>>(tokens: &[S]) -> Vec<&str> {
    tokens.iter().map(AsRef::as_ref).collect()
}

/// The first rule at or after index `from` whose right-hand side is a suffix
/// of `stack`.
///
/// Epsilon rules match every stack, so they are only candidates when
/// `epsilon_allowed` is set. Callers that leave it on must bound the
/// reductions some other way.
pub(crate) fn find_reduction<'g>(
    grammar: &'g Grammar,
    stack: &[Symbol],
    from: usize,
    epsilon_allowed: bool,
) -> Option<(usize, &'g Rule)> {
    grammar
        .rules()
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, rule)| (epsilon_allowed || !rule.is_epsilon()) && rule.matches_suffix(stack))
}

/// Replace the matched suffix of `stack` with the rule's left-hand side.
pub(crate) fn apply_reduction(stack: &mut Vec<Symbol>, rule: &Rule) {
    let keep = stack.len() - rule.rhs().len();
    stack.truncate(keep);
    stack.push(rule.lhs_symbol());
}

/// A bottom-up parse is complete when the stack is exactly the start symbol
/// and every token has been consumed.
pub(crate) fn is_accepting(grammar: &Grammar, stack: &[Symbol], cursor: usize, token_count: usize) -> bool {
    cursor == token_count && matches!(stack, [only] if only.is_nonterminal_named(grammar.start()))
}

/// Metrics for a deterministic run, where every step is one explored state.
pub(crate) fn deterministic_metrics(trace: &Trace, cursor: usize, max_stack: usize, started: Instant) -> ParseMetrics {
    ParseMetrics {
        steps: trace.len(),
        tokens_consumed: cursor,
        explored: trace.len(),
        backtracks: 0,
        max_depth: 0,
        max_stack,
        parse_time: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> Grammar {
        Grammar::from_text("s --> a, [x]\na --> ε\na --> [x]").unwrap()
    }

    #[test]
    fn zero_limits_are_invalid() {
        assert!(require_nonzero("max_steps", 1).is_ok());
        assert_eq!(
            require_nonzero("max_steps", 0),
            Err(ParseError::InvalidConfig("max_steps must be greater than zero".into()))
        );
    }

    #[test]
    fn epsilon_reductions_need_permission() {
        let grammar = grammar();
        assert_eq!(find_reduction(&grammar, &[], 0, false), None);
        assert_eq!(find_reduction(&grammar, &[], 0, true).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn reductions_start_at_offset() {
        let grammar = grammar();
        let stack = [Symbol::terminal("x")];
        assert_eq!(find_reduction(&grammar, &stack, 0, false).map(|(i, _)| i), Some(2));
        assert_eq!(find_reduction(&grammar, &stack, 3, true), None);
    }

    #[test]
    fn reduction_replaces_suffix() {
        let grammar = grammar();
        let mut stack = vec![Symbol::nonterminal("a"), Symbol::terminal("x")];
        apply_reduction(&mut stack, &grammar.rules()[0]);
        assert_eq!(stack, vec![Symbol::nonterminal("s")]);
        assert!(is_accepting(&grammar, &stack, 2, 2));
        assert!(!is_accepting(&grammar, &stack, 1, 2));
    }

    #[test]
    fn epsilon_reduction_pushes_lhs() {
        let grammar = grammar();
        let mut stack = vec![Symbol::terminal("x")];
        apply_reduction(&mut stack, &grammar.rules()[1]);
        assert_eq!(stack, vec![Symbol::terminal("x"), Symbol::nonterminal("a")]);
    }
}
