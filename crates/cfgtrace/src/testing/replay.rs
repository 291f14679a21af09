//! # Trace Replay
//!
//! Re-executes a trace against the grammar and input and checks that every
//! step's stack and cursor follow from the previous step's action.
//!
//! The checks are independent of the parsers themselves: a bug that records
//! a stale stack, skips a token or applies a rule that does not match shows
//! up as a [`TraceViolation`] naming the first bad step.

use crate::backend::{Algorithm, Direction};
use crate::error::ParseOutcome;
use crate::grammar::{Grammar, Rule, Symbol};
use crate::trace::{Action, Step, Trace};
use thiserror::Error;

/// The first step of a trace that does not follow from its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step {index}: {reason}")]
pub struct TraceViolation {
    /// 0-based step index
    pub index: usize,
    pub reason: String,
}

fn violation(index: usize, reason: impl Into<String>) -> TraceViolation {
    TraceViolation {
        index,
        reason: reason.into(),
    }
}

/// Check a whole outcome: the trace replays cleanly and `accepted` agrees
/// with the final action.
///
/// # Errors
///
/// Returns the first inconsistency found.
pub fn check_outcome(
    grammar: &Grammar,
    tokens: &[&str],
    algorithm: Algorithm,
    outcome: &ParseOutcome,
) -> Result<(), TraceViolation> {
    check_trace(grammar, tokens, algorithm, &outcome.trace)?;
    let accepted_by_trace = outcome.trace.final_action() == Some(Action::Accept);
    if outcome.accepted != accepted_by_trace {
        return Err(violation(
            outcome.trace.len(),
            format!(
                "outcome says accepted = {} but the trace ends in {:?}",
                outcome.accepted,
                outcome.trace.final_action()
            ),
        ));
    }
    Ok(())
}

/// Replay `trace` as produced by `algorithm` over `tokens`.
///
/// # Errors
///
/// Returns the first step that is inconsistent with the grammar, the input
/// or its predecessor.
pub fn check_trace(
    grammar: &Grammar,
    tokens: &[&str],
    algorithm: Algorithm,
    trace: &Trace,
) -> Result<(), TraceViolation> {
    let steps = trace.steps();
    let Some(first) = steps.first() else {
        // Only a failed search may come back empty.
        return if algorithm.is_backtracking() {
            Ok(())
        } else {
            Err(violation(0, "deterministic trace is empty"))
        };
    };

    let initial = match algorithm.direction() {
        Direction::TopDown => vec![grammar.start_symbol()],
        Direction::BottomUp => Vec::new(),
    };
    if first.stack != initial || first.cursor != 0 {
        return Err(violation(0, "trace does not start from the initial state"));
    }

    let allowed = algorithm.capabilities().actions;
    for (index, step) in steps.iter().enumerate() {
        if !allowed.contains(&step.action) {
            return Err(violation(index, format!("{algorithm} never records `{}`", step.action)));
        }
        if let Some(rule) = &step.rule {
            if !grammar.contains(rule) {
                return Err(violation(index, format!("rule `{rule}` is not in the grammar")));
            }
        }

        let is_last = index + 1 == steps.len();
        if step.action.is_final() {
            if !is_last {
                return Err(violation(index, "final action before the end of the trace"));
            }
            return check_final(grammar, tokens, algorithm, index, step);
        }
        if is_last {
            return Err(violation(index, "trace does not end in accept or reject"));
        }

        let (stack, cursor) = apply(grammar, tokens, algorithm, index, step)?;
        let next = &steps[index + 1];
        if next.stack != stack || next.cursor != cursor {
            return Err(violation(
                index + 1,
                format!(
                    "expected stack {stack:?} at {cursor}, found {:?} at {}",
                    next.stack, next.cursor
                ),
            ));
        }
    }
    Ok(())
}

fn check_final(
    grammar: &Grammar,
    tokens: &[&str],
    algorithm: Algorithm,
    index: usize,
    step: &Step,
) -> Result<(), TraceViolation> {
    if step.rule.is_some() {
        return Err(violation(index, "final step carries a rule"));
    }
    let complete = step.cursor == tokens.len()
        && match algorithm.direction() {
            Direction::TopDown => step.stack.is_empty(),
            Direction::BottomUp => matches!(step.stack.as_slice(), [only] if only.is_nonterminal_named(grammar.start())),
        };
    match (step.action, complete) {
        (Action::Accept, false) => Err(violation(index, "accept in an incomplete state")),
        (Action::Reject, true) => Err(violation(index, "reject in an accepting state")),
        _ => Ok(()),
    }
}

/// The state a non-final step leads to.
fn apply(
    grammar: &Grammar,
    tokens: &[&str],
    algorithm: Algorithm,
    index: usize,
    step: &Step,
) -> Result<(Vec<Symbol>, usize), TraceViolation> {
    let mut stack = step.stack.clone();
    let mut cursor = step.cursor;
    let token = tokens.get(cursor).copied();

    if let Some(rule) = &step.rule {
        if let Some(earlier) = preferred_rule(grammar, algorithm, &stack, token, rule) {
            return Err(violation(index, format!("{algorithm} picks `{earlier}` before `{rule}`")));
        }
    }

    match (step.action, &step.rule) {
        (Action::Expand, Some(rule)) => {
            if stack.pop() != Some(rule.lhs_symbol()) {
                return Err(violation(index, "expanded rule does not match the top of stack"));
            }
            stack.extend(rule.rhs().iter().rev().cloned());
        }
        (Action::Leaf, Some(rule)) => {
            if stack.pop() != Some(rule.lhs_symbol()) || rule.leaf_literal() != token {
                return Err(violation(index, "leaf rule does not match the top of stack and token"));
            }
            cursor += 1;
        }
        (Action::Leaf, None) => {
            if !stack.pop().zip(token).is_some_and(|(top, token)| top.matches_token(token)) {
                return Err(violation(index, "leaf terminal does not match the token"));
            }
            cursor += 1;
        }
        (Action::Shift, None) => {
            let Some(token) = token else {
                return Err(violation(index, "shift past the end of input"));
            };
            stack.push(Symbol::terminal(token));
            cursor += 1;
        }
        (Action::Reduce, Some(rule)) => {
            if !rule.matches_suffix(&stack) {
                return Err(violation(index, "reduced rule does not match the stack"));
            }
            stack.truncate(stack.len() - rule.rhs().len());
            stack.push(rule.lhs_symbol());
        }
        (action, rule) => {
            return Err(violation(
                index,
                format!("`{action}` with rule {:?} is not a valid step", rule.as_ref().map(ToString::to_string)),
            ));
        }
    }

    // The backtracking top-down search matches exposed terminals silently.
    if algorithm == Algorithm::TopDownBacktracking {
        while let Some(top) = stack.last() {
            if !top.is_terminal() {
                break;
            }
            if !tokens.get(cursor).is_some_and(|token| top.matches_token(token)) {
                return Err(violation(index, "exposed terminal does not match the input"));
            }
            stack.pop();
            cursor += 1;
        }
    }

    Ok((stack, cursor))
}

/// A rule the deterministic parsers would try before `rule` in this state.
///
/// The greedy top-down parser takes the first alternative that is not a
/// single-terminal rule for a different token. The greedy bottom-up parser
/// takes the first matching reduction; an epsilon rule may have been
/// passed over only when a non-epsilon rule was chosen.
fn preferred_rule<'g>(
    grammar: &'g Grammar,
    algorithm: Algorithm,
    stack: &[Symbol],
    token: Option<&str>,
    rule: &Rule,
) -> Option<&'g Rule> {
    let mut earlier = grammar.rules().iter().take_while(|candidate| *candidate != rule);
    match algorithm {
        Algorithm::TopDown => earlier.find(|candidate| {
            candidate.lhs() == rule.lhs()
                && match candidate.leaf_literal() {
                    Some(literal) => token == Some(literal),
                    None => true,
                }
        }),
        Algorithm::BottomUp => {
            earlier.find(|candidate| candidate.matches_suffix(stack) && (rule.is_epsilon() || !candidate.is_epsilon()))
        }
        Algorithm::TopDownBacktracking | Algorithm::BottomUpBacktracking => None,
    }
}
