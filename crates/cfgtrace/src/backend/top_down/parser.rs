use super::TopDownConfig;
use crate::backend::common::deterministic_metrics;
use crate::error::{ParseError, ParseOutcome};
use crate::grammar::{Grammar, Rule, Symbol};
use crate::trace::{Action, Trace};
use std::time::Instant;

/// The single move chosen for the current top of stack.
enum Move<'g> {
    Expand(&'g Rule),
    /// Consume one token, through a single-terminal rule or a bare terminal
    Leaf(Option<&'g Rule>),
}

pub(crate) fn parse(grammar: &Grammar, tokens: &[&str], config: &TopDownConfig) -> Result<ParseOutcome, ParseError> {
    let started = Instant::now();
    let mut stack = vec![grammar.start_symbol()];
    let mut cursor = 0;
    let mut max_stack = stack.len();
    let mut trace = Trace::new();

    let accepted = loop {
        if trace.len() >= config.max_steps {
            tracing::debug!(limit = config.max_steps, cursor, "step limit exceeded");
            return Err(ParseError::StepLimitExceeded {
                limit: config.max_steps,
                cursor,
            });
        }

        let Some(top) = stack.last() else {
            let accepted = cursor == tokens.len();
            let action = if accepted { Action::Accept } else { Action::Reject };
            trace.record(&stack, cursor, action, None);
            break accepted;
        };

        match choose(grammar, top, tokens.get(cursor).copied()) {
            Some(Move::Expand(rule)) => {
                trace.record(&stack, cursor, Action::Expand, Some(rule));
                stack.pop();
                stack.extend(rule.rhs().iter().rev().cloned());
            }
            Some(Move::Leaf(rule)) => {
                trace.record(&stack, cursor, Action::Leaf, rule);
                stack.pop();
                cursor += 1;
            }
            None => {
                trace.record(&stack, cursor, Action::Reject, None);
                break false;
            }
        }
        max_stack = max_stack.max(stack.len());
    };

    tracing::debug!(accepted, steps = trace.len(), "top-down parse finished");
    Ok(ParseOutcome {
        accepted,
        metrics: deterministic_metrics(&trace, cursor, max_stack, started),
        trace,
    })
}

/// Pick the move for `top` greedily.
///
/// For a nonterminal the first rule in grammar order wins if it is an epsilon
/// rule, a rule with more than a lone terminal, or a single-terminal rule whose
/// literal equals the current token. A terminal on top only matches the
/// current token.
fn choose<'g>(grammar: &'g Grammar, top: &Symbol, token: Option<&str>) -> Option<Move<'g>> {
    match top {
        Symbol::Nonterminal(name) => grammar
            .rules()
            .iter()
            .filter(|rule| rule.lhs() == name.as_str())
            .find_map(|rule| match rule.leaf_literal() {
                Some(literal) => (token == Some(literal)).then_some(Move::Leaf(Some(rule))),
                None => Some(Move::Expand(rule)),
            }),
        Symbol::Terminal(_) => token
            .is_some_and(|token| top.matches_token(token))
            .then_some(Move::Leaf(None)),
    }
}
