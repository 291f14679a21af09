use super::BottomUpConfig;
use crate::backend::common::{apply_reduction, deterministic_metrics, find_reduction, is_accepting};
use crate::error::{ParseError, ParseOutcome};
use crate::grammar::{Grammar, Symbol};
use crate::trace::{Action, Trace};
use std::time::Instant;

pub(crate) fn parse(grammar: &Grammar, tokens: &[&str], config: &BottomUpConfig) -> Result<ParseOutcome, ParseError> {
    let started = Instant::now();
    let mut stack: Vec<Symbol> = Vec::new();
    let mut cursor = 0;
    let mut max_stack = 0;
    // Nothing has happened yet, so an epsilon reduction may open the parse.
    let mut epsilon_allowed = true;
    let mut trace = Trace::new();

    let accepted = loop {
        if trace.len() >= config.max_steps {
            tracing::debug!(limit = config.max_steps, cursor, "step limit exceeded");
            return Err(ParseError::StepLimitExceeded {
                limit: config.max_steps,
                cursor,
            });
        }

        if let Some((_, rule)) = find_reduction(grammar, &stack, 0, epsilon_allowed) {
            trace.record(&stack, cursor, Action::Reduce, Some(rule));
            apply_reduction(&mut stack, rule);
            epsilon_allowed = false;
        } else if let Some(token) = tokens.get(cursor) {
            trace.record(&stack, cursor, Action::Shift, None);
            stack.push(Symbol::terminal(*token));
            cursor += 1;
            epsilon_allowed = true;
        } else {
            let accepted = is_accepting(grammar, &stack, cursor, tokens.len());
            let action = if accepted { Action::Accept } else { Action::Reject };
            trace.record(&stack, cursor, action, None);
            break accepted;
        }
        max_stack = max_stack.max(stack.len());
    };

    tracing::debug!(accepted, steps = trace.len(), "bottom-up parse finished");
    Ok(ParseOutcome {
        accepted,
        metrics: deterministic_metrics(&trace, cursor, max_stack, started),
        trace,
    })
}
