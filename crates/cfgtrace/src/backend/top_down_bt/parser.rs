use super::state::{settle, Frame};
use super::TopDownBtConfig;
use crate::backend::search::Search;
use crate::error::{ParseError, ParseMetrics, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::{Action, Trace};
use std::time::Instant;

pub(crate) fn parse(grammar: &Grammar, tokens: &[&str], config: &TopDownBtConfig) -> Result<ParseOutcome, ParseError> {
    let started = Instant::now();
    let mut trace = Trace::new();
    let mut search = Search::new(config.max_depth, config.max_work);
    let mut max_stack = 1;

    search.descend(Frame::new(vec![grammar.start_symbol()], 0, 0));

    loop {
        search.tick()?;
        let Some(frame) = search.current() else {
            break;
        };
        trace.rewind(frame.trace_len);

        let Some(rule) = frame.next_alternative(grammar, tokens) else {
            search.backtrack();
            continue;
        };

        let action = if rule.leaf_literal().is_some() {
            Action::Leaf
        } else {
            Action::Expand
        };
        trace.record(&frame.stack, frame.cursor, action, Some(rule));

        let (mut stack, mut cursor) = frame.successor(rule);
        if !settle(&mut stack, &mut cursor, tokens) {
            search.dead_end();
            continue;
        }
        max_stack = max_stack.max(stack.len());

        if stack.is_empty() {
            if cursor == tokens.len() {
                trace.record(&stack, cursor, Action::Accept, None);
                tracing::debug!(steps = trace.len(), explored = search.work(), "top-down search accepted");
                return Ok(ParseOutcome {
                    accepted: true,
                    metrics: metrics(&search, &trace, cursor, max_stack, started),
                    trace,
                });
            }
            search.dead_end();
            continue;
        }

        search.descend(Frame::new(stack, cursor, trace.len()));
    }

    search.exhausted()?;
    tracing::debug!(explored = search.work(), "top-down search exhausted");
    Ok(ParseOutcome::exhausted(metrics(&search, &Trace::new(), 0, max_stack, started)))
}

fn metrics(search: &Search<Frame>, trace: &Trace, cursor: usize, max_stack: usize, started: Instant) -> ParseMetrics {
    ParseMetrics {
        steps: trace.len(),
        tokens_consumed: cursor,
        explored: search.work(),
        backtracks: search.backtracks(),
        max_depth: search.deepest(),
        max_stack,
        parse_time: started.elapsed(),
    }
}
