use super::state::{Frame, Move};
use super::viable::Viability;
use super::BottomUpBtConfig;
use crate::backend::common::is_accepting;
use crate::backend::search::Search;
use crate::error::{ParseError, ParseMetrics, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::{Action, Trace};
use std::time::Instant;

pub(crate) fn parse(grammar: &Grammar, tokens: &[&str], config: &BottomUpBtConfig) -> Result<ParseOutcome, ParseError> {
    let started = Instant::now();
    let mut trace = Trace::new();
    let mut search = Search::new(config.max_depth, config.max_work);
    let mut viability = Viability::new(grammar);
    let mut max_stack = 0;

    // The empty stack is never `[start]`, so the root needs no success check.
    search.descend(Frame::root());

    loop {
        search.tick()?;
        let Some(frame) = search.current() else {
            break;
        };
        trace.rewind(frame.trace_len);

        let Some(mv) = frame.next_move(grammar, tokens.len()) else {
            search.backtrack();
            continue;
        };

        match mv {
            Move::Reduce(rule) => trace.record(&frame.stack, frame.cursor, Action::Reduce, Some(rule)),
            Move::Shift => trace.record(&frame.stack, frame.cursor, Action::Shift, None),
        }
        let child = frame.successor(mv, tokens, trace.len());
        max_stack = max_stack.max(child.stack.len());

        if is_accepting(grammar, &child.stack, child.cursor, tokens.len()) {
            trace.record(&child.stack, child.cursor, Action::Accept, None);
            tracing::debug!(steps = trace.len(), explored = search.work(), "bottom-up search accepted");
            return Ok(ParseOutcome {
                accepted: true,
                metrics: metrics(&search, &trace, child.cursor, max_stack, started),
                trace,
            });
        }

        if !viability.admits(&child.stack)
            || child.epsilon_run() > viability.epsilon_run_limit(tokens.len() - child.cursor)
            || child.revisits(search.path())
        {
            tracing::trace!(cursor = child.cursor, stack = child.stack.len(), "dead state skipped");
            search.dead_end();
            continue;
        }

        search.descend(child);
    }

    search.exhausted()?;
    tracing::debug!(explored = search.work(), "bottom-up search exhausted");
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
