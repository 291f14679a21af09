//! Text rendering for parse outcomes and grammar diagnostics.

use cfgtrace::grammar::GrammarWarning;
use cfgtrace::{Algorithm, ParseError, ParseOutcome};

/// Render an outcome as a numbered step table followed by a verdict line.
#[must_use]
pub fn table(outcome: &ParseOutcome) -> String {
    let mut out = String::new();
    let stack_width = outcome
        .trace
        .iter()
        .map(|step| stack_text(&step.stack).len())
        .max()
        .unwrap_or(0)
        .max("stack".len());

    out.push_str(&format!("{:>4}  {:<6}  {:>5}  {:<stack_width$}  rule", "#", "action", "input", "stack"));
    out.push('\n');
    for (i, step) in outcome.trace.iter().enumerate() {
        let rule = step.rule.as_ref().map(ToString::to_string).unwrap_or_default();
        let row = format!(
            "{:>4}  {:<6}  {:>5}  {:<stack_width$}  {rule}",
            i + 1,
            step.action,
            step.cursor,
            stack_text(&step.stack),
        );
        out.push_str(row.trim_end());
        out.push('\n');
    }
    out.push_str(&verdict(outcome));
    out.push('\n');
    out
}

/// Pretty JSON in the `{"success", "steps"}` shape.
pub fn json(outcome: &ParseOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(outcome)
}

/// One-line summary, e.g. `accepted in 8 steps`.
#[must_use]
pub fn verdict(outcome: &ParseOutcome) -> String {
    let metrics = &outcome.metrics;
    if outcome.accepted {
        format!(
            "accepted in {} steps ({} explored, {} backtracks)",
            metrics.steps, metrics.explored, metrics.backtracks
        )
    } else if outcome.trace.is_empty() {
        format!(
            "rejected: no derivation ({} explored, {} backtracks)",
            metrics.explored, metrics.backtracks
        )
    } else {
        format!("rejected after {} steps", metrics.steps)
    }
}

/// A `compare` row: algorithm id, verdict and step count or error.
#[must_use]
pub fn compare_row(algorithm: Algorithm, result: &Result<ParseOutcome, ParseError>) -> String {
    match result {
        Ok(outcome) => format!(
            "{algorithm:<24} {:<7} {:>6} steps {:>8} explored",
            if outcome.accepted { "accept" } else { "reject" },
            outcome.metrics.steps,
            outcome.metrics.explored,
        ),
        Err(err) => format!("{algorithm:<24} {:<7} {err}", "error"),
    }
}

/// Grammar diagnostics, one per line, or `ok` when there are none.
#[must_use]
pub fn warnings(warnings: &[GrammarWarning]) -> String {
    if warnings.is_empty() {
        return "ok\n".to_string();
    }
    warnings.iter().map(|warning| format!("warning: {warning}\n")).collect()
}

fn stack_text(stack: &[cfgtrace::Symbol]) -> String {
    let symbols: Vec<String> = stack.iter().map(ToString::to_string).collect();
    format!("[{}]", symbols.join(", "))
}
