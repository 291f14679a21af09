//! # Step Traces
//!
//! Every parser emits the same output: an ordered list of [`Step`]s, each one
//! recording the parser state *before* its action was applied.
//!
//! | Parser                  | Actions                              |
//! |-------------------------|--------------------------------------|
//! | deterministic top-down  | `expand`, `leaf`, `accept`, `reject` |
//! | deterministic bottom-up | `shift`, `reduce`, `accept`, `reject`|
//! | backtracking top-down   | `expand`, `leaf`, `accept`           |
//! | backtracking bottom-up  | `shift`, `reduce`, `accept`          |
//!
//! Each step owns a copy of the stack, so later mutation of the parser's
//! working stack never changes a step that was already recorded.

use crate::grammar::{Rule, Symbol};
use std::fmt;

/// What a step did to the parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "lowercase"))]
pub enum Action {
    /// Replace the top nonterminal with a rule's right-hand side
    Expand,
    /// Match the current token through a single-terminal rule or a bare terminal
    Leaf,
    /// Push the next token onto the stack as a terminal
    Shift,
    /// Replace a right-hand-side suffix of the stack with its left-hand side
    Reduce,
    Accept,
    Reject,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expand => "expand",
            Self::Leaf => "leaf",
            Self::Shift => "shift",
            Self::Reduce => "reduce",
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }

    /// Whether this action ends a trace.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Accept | Self::Reject)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One recorded derivation step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Step {
    /// Snapshot of the stack before the action; the last element is the top
    pub stack: Vec<Symbol>,
    /// Index of the next unconsumed input token
    #[cfg_attr(feature = "serialize", serde(rename = "input_index"))]
    pub cursor: usize,
    pub action: Action,
    /// The grammar rule the action applied, if any
    pub rule: Option<Rule>,
}

impl Step {
    /// The top of the snapshot stack.
    #[must_use]
    pub fn top(&self) -> Option<&Symbol> {
        self.stack.last()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} [", self.action)?;
        for (i, symbol) in self.stack.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "] @{}", self.cursor)?;
        if let Some(rule) = &self.rule {
            write!(f, "  {rule}")?;
        }
        Ok(())
    }
}

/// Append-only log of derivation steps.
///
/// Backtracking parsers rewind the log to a choice point when a branch fails,
/// so the finished trace is exactly one path from the initial state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a step, copying `stack`.
    pub(crate) fn record(&mut self, stack: &[Symbol], cursor: usize, action: Action, rule: Option<&Rule>) {
        let step = Step {
            stack: stack.to_vec(),
            cursor,
            action,
            rule: rule.cloned(),
        };
        tracing::trace!(index = self.steps.len(), step = %step, "record");
        self.steps.push(step);
    }

    /// Discard every step after the first `len`.
    pub(crate) fn rewind(&mut self, len: usize) {
        self.steps.truncate(len);
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// The action of the last step.
    #[must_use]
    pub fn final_action(&self) -> Option<Action> {
        self.steps.last().map(|step| step.action)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// The rules applied along the trace, in order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.steps.iter().filter_map(|step| step.rule.as_ref())
    }

    #[must_use]
    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>4}  {step}", i + 1)?;
        }
        Ok(())
    }
}
