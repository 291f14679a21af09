//! # Error Types
//!
//! Error and outcome types shared by the grammar model and the parsers.
//!
//! ## Overview
//!
//! A sentence that is not derivable from the grammar is *not* an error: every
//! parser reports it as `Ok(ParseOutcome { accepted: false, .. })` together
//! with its trace. The `Err` side is reserved for problems the caller has to
//! fix or budget for:
//!
//! - [`GrammarError`]: the grammar is malformed, detected before any parser runs
//! - [`AlgorithmError`]: the algorithm identifier is not one of the four strategies
//! - [`ParseError`]: invalid parser limits or an exhausted resource budget
//! - [`DispatchError`]: either of the last two, for callers that select the
//!   algorithm by its identifier

use crate::trace::Trace;
use std::time::Duration;
use thiserror::Error;

/// A malformed grammar, reported by [`GrammarBuilder`](crate::GrammarBuilder)
/// or by the text format parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("line {line}: expected `lhs --> rhs`, found {text:?}")]
    MissingArrow { line: usize, text: String },

    #[error("line {line}: rule has an empty left-hand side")]
    EmptyLhs { line: usize },

    #[error("line {line}: left-hand side {lhs:?} must be a nonterminal")]
    TerminalLhs { line: usize, lhs: String },

    #[error("line {line}: right-hand side contains an empty symbol")]
    EmptySymbol { line: usize },

    #[error("line {line}: malformed terminal {symbol:?}")]
    MalformedTerminal { line: usize, symbol: String },

    #[error("line {line}: invalid identifier {symbol:?}")]
    InvalidIdentifier { line: usize, symbol: String },

    #[error("line {line}: epsilon must be the only symbol on the right-hand side")]
    EpsilonNotAlone { line: usize },

    #[error("invalid start symbol {0:?}")]
    InvalidStart(String),
}

impl GrammarError {
    /// The 1-based source line the error refers to, when it came from text.
    ///
    /// Errors raised by the builder API carry line `0`.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::MissingArrow { line, .. }
            | Self::EmptyLhs { line }
            | Self::TerminalLhs { line, .. }
            | Self::EmptySymbol { line }
            | Self::MalformedTerminal { line, .. }
            | Self::InvalidIdentifier { line, .. }
            | Self::EpsilonNotAlone { line } => {
                if *line == 0 {
                    None
                } else {
                    Some(*line)
                }
            }
            Self::InvalidStart(_) => None,
        }
    }
}

/// An algorithm identifier that does not name one of the four strategies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgorithmError {
    #[error("Algorithm not supported: {0:?}")]
    Unknown(String),
}

/// Errors raised by a parser backend.
///
/// None of these mean "the sentence is not in the language"; they mean the
/// parser could not reach a verdict within its configured limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid parser configuration: {0}")]
    InvalidConfig(String),

    #[error("step limit of {limit} exceeded after consuming {cursor} token(s)")]
    StepLimitExceeded { limit: usize, cursor: usize },

    #[error("search work limit of {limit} exceeded")]
    WorkLimitExceeded { limit: usize },

    #[error("search depth limit of {limit} reached; the result is inconclusive")]
    DepthLimitExceeded { limit: usize },
}

/// Failure of [`parse_by_id`](crate::backend::parse_by_id).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Counters collected while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ParseMetrics {
    /// Number of steps in the returned trace
    pub steps: usize,
    /// Number of input tokens consumed on the returned path
    pub tokens_consumed: usize,
    /// Number of search states visited (equals `steps` for deterministic parsers)
    pub explored: usize,
    /// Number of abandoned search branches
    pub backtracks: usize,
    /// Deepest frame stack reached by a backtracking search
    pub max_depth: usize,
    /// Largest parser stack seen on any explored state
    pub max_stack: usize,
    /// Wall-clock time spent in the parser
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub parse_time: Duration,
}

/// The result of running one parser over one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ParseOutcome {
    /// Whether the sentence was derived from the start symbol
    #[cfg_attr(feature = "serialize", serde(rename = "success"))]
    pub accepted: bool,
    /// The ordered derivation steps
    #[cfg_attr(feature = "serialize", serde(rename = "steps"))]
    pub trace: Trace,
    /// Counters collected while parsing
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub metrics: ParseMetrics,
}

impl ParseOutcome {
    /// A backtracking search that found no derivation: `(false, [])`.
    #[must_use]
    pub fn exhausted(metrics: ParseMetrics) -> Self {
        Self {
            accepted: false,
            trace: Trace::new(),
            metrics,
        }
    }
}
