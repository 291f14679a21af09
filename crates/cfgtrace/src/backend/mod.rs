//! # Parser Backends
//!
//! The four parsing strategies, each behind the [`ParserBackend`] trait.
//!
//! ## Available Backends
//!
//! - **Deterministic top-down** ([`top_down`]): predictive expansion, first
//!   applicable rule wins, no backtracking
//! - **Deterministic bottom-up** ([`bottom_up`]): shift-reduce, reductions
//!   before shifts, first matching rule wins
//! - **Backtracking top-down** ([`top_down_bt`]): depth-first search over
//!   expansion choices in grammar order
//! - **Backtracking bottom-up** ([`bottom_up_bt`]): depth-first search over
//!   reductions (grammar order) then shift
//!
//! ## Usage
//!
//! ```rust
//! use cfgtrace::backend::top_down::{TopDownConfig, TopDownParser};
//! use cfgtrace::backend::ParserBackend;
//! use cfgtrace::Grammar;
//!
//! let grammar = Grammar::from_text("s --> [a], s, [b]\ns --> [a], [b]")?;
//! let parser = TopDownParser::new(&grammar, TopDownConfig::default())?;
//!
//! // The greedy parser keeps choosing the recursive alternative and fails.
//! let outcome = parser.parse(&["a", "a", "b", "b"])?;
//! assert!(!outcome.accepted);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Parsers never call each other and share no state across calls; each
//! [`parse`](ParserBackend::parse) builds its stack, cursor and trace from
//! scratch.

use crate::error::{AlgorithmError, ParseError, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::Action;
use std::fmt;
use std::str::FromStr;

pub mod bottom_up;
pub mod bottom_up_bt;
pub mod top_down;
pub mod top_down_bt;

mod common;
mod search;

use bottom_up::{BottomUpConfig, BottomUpParser};
use bottom_up_bt::{BottomUpBtConfig, BottomUpBtParser};
use top_down::{TopDownConfig, TopDownParser};
use top_down_bt::{TopDownBtConfig, TopDownBtParser};

/// Main parser backend trait
pub trait ParserBackend<'g>: Sized {
    type Config: Default + Clone;

    /// Create a parser over `grammar`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidConfig`] if a limit in `config` is zero.
    fn new(grammar: &'g Grammar, config: Self::Config) -> Result<Self, ParseError>;

    /// Parse one complete, tokenized sentence.
    ///
    /// A sentence that is not derivable is `Ok` with `accepted == false`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the configured limits are exhausted
    /// before a verdict is reached.
    fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError>;

    /// The grammar this parser runs over
    fn grammar(&self) -> &'g Grammar;

    /// Get backend capabilities
    fn capabilities() -> BackendCapabilities;
}

/// Capabilities of a parsing backend
#[derive(Debug, Clone)]
pub struct BackendCapabilities {
    pub name: &'static str,
    pub algorithm: Algorithm,
    pub direction: Direction,
    pub backtracking: bool,
    /// Actions that can appear in this backend's traces
    pub actions: &'static [Action],
}

/// Which end of the derivation a parser starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Start from the start symbol and expand towards the tokens
    TopDown,
    /// Start from the tokens and reduce towards the start symbol
    BottomUp,
}

/// The four parsing strategies, identified on the wire by
/// `top-down`, `bottom-up`, `top-down-backtracking` and
/// `bottom-up-backtracking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    TopDown,
    BottomUp,
    TopDownBacktracking,
    BottomUpBacktracking,
}

impl Algorithm {
    pub const ALL: [Self; 4] = [
        Self::TopDown,
        Self::BottomUp,
        Self::TopDownBacktracking,
        Self::BottomUpBacktracking,
    ];

    /// The wire identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::BottomUp => "bottom-up",
            Self::TopDownBacktracking => "top-down-backtracking",
            Self::BottomUpBacktracking => "bottom-up-backtracking",
        }
    }

    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::TopDown | Self::TopDownBacktracking => Direction::TopDown,
            Self::BottomUp | Self::BottomUpBacktracking => Direction::BottomUp,
        }
    }

    #[must_use]
    pub const fn is_backtracking(self) -> bool {
        matches!(self, Self::TopDownBacktracking | Self::BottomUpBacktracking)
    }

    #[must_use]
    pub fn capabilities(self) -> BackendCapabilities {
        match self {
            Self::TopDown => TopDownParser::capabilities(),
            Self::BottomUp => BottomUpParser::capabilities(),
            Self::TopDownBacktracking => TopDownBtParser::capabilities(),
            Self::BottomUpBacktracking => BottomUpBtParser::capabilities(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.id() == s.trim())
            .ok_or_else(|| AlgorithmError::Unknown(s.to_string()))
    }
}

/// Limits for every backend, bundled for dispatch by [`Algorithm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct ParseOptions {
    /// Step limit for the deterministic parsers
    pub max_steps: usize,
    /// Frame depth limit for the backtracking parsers
    pub max_depth: usize,
    /// Visited-state limit for the backtracking parsers
    pub max_work: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_steps: common::DEFAULT_MAX_STEPS,
            max_depth: common::DEFAULT_MAX_DEPTH,
            max_work: common::DEFAULT_MAX_WORK,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub const fn top_down(&self) -> TopDownConfig {
        TopDownConfig {
            max_steps: self.max_steps,
        }
    }

    #[must_use]
    pub const fn bottom_up(&self) -> BottomUpConfig {
        BottomUpConfig {
            max_steps: self.max_steps,
        }
    }

    #[must_use]
    pub const fn top_down_bt(&self) -> TopDownBtConfig {
        TopDownBtConfig {
            max_depth: self.max_depth,
            max_work: self.max_work,
        }
    }

    #[must_use]
    pub const fn bottom_up_bt(&self) -> BottomUpBtConfig {
        BottomUpBtConfig {
            max_depth: self.max_depth,
            max_work: self.max_work,
        }
    }
}

/// Run `algorithm` over `tokens`.
///
/// # Errors
///
/// Returns a [`ParseError`] for invalid limits or an exhausted budget.
pub fn parse<S: AsRef<str>>(
    grammar: &Grammar,
    tokens: &[S],
    algorithm: Algorithm,
    options: &ParseOptions,
) -> Result<ParseOutcome, ParseError> {
    let _span = tracing::debug_span!("parse", algorithm = algorithm.id()).entered();
    match algorithm {
        Algorithm::TopDown => TopDownParser::new(grammar, options.top_down())?.parse(tokens),
        Algorithm::BottomUp => BottomUpParser::new(grammar, options.bottom_up())?.parse(tokens),
        Algorithm::TopDownBacktracking => {
            TopDownBtParser::new(grammar, options.top_down_bt())?.parse(tokens)
        }
        Algorithm::BottomUpBacktracking => {
            BottomUpBtParser::new(grammar, options.bottom_up_bt())?.parse(tokens)
        }
    }
}

/// Resolve a wire identifier and run it.
///
/// # Errors
///
/// Unknown identifiers are reported before any parser runs.
pub fn parse_by_id<S: AsRef<str>>(
    grammar: &Grammar,
    tokens: &[S],
    algorithm_id: &str,
    options: &ParseOptions,
) -> Result<ParseOutcome, crate::error::DispatchError> {
    let algorithm: Algorithm = algorithm_id.parse()?;
    Ok(parse(grammar, tokens, algorithm, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_ids_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.id().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = "earley".parse::<Algorithm>().unwrap_err();
        assert_eq!(err, AlgorithmError::Unknown("earley".into()));
    }

    #[test]
    fn capabilities_match_algorithm() {
        for algorithm in Algorithm::ALL {
            let caps = algorithm.capabilities();
            assert_eq!(caps.algorithm, algorithm);
            assert_eq!(caps.direction, algorithm.direction());
            assert_eq!(caps.backtracking, algorithm.is_backtracking());
        }
    }

    #[test]
    fn parse_by_id_reports_unknown_ids() {
        let grammar = Grammar::from_text("s --> [a]").unwrap();
        let err = parse_by_id(&grammar, &["a"], "sideways", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, crate::error::DispatchError::Algorithm(_)));
    }

    #[test]
    fn options_feed_every_config() {
        let options = ParseOptions {
            max_steps: 7,
            max_depth: 8,
            max_work: 9,
        };
        assert_eq!(options.top_down().max_steps, 7);
        assert_eq!(options.bottom_up().max_steps, 7);
        assert_eq!(options.top_down_bt().max_depth, 8);
        assert_eq!(options.bottom_up_bt().max_work, 9);
    }
}
