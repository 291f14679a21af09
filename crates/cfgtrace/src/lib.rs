//! # cfgtrace
//!
//! Classical context-free grammar parsing strategies that expose the full
//! derivation trace of every attempt.
//!
//! ## Overview
//!
//! Four independent strategies run over the same grammar model and emit the
//! same step-trace format:
//!
//! - **Deterministic top-down**: greedy predictive expansion, no backtracking
//! - **Deterministic bottom-up**: greedy shift-reduce, reductions before shifts
//! - **Backtracking top-down**: depth-first search over expansion choices
//! - **Backtracking bottom-up**: depth-first search over reduce/shift choices
//!
//! Rule order in the grammar is significant everywhere: it is the priority
//! among alternatives for the deterministic parsers and the exploration order
//! for the backtracking ones.
//!
//! ## Quick Start
//!
//! ```rust
//! use cfgtrace::{Algorithm, Grammar, ParseOptions};
//!
//! let grammar = Grammar::from_text(
//!     "s --> np, vp
//!      np --> det, n
//!      det --> [the]
//!      n --> [man]
//!      n --> [dog]
//!      vp --> tv, np
//!      tv --> [hit]",
//! )?;
//!
//! let tokens = cfgtrace::tokenize("The man hit the dog");
//! let outcome = cfgtrace::parse(&grammar, &tokens, Algorithm::BottomUp, &ParseOptions::default())?;
//!
//! assert!(outcome.accepted);
//! assert_eq!(outcome.trace.last().map(|s| s.action), Some(cfgtrace::Action::Accept));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] - Symbols, rules, the grammar model, text format and analysis
//! - [`trace`] - Step records and the append-only trace recorder
//! - [`backend`] - The four parsing strategies and algorithm dispatch
//! - [`error`] - Error types
//! - [`testing`] - Reference grammars and a trace replayer for tests

pub mod backend;
pub mod error;
pub mod grammar;
pub mod testing;
pub mod trace;

// Re-export commonly used types
pub use backend::{parse, parse_by_id, Algorithm, ParseOptions, ParserBackend};
pub use error::{AlgorithmError, DispatchError, GrammarError, ParseError, ParseMetrics, ParseOutcome};
pub use grammar::{tokenize, Grammar, GrammarBuilder, Rule, Symbol};
pub use trace::{Action, Step, Trace};
