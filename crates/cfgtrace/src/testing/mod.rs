//! # Testing Utilities
//!
//! Helpers for testing parsers and grammars.
//!
//! - [`grammars`]: small reference grammars with known behavior
//! - [`generators`]: derive sentences from a grammar, driven by a choice
//!   sequence so `proptest` can shrink them
//! - [`replay`]: re-execute a trace step by step and report the first step
//!   that does not follow from the previous one

pub mod generators;
pub mod grammars;
pub mod replay;

pub use generators::derive_sentence;
pub use replay::{check_outcome, check_trace, TraceViolation};
