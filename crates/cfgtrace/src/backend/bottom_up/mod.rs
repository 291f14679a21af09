mod config;
mod parser;

pub use config::BottomUpConfig;

use crate::backend::common::token_slices;
use crate::backend::{Algorithm, BackendCapabilities, Direction, ParserBackend};
use crate::error::{ParseError, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::Action;

/// Deterministic shift-reduce parser.
///
/// Reduction always beats shifting, and among reductions the first rule in
/// grammar order whose right-hand side matches the top of the stack wins.
/// Epsilon reductions are only offered at the start of a parse and right
/// after a shift.
///
/// ```rust
/// use cfgtrace::backend::bottom_up::{BottomUpConfig, BottomUpParser};
/// use cfgtrace::backend::ParserBackend;
/// use cfgtrace::Grammar;
///
/// let grammar = Grammar::from_text("s --> [a], s, [b]\ns --> [a], [b]")?;
/// let parser = BottomUpParser::new(&grammar, BottomUpConfig::default())?;
/// assert!(parser.parse(&["a", "a", "b", "b"])?.accepted);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct BottomUpParser<'g> {
    grammar: &'g Grammar,
    config: BottomUpConfig,
}

impl<'g> ParserBackend<'g> for BottomUpParser<'g> {
    type Config = BottomUpConfig;

    fn new(grammar: &'g Grammar, config: Self::Config) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self { grammar, config })
    }

    fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        let tokens = token_slices(tokens);
        tracing::debug!(tokens = tokens.len(), rules = self.grammar.len(), "bottom-up parse");
        parser::parse(self.grammar, &tokens, &self.config)
    }

    fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    fn capabilities() -> BackendCapabilities {
        BackendCapabilities {
            name: "Deterministic bottom-up",
            algorithm: Algorithm::BottomUp,
            direction: Direction::BottomUp,
            backtracking: false,
            actions: &[Action::Shift, Action::Reduce, Action::Accept, Action::Reject],
        }
    }
}
