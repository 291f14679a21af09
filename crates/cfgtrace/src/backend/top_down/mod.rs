mod config;
mod parser;

pub use config::TopDownConfig;

use crate::backend::common::token_slices;
use crate::backend::{Algorithm, BackendCapabilities, Direction, ParserBackend};
use crate::error::{ParseError, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::Action;

/// Deterministic top-down parser.
///
/// Keeps a prediction stack that starts as `[start]`. At each step the top
/// symbol is expanded with the first applicable rule in grammar order, or
/// matched against the current token. There is no backtracking: a choice that
/// later turns out wrong ends in a `reject` step.
///
/// # Example
///
/// ```rust
/// use cfgtrace::backend::top_down::{TopDownConfig, TopDownParser};
/// use cfgtrace::backend::ParserBackend;
/// use cfgtrace::{Action, Grammar};
///
/// let grammar = Grammar::from_text("s --> [hello], name\nname --> [world]")?;
/// let parser = TopDownParser::new(&grammar, TopDownConfig::default())?;
/// let outcome = parser.parse(&["hello", "world"])?;
///
/// let actions: Vec<Action> = outcome.trace.iter().map(|step| step.action).collect();
/// assert_eq!(actions, [Action::Expand, Action::Leaf, Action::Leaf, Action::Accept]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct TopDownParser<'g> {
    grammar: &'g Grammar,
    config: TopDownConfig,
}

impl<'g> ParserBackend<'g> for TopDownParser<'g> {
    type Config = TopDownConfig;

    fn new(grammar: &'g Grammar, config: Self::Config) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self { grammar, config })
    }

    fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        let tokens = token_slices(tokens);
        tracing::debug!(tokens = tokens.len(), rules = self.grammar.len(), "top-down parse");
        parser::parse(self.grammar, &tokens, &self.config)
    }

    fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    fn capabilities() -> BackendCapabilities {
        BackendCapabilities {
            name: "Deterministic top-down",
            algorithm: Algorithm::TopDown,
            direction: Direction::TopDown,
            backtracking: false,
            actions: &[Action::Expand, Action::Leaf, Action::Accept, Action::Reject],
        }
    }
}
