mod config;
mod parser;
mod state;

pub use config::TopDownBtConfig;

use crate::backend::common::token_slices;
use crate::backend::{Algorithm, BackendCapabilities, Direction, ParserBackend};
use crate::error::{ParseError, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::Action;

/// Backtracking top-down parser.
///
/// Explores expansion choices depth-first, in grammar order, on an explicit
/// frame stack. Terminals exposed on top of the stack are matched against the
/// input without recording a step. The returned trace is the single path that
/// succeeded, ending in `accept`; a failed search returns an empty trace.
///
/// Left recursion drives the search into its depth limit; see
/// [`TopDownBtConfig::max_depth`].
#[derive(Debug, Clone)]
pub struct TopDownBtParser<'g> {
    grammar: &'g Grammar,
    config: TopDownBtConfig,
}

impl<'g> ParserBackend<'g> for TopDownBtParser<'g> {
    type Config = TopDownBtConfig;

    fn new(grammar: &'g Grammar, config: Self::Config) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self { grammar, config })
    }

    fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        let tokens = token_slices(tokens);
        tracing::debug!(
            tokens = tokens.len(),
            max_depth = self.config.max_depth,
            "top-down backtracking parse"
        );
        parser::parse(self.grammar, &tokens, &self.config)
    }

    fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    fn capabilities() -> BackendCapabilities {
        BackendCapabilities {
            name: "Backtracking top-down",
            algorithm: Algorithm::TopDownBacktracking,
            direction: Direction::TopDown,
            backtracking: true,
            actions: &[Action::Expand, Action::Leaf, Action::Accept],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_are_rejected() {
        let grammar = Grammar::from_text("s --> [a]").unwrap();
        for config in [
            TopDownBtConfig { max_depth: 0, max_work: 1 },
            TopDownBtConfig { max_depth: 1, max_work: 0 },
        ] {
            assert!(matches!(
                TopDownBtParser::new(&grammar, config),
                Err(ParseError::InvalidConfig(_))
            ));
        }
    }
}
