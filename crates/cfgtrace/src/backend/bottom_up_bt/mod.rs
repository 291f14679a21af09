mod config;
mod parser;
mod state;
mod viable;

pub use config::BottomUpBtConfig;

use crate::backend::common::token_slices;
use crate::backend::{Algorithm, BackendCapabilities, Direction, ParserBackend};
use crate::error::{ParseError, ParseOutcome};
use crate::grammar::Grammar;
use crate::trace::Action;

/// Backtracking shift-reduce parser.
///
/// Every state first tries each reduction whose right-hand side matches the
/// top of the stack, in grammar order, and falls back to shifting the next
/// token. The search succeeds as soon as the stack is exactly the start
/// symbol with all input consumed; the trace then ends in an `accept` step
/// with stack `[start]`.
///
/// Children that cannot lead to acceptance are skipped without counting
/// toward the depth limit: stacks that are not viable prefixes, states that
/// repeat an ancestor, and runs of epsilon reductions longer than any
/// minimal derivation needs. Failures are therefore definite unless the
/// depth limit actually cut a branch.
///
/// ```rust
/// use cfgtrace::backend::bottom_up_bt::{BottomUpBtConfig, BottomUpBtParser};
/// use cfgtrace::backend::ParserBackend;
/// use cfgtrace::Grammar;
///
/// let grammar = Grammar::from_text("a --> [x]\nb --> [x]\ns --> b")?;
/// let parser = BottomUpBtParser::new(&grammar, BottomUpBtConfig::default())?;
/// let outcome = parser.parse(&["x"])?;
///
/// assert!(outcome.accepted);
/// assert_eq!(outcome.trace.len(), 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct BottomUpBtParser<'g> {
    grammar: &'g Grammar,
    config: BottomUpBtConfig,
}

impl<'g> ParserBackend<'g> for BottomUpBtParser<'g> {
    type Config = BottomUpBtConfig;

    fn new(grammar: &'g Grammar, config: Self::Config) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self { grammar, config })
    }

    fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParseOutcome, ParseError> {
        let tokens = token_slices(tokens);
        tracing::debug!(
            tokens = tokens.len(),
            max_depth = self.config.max_depth,
            "bottom-up backtracking parse"
        );
        parser::parse(self.grammar, &tokens, &self.config)
    }

    fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    fn capabilities() -> BackendCapabilities {
        BackendCapabilities {
            name: "Backtracking bottom-up",
            algorithm: Algorithm::BottomUpBacktracking,
            direction: Direction::BottomUp,
            backtracking: true,
            actions: &[Action::Shift, Action::Reduce, Action::Accept],
        }
    }
}
