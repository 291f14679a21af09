use crate::error::GrammarError;
use crate::grammar::{is_identifier, is_literal, Grammar, Rule, Symbol, DEFAULT_START};
use compact_str::CompactString;

/// Builder for [`Grammar`].
///
/// Rules keep the order in which they are added. Every rule is validated when
/// [`build`](Self::build) is called, so a built grammar never contains a
/// bracketed left-hand side or an empty symbol.
///
/// A grammar with zero rules, or with no rule for its start symbol, is valid:
/// every parser simply rejects every sentence against it.
///
/// # Example
///
/// ```rust
/// use cfgtrace::grammar::{GrammarBuilder, Symbol};
///
/// let grammar = GrammarBuilder::new()
///     .start("sentence")
///     .rule("sentence", [Symbol::terminal("hello")])
///     .epsilon("sentence")
///     .build()
///     .expect("valid grammar");
///
/// assert_eq!(grammar.start(), "sentence");
/// assert_eq!(grammar.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    /// Rules with the 1-based source line they came from (0 for the builder API)
    rules: Vec<(Rule, usize)>,
    start: Option<CompactString>,
}

impl GrammarBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start symbol (defaults to `s`).
    #[must_use]
    pub fn start(mut self, start: impl Into<CompactString>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Append `lhs --> rhs`. An empty `rhs` is an epsilon production.
    #[must_use]
    pub fn rule(mut self, lhs: impl Into<CompactString>, rhs: impl IntoIterator<Item = Symbol>) -> Self {
        self.rules.push((Rule::new(lhs, rhs), 0));
        self
    }

    /// Append `lhs --> ε`.
    #[must_use]
    pub fn epsilon(mut self, lhs: impl Into<CompactString>) -> Self {
        self.rules.push((Rule::epsilon(lhs), 0));
        self
    }

    pub(crate) fn push_rule(&mut self, rule: Rule, line: usize) {
        self.rules.push((rule, line));
    }

    /// Validate and build the grammar.
    ///
    /// # Errors
    ///
    /// Returns the first validation error in rule order.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let start = self.start.unwrap_or_else(|| DEFAULT_START.into());
        if !is_identifier(&start) {
            return Err(GrammarError::InvalidStart(start.into()));
        }

        let mut rules = Vec::with_capacity(self.rules.len());
        for (rule, line) in self.rules {
            validate_rule(&rule, line)?;
            rules.push(rule);
        }

        tracing::trace!(rules = rules.len(), start = %start, "built grammar");
        Ok(Grammar::from_parts(rules, start))
    }
}

fn validate_rule(rule: &Rule, line: usize) -> Result<(), GrammarError> {
    let lhs = rule.lhs();
    if lhs.is_empty() {
        return Err(GrammarError::EmptyLhs { line });
    }
    if lhs.starts_with('[') {
        return Err(GrammarError::TerminalLhs {
            line,
            lhs: lhs.to_string(),
        });
    }
    if !is_identifier(lhs) {
        return Err(GrammarError::InvalidIdentifier {
            line,
            symbol: lhs.to_string(),
        });
    }

    for symbol in rule.rhs() {
        match symbol {
            Symbol::Terminal(literal) if !is_literal(literal) => {
                return Err(GrammarError::MalformedTerminal {
                    line,
                    symbol: symbol.to_string(),
                });
            }
            Symbol::Nonterminal(name) if name.is_empty() => {
                return Err(GrammarError::EmptySymbol { line });
            }
            Symbol::Nonterminal(name) if !is_identifier(name) => {
                return Err(GrammarError::InvalidIdentifier {
                    line,
                    symbol: name.to_string(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}
