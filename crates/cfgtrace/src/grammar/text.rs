//! Line-oriented grammar text format.
//!
//! ```text
//! % determiners and nouns
//! s --> np, vp
//! np --> det, n
//! det --> [the]
//! opt --> ε
//! ```
//!
//! One rule per line, `lhs --> sym, sym, ...`. Input is lowercased. Blank
//! lines and lines starting with `%` are skipped. `ε` or `[]` as the only
//! right-hand symbol is an epsilon production.

use crate::error::GrammarError;
use crate::grammar::{is_identifier, is_literal, Grammar, GrammarBuilder, Rule, Symbol, EPSILON};

const ARROW: &str = "-->";
const COMMENT: char = '%';

/// Parse grammar text with the default start symbol.
///
/// # Errors
///
/// Returns the first malformed line as a [`GrammarError`].
pub fn parse_grammar(text: &str) -> Result<Grammar, GrammarError> {
    rules_builder(text)?.build()
}

/// Parse grammar text with an explicit start symbol.
///
/// # Errors
///
/// Returns the first malformed line, or an invalid start symbol.
pub fn parse_grammar_with_start(text: &str, start: &str) -> Result<Grammar, GrammarError> {
    rules_builder(text)?.start(start.to_lowercase()).build()
}

fn rules_builder(text: &str) -> Result<GrammarBuilder, GrammarError> {
    let mut builder = GrammarBuilder::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT) {
            continue;
        }
        builder.push_rule(parse_rule(trimmed, line)?, line);
    }
    Ok(builder)
}

/// Parse a single `lhs --> rhs` line.
///
/// # Errors
///
/// Returns a [`GrammarError`] tagged with `line`.
pub fn parse_rule(text: &str, line: usize) -> Result<Rule, GrammarError> {
    let Some((lhs, rhs)) = text.split_once(ARROW) else {
        return Err(GrammarError::MissingArrow {
            line,
            text: text.to_string(),
        });
    };

    let lhs = lhs.trim().to_lowercase();
    if lhs.is_empty() {
        return Err(GrammarError::EmptyLhs { line });
    }
    if lhs.starts_with('[') {
        return Err(GrammarError::TerminalLhs { line, lhs });
    }
    if !is_identifier(&lhs) {
        return Err(GrammarError::InvalidIdentifier { line, symbol: lhs });
    }

    let parts: Vec<String> = rhs.split(',').map(|part| part.trim().to_lowercase()).collect();
    let is_epsilon = |part: &str| part == EPSILON || part == "[]";

    if parts.iter().any(|part| is_epsilon(part)) {
        if parts.len() > 1 {
            return Err(GrammarError::EpsilonNotAlone { line });
        }
        return Ok(Rule::epsilon(lhs));
    }

    let symbols = parts
        .iter()
        .map(|part| parse_symbol(part, line))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Rule::new(lhs, symbols))
}

/// Decide the kind of one right-hand symbol: `[word]` is a terminal, a bare
/// identifier is a nonterminal.
///
/// # Errors
///
/// Returns a [`GrammarError`] tagged with `line`.
pub fn parse_symbol(text: &str, line: usize) -> Result<Symbol, GrammarError> {
    if text.is_empty() {
        return Err(GrammarError::EmptySymbol { line });
    }

    if text.starts_with('[') || text.ends_with(']') {
        let literal = text
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .filter(|literal| is_literal(literal));
        return literal.map(Symbol::terminal).ok_or_else(|| GrammarError::MalformedTerminal {
            line,
            symbol: text.to_string(),
        });
    }

    if !is_identifier(text) {
        return Err(GrammarError::InvalidIdentifier {
            line,
            symbol: text.to_string(),
        });
    }
    Ok(Symbol::nonterminal(text))
}
