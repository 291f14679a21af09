//! # Sentence Generators
//!
//! Derive sentences that are members of a grammar's language.
//!
//! Generation is driven by an explicit choice sequence instead of a random
//! number generator, so a `proptest` strategy over `Vec<usize>` yields
//! reproducible, shrinkable sentences.
//!
//! ## Usage
//!
//! ```rust
//! use cfgtrace::testing::{derive_sentence, grammars};
//!
//! let grammar = grammars::anbn();
//! // First alternative twice, then the second.
//! let sentence = derive_sentence(&grammar, &[0, 0, 1], 16).unwrap();
//! assert_eq!(sentence, ["a", "a", "a", "b", "b", "b"]);
//! ```

use crate::grammar::{Grammar, Symbol};
use compact_str::CompactString;

/// Derive a sentence by leftmost expansion from the start symbol.
///
/// The `k`-th expansion picks alternative `choices[k] % alternatives` of the
/// nonterminal being expanded; once `choices` runs out the last alternative
/// is used, which in recursive grammars is usually the base case.
///
/// Returns `None` when a nonterminal has no rule or more than
/// `max_expansions` expansions would be needed.
#[must_use]
pub fn derive_sentence(grammar: &Grammar, choices: &[usize], max_expansions: usize) -> Option<Vec<CompactString>> {
    let mut pending = vec![grammar.start_symbol()];
    let mut sentence = Vec::new();
    let mut expansions = 0;

    while let Some(symbol) = pending.pop() {
        match symbol {
            Symbol::Terminal(literal) => sentence.push(literal),
            Symbol::Nonterminal(name) => {
                if expansions == max_expansions {
                    return None;
                }
                let alternatives: Vec<_> = grammar.alternatives(&name).collect();
                if alternatives.is_empty() {
                    return None;
                }
                let pick = choices
                    .get(expansions)
                    .map_or(alternatives.len() - 1, |choice| choice % alternatives.len());
                expansions += 1;
                let (_, rule) = alternatives[pick];
                pending.extend(rule.rhs().iter().rev().cloned());
            }
        }
    }
    Some(sentence)
}
