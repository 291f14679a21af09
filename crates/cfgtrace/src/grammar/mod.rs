//! # Grammar Module
//!
//! The grammar model shared by every parser.
//!
//! ## Overview
//!
//! A [`Grammar`] is an immutable, *ordered* list of production [`Rule`]s plus a
//! start symbol. Order is semantically significant: among rules sharing a
//! left-hand side, the earlier rule has priority in the deterministic parsers
//! and is explored first by the backtracking ones. Rules are therefore kept in
//! a `Vec`, never in a map keyed by left-hand side.
//!
//! Symbol kinds are decided once, when the grammar is built:
//!
//! - [`Symbol::Terminal`] is written `[word]` and matches one input token
//! - [`Symbol::Nonterminal`] is a bare identifier expanded through rules
//!
//! An epsilon production is a rule with an empty right-hand side; it is
//! written `ε` (or `[]`) in the text format.
//!
//! ## Usage
//!
//! ```rust
//! use cfgtrace::grammar::{Grammar, Symbol};
//!
//! let grammar = Grammar::builder()
//!     .rule("s", [Symbol::terminal("a"), Symbol::nonterminal("s"), Symbol::terminal("b")])
//!     .rule("s", [Symbol::terminal("a"), Symbol::terminal("b")])
//!     .build()?;
//!
//! assert_eq!(grammar.alternatives("s").count(), 2);
//! assert_eq!(grammar.to_string(), "s --> [a], s, [b]\ns --> [a], [b]\n");
//! # Ok::<(), cfgtrace::GrammarError>(())
//! ```

pub mod analysis;
pub mod builder;
pub mod text;

pub use analysis::{GrammarAnalysis, GrammarWarning};
pub use builder::GrammarBuilder;

use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt;

/// Marker written in place of an empty right-hand side.
pub const EPSILON: &str = "ε";

/// Start symbol used when none is given.
pub const DEFAULT_START: &str = "s";

/// A grammar symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A literal matched against exactly one input token
    Terminal(CompactString),
    /// A symbol expanded through production rules
    Nonterminal(CompactString),
}

impl Symbol {
    #[must_use]
    pub fn terminal(literal: impl Into<CompactString>) -> Self {
        Self::Terminal(literal.into())
    }

    #[must_use]
    pub fn nonterminal(name: impl Into<CompactString>) -> Self {
        Self::Nonterminal(name.into())
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal(_))
    }

    #[must_use]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Self::Nonterminal(_))
    }

    /// The literal of a terminal or the name of a nonterminal, without brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Terminal(s) | Self::Nonterminal(s) => s,
        }
    }

    /// Whether this is a terminal whose literal equals `token`.
    #[must_use]
    pub fn matches_token(&self, token: &str) -> bool {
        matches!(self, Self::Terminal(literal) if literal.as_str() == token)
    }

    /// Whether this is the nonterminal `name`.
    #[must_use]
    pub fn is_nonterminal_named(&self, name: &str) -> bool {
        matches!(self, Self::Nonterminal(n) if n.as_str() == name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terminal(literal) => write!(f, "[{literal}]"),
            Self::Nonterminal(name) => f.write_str(name),
        }
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A production rule `lhs --> rhs`.
///
/// An empty `rhs` is an epsilon production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    lhs: CompactString,
    rhs: SmallVec<[Symbol; 4]>,
}

impl Rule {
    /// Create a rule. Validation happens when the rule is added to a grammar.
    #[must_use]
    pub fn new(lhs: impl Into<CompactString>, rhs: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into_iter().collect(),
        }
    }

    /// Create an epsilon production `lhs --> ε`.
    #[must_use]
    pub fn epsilon(lhs: impl Into<CompactString>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    #[must_use]
    pub fn lhs_symbol(&self) -> Symbol {
        Symbol::Nonterminal(self.lhs.clone())
    }

    #[must_use]
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    #[must_use]
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }

    /// The literal of a rule whose right-hand side is a single terminal.
    ///
    /// Such rules are "leaf" rules in top-down parsing.
    #[must_use]
    pub fn leaf_literal(&self) -> Option<&str> {
        match self.rhs.as_slice() {
            [Symbol::Terminal(literal)] => Some(literal),
            _ => None,
        }
    }

    /// Whether the right-hand side equals the top `rhs.len()` symbols of a
    /// bottom-up stack, element for element.
    ///
    /// An epsilon rule matches every stack.
    #[must_use]
    pub fn matches_suffix(&self, stack: &[Symbol]) -> bool {
        stack.ends_with(&self.rhs)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> ", self.lhs)?;
        if self.rhs.is_empty() {
            return f.write_str(EPSILON);
        }
        for (i, symbol) in self.rhs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Serialized as `[lhs, [rhs...]]`, with an epsilon right-hand side written
/// as `["ε"]`.
#[cfg(feature = "serialize")]
impl serde::Serialize for Rule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeTuple;

        struct Rhs<'a>(&'a [Symbol]);

        impl serde::Serialize for Rhs<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if self.0.is_empty() {
                    serializer.collect_seq([EPSILON])
                } else {
                    serializer.collect_seq(self.0)
                }
            }
        }

        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.lhs.as_str())?;
        tuple.serialize_element(&Rhs(&self.rhs))?;
        tuple.end()
    }
}

/// An immutable, ordered context-free grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    rules: Vec<Rule>,
    start: CompactString,
}

impl Grammar {
    #[must_use]
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// Parse the line-oriented text format with the default start symbol `s`.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`](crate::GrammarError) naming the offending line.
    pub fn from_text(text: &str) -> Result<Self, crate::GrammarError> {
        text::parse_grammar(text)
    }

    pub(crate) fn from_parts(rules: Vec<Rule>, start: CompactString) -> Self {
        Self { rules, start }
    }

    /// Replace the start symbol.
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidStart`](crate::GrammarError::InvalidStart)
    /// if `start` is not a valid nonterminal name.
    pub fn with_start(self, start: &str) -> Result<Self, crate::GrammarError> {
        if !is_identifier(start) {
            return Err(crate::GrammarError::InvalidStart(start.to_string()));
        }
        Ok(Self {
            rules: self.rules,
            start: start.into(),
        })
    }

    /// All rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    #[must_use]
    pub fn start_symbol(&self) -> Symbol {
        Symbol::Nonterminal(self.start.clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose left-hand side is `lhs`, with their grammar index, in
    /// declaration order.
    pub fn alternatives<'a>(&'a self, lhs: &'a str) -> impl Iterator<Item = (usize, &'a Rule)> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, rule)| rule.lhs() == lhs)
    }

    #[must_use]
    pub fn has_rule_for(&self, lhs: &str) -> bool {
        self.rules.iter().any(|rule| rule.lhs() == lhs)
    }

    /// Whether `rule` is literally one of this grammar's rules.
    #[must_use]
    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Run the non-fatal grammar checks.
    #[must_use]
    pub fn analyze(&self) -> GrammarAnalysis {
        GrammarAnalysis::new(self)
    }
}

/// Renders the grammar back into the text format, one rule per line.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

/// Split free text into lowercase word tokens on whitespace.
#[must_use]
pub fn tokenize(text: &str) -> Vec<CompactString> {
    text.split_whitespace()
        .map(|word| CompactString::from(word.to_lowercase()))
        .collect()
}

const RESERVED: [char; 3] = ['[', ']', ','];

/// A nonterminal name: non-empty, no whitespace, brackets or commas, and not
/// the epsilon marker.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name != EPSILON
        && !name.contains("-->")
        && !name.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c))
}

/// A terminal literal: non-empty, no whitespace, brackets or commas.
pub(crate) fn is_literal(literal: &str) -> bool {
    !literal.is_empty() && !literal.chars().any(|c| c.is_whitespace() || RESERVED.contains(&c))
}
