//! Reference grammars.

use crate::grammar::Grammar;

/// A toy English fragment: `the man hit the dog` and friends.
pub const ENGLISH: &str = "\
s --> np, vp
np --> det, n
det --> [the]
n --> [man]
n --> [dog]
vp --> tv, np
tv --> [hit]
";

/// Every word that appears in [`ENGLISH`], plus one that does not.
pub const ENGLISH_WORDS: [&str; 5] = ["the", "man", "dog", "hit", "barked"];

/// `aⁿbⁿ` with the recursive alternative first, which misleads the greedy
/// top-down parser.
pub const ANBN: &str = "\
s --> [a], s, [b]
s --> [a], [b]
";

/// A start symbol that derives only the empty sentence.
pub const EPSILON: &str = "s --> ε\n";

/// Balanced parentheses with an epsilon alternative.
pub const PARENS: &str = "\
s --> [lp], s, [rp], s
s --> ε
";

/// Immediate left recursion.
pub const LEFT_RECURSIVE: &str = "\
s --> s, [a]
s --> [a]
";

/// A unit cycle between `s` and `a`.
pub const UNIT_CYCLE: &str = "\
s --> a
a --> s
a --> [x]
";

/// Nullable symbols before, between and after terminals, so bottom-up
/// parsers must reduce empty rules right after other reductions.
pub const NULLABLE: &str = "\
s --> a, [x], b, c
s --> a, b
a --> [y], s, [z]
a --> b, c
b --> [w]
b --> ε
c --> ε
";

/// Every terminal of [`NULLABLE`].
pub const NULLABLE_WORDS: [&str; 4] = ["x", "y", "z", "w"];

/// Parse one of the constants above.
fn load(text: &str) -> Grammar {
    match Grammar::from_text(text) {
        Ok(grammar) => grammar,
        Err(err) => panic!("reference grammar does not parse: {err}"),
    }
}

#[must_use]
pub fn english() -> Grammar {
    load(ENGLISH)
}

#[must_use]
pub fn anbn() -> Grammar {
    load(ANBN)
}

#[must_use]
pub fn epsilon() -> Grammar {
    load(EPSILON)
}

#[must_use]
pub fn parens() -> Grammar {
    load(PARENS)
}

#[must_use]
pub fn left_recursive() -> Grammar {
    load(LEFT_RECURSIVE)
}

#[must_use]
pub fn unit_cycle() -> Grammar {
    load(UNIT_CYCLE)
}

#[must_use]
pub fn nullable() -> Grammar {
    load(NULLABLE)
}
