//! FILENAME: core/parser/src/config.rs
//! PURPOSE: Parser settings.
//! CONTEXT: Host applications embed this in their own settings files, so it
//! deserializes with every field optional.

use serde::{Deserialize, Serialize};

/// Default upper bound on the additive terms one side may expand to.
/// Thirteen crossed two-variable sums (8192 terms) already exceed it.
pub const DEFAULT_MAX_TERMS: usize = 4096;

/// Default upper bound on tree depth and parenthesis nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Largest number of additive terms distribution may produce on either
    /// side of the formula. Checked before distributing.
    pub max_terms: usize,

    /// Deepest tree either side may parse to, counting each `+` or `*` in a
    /// chain as one level, and deepest parenthesis nesting. Checked while
    /// parsing. With both limits at their defaults a distributed side stays
    /// under roughly `2 * max_depth + log2(max_terms)` levels, which the
    /// recursive tree walks handle on a default thread stack.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_terms: DEFAULT_MAX_TERMS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Lifts the term limit. The depth limit stays, since it protects the
    /// stack rather than bounding work.
    pub fn without_term_limit() -> Self {
        ParserConfig {
            max_terms: usize::MAX,
            ..Self::default()
        }
    }

    pub fn with_max_terms(max_terms: usize) -> Self {
        ParserConfig {
            max_terms,
            ..Self::default()
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        ParserConfig {
            max_depth,
            ..Self::default()
        }
    }
}
