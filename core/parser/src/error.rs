//! FILENAME: core/parser/src/error.rs

use thiserror::Error;

use crate::token::TokenKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unparseable input: '{remaining}'")]
    Lex { remaining: String },

    #[error("expected {expected}, found {found} at '{remaining}'")]
    Unexpected {
        expected: String,
        found: TokenKind,
        remaining: String,
    },

    /// The parser asked for a token after EOF was already consumed.
    /// This is a grammar bug, never a property of the input.
    #[error("internal parser error: {0}")]
    Internal(String),

    #[error("formula nests deeper than {limit} levels")]
    NestingLimit { limit: usize },

    #[error("{side} side expands to {terms} terms, limit is {limit}")]
    ExpansionLimit {
        side: &'static str,
        terms: usize,
        limit: usize,
    },
}

impl ParseError {
    pub fn unexpected(
        expected: impl Into<String>,
        found: TokenKind,
        remaining: impl Into<String>,
    ) -> Self {
        ParseError::Unexpected {
            expected: expected.into(),
            found,
            remaining: remaining.into(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
