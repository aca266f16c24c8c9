//! FILENAME: core/parser/src/lexer.rs
//! PURPOSE: Scans a raw table formula and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the parsing pipeline. It skips blanks,
//! recognizes single-character punctuation and identifiers, and offers one
//! token of lookahead. The parser also uses it to read raw text spans
//! (variable formats and function arguments) that are never tokenized.
//!
//! SUPPORTED TOKENS:
//! - Single char: * + ( ) ~ : [ ]
//! - Identifiers: letter, or '.' followed by letter/underscore, then
//!   letters, digits, '.' and '_'

use crate::error::{ParseError, ParseResult};
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the cursor. Never advanced by `peek`.
    pos: usize,
    /// Buffered lookahead: the token and the cursor just past it.
    peeked: Option<(Token<'a>, usize)>,
    /// Set once EOF has been handed to the parser.
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            peeked: None,
            finished: false,
        }
    }

    /// Advances the lexer and returns the next token.
    pub fn next_token(&mut self) -> ParseResult<Token<'a>> {
        if self.finished {
            return Err(ParseError::Internal(
                "token requested past end of input".to_string(),
            ));
        }

        let (token, end) = match self.peeked.take() {
            Some(buffered) => buffered,
            None => self.scan()?,
        };

        self.pos = end;
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Ok(token)
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> ParseResult<Token<'a>> {
        if let Some((token, _)) = self.peeked {
            return Ok(token);
        }
        if self.finished {
            return Err(ParseError::Internal(
                "lookahead requested past end of input".to_string(),
            ));
        }

        let scanned = self.scan()?;
        self.peeked = Some(scanned);
        Ok(scanned.0)
    }

    /// Reads raw text from the cursor up to (not including) the first
    /// character for which `stop` returns true, or to the end of input.
    /// Any buffered lookahead is dropped, since the cursor never moved past it.
    pub fn read_until<F>(&mut self, mut stop: F) -> &'a str
    where
        F: FnMut(char) -> bool,
    {
        self.peeked = None;

        let rest = &self.input[self.pos..];
        let end = rest
            .char_indices()
            .find(|&(_, ch)| stop(ch))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());

        self.pos += end;
        &rest[..end]
    }

    /// Unconsumed input, including any blanks before a peeked token.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Scans one token starting at the cursor. Returns the token and the
    /// offset just past it; does not move the cursor.
    fn scan(&self) -> ParseResult<(Token<'a>, usize)> {
        let start = self.pos + blank_prefix_len(&self.input[self.pos..]);
        let rest = &self.input[start..];

        let Some(ch) = rest.chars().next() else {
            return Ok((Token::eof(), start));
        };

        if let Some(kind) = single_char_kind(ch) {
            return Ok((Token::new(kind, &rest[..1]), start + 1));
        }

        match match_identifier(rest) {
            0 => Err(ParseError::Lex {
                remaining: rest.to_string(),
            }),
            len => Ok((Token::new(TokenKind::Identifier, &rest[..len]), start + len)),
        }
    }
}

fn single_char_kind(ch: char) -> Option<TokenKind> {
    match ch {
        '*' => Some(TokenKind::Times),
        '+' => Some(TokenKind::Plus),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '~' => Some(TokenKind::Tilde),
        ':' => Some(TokenKind::Colon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        _ => None,
    }
}

/// Spaces and tabs only; a newline is not a blank.
fn blank_prefix_len(input: &str) -> usize {
    input.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

/// Returns the byte length of the identifier at the start of `input`,
/// or 0 when `input` does not start with one.
pub fn match_identifier(input: &str) -> usize {
    let bytes = input.as_bytes();
    let head = match bytes {
        [first, ..] if first.is_ascii_alphabetic() => 1,
        [b'.', second, ..] if second.is_ascii_alphabetic() || *second == b'_' => 2,
        _ => return 0,
    };

    head + bytes[head..]
        .iter()
        .take_while(|b| is_identifier_byte(**b))
        .count()
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'_'
}
