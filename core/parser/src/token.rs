//! FILENAME: core/parser/src/token.rs
//! PURPOSE: Token definitions for the table formula lexer.
//! CONTEXT: Tokens are the atomic units produced by the lexer and consumed by the parser.

/// Kinds of tokens recognized by the lexer.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Operators
    Times,
    Plus,
    Tilde,

    // Delimiters
    LParen,
    RParen,
    Colon,
    LBracket,
    RBracket,

    // Names
    Identifier,

    // Special
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Times => write!(f, "TIMES"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Tilde => write!(f, "TILDE"),
            TokenKind::LParen => write!(f, "LPAREN"),
            TokenKind::RParen => write!(f, "RPAREN"),
            TokenKind::Colon => write!(f, "COLON"),
            TokenKind::LBracket => write!(f, "LBRACKET"),
            TokenKind::RBracket => write!(f, "RBRACKET"),
            TokenKind::Identifier => write!(f, "IDENTIFIER"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

/// A token together with the lexeme it was matched from.
/// `text` borrows from the formula being lexed and is empty for `Eof`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str) -> Self {
        Token { kind, text }
    }

    pub fn eof() -> Self {
        Token {
            kind: TokenKind::Eof,
            text: "",
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "IDENTIFIER({})", self.text),
            kind => write!(f, "{}", kind),
        }
    }
}
