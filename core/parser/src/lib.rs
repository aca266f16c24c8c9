//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the table formula parser.
//! CONTEXT: This module exposes the lexer, parser, AST and distribution
//! components needed to turn a `columns ~ rows` formula into the canonical
//! sum-of-products tree that table builders consume.
//!
//! PIPELINE: Formula String --> Lexer --> Tokens --> Parser --> AST --> Distribution
//!
//! SUPPORTED FEATURES:
//! - Grouping: a + b
//! - Crossing: a * b
//! - Parentheses: a * (b + c), expanded to a*b + a*c
//! - Display formats: bili[2], bili[%.3f]
//! - Type overrides: bili::Continuous, bili[2]::Continuous
//! - Function calls with opaque arguments: log(x + 2)

pub mod ast;
pub mod config;
pub mod distribute;
pub mod error;
pub mod input;
pub mod lexer;
pub mod parser;
pub mod token;


/// `log` target used by every message this crate emits.
pub const LOG_TARGET: &str = "formula";

// Re-export commonly used types for convenience
pub use ast::{Expression, TableFormula, Terms, Variable};
pub use config::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_TERMS};
pub use error::{ParseError, ParseResult};
pub use input::{FormulaParts, FormulaSource};
pub use lexer::Lexer;
pub use parser::{parse, run, run_with_config, Parser};
pub use token::{Token, TokenKind};
