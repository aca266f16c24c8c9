//! FILENAME: core/parser/src/parser.rs
//! PURPOSE: Recursive descent parser that converts a stream of Tokens into an AST.
//! CONTEXT: This is the second stage of the parsing pipeline. It pulls tokens
//! from the Lexer, builds a TableFormula, and hands it to distribution.
//!
//! GRAMMAR (both operators right-associative):
//!   table_formula --> expression "~" expression EOF
//!   expression    --> term ( "+" expression )?
//!   term          --> factor ( "*" term )?
//!   factor        --> "(" expression ")"
//!                   | IDENTIFIER "(" raw_argument ")"
//!                   | IDENTIFIER ( "[" format "]" )? ( ":" ":" IDENTIFIER )?
//!
//! `raw_argument` and `format` are read as raw text, not tokens.
//!
//! `+` and `*` chains are collected in a loop and folded from the right, so
//! only parentheses cost recursion. Both the parenthesis nesting and the depth
//! of the folded tree are capped by `ParserConfig::max_depth`, which keeps
//! every later recursive walk (distribution, rendering, drop) on a bounded stack.

use log::{debug, warn};

use crate::ast::{Expression, TableFormula, Variable};
use crate::config::ParserConfig;
use crate::error::{ParseError, ParseResult};
use crate::input::FormulaSource;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::LOG_TARGET;

/// The Parser struct holds the lexer and the settings for one parse.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    config: ParserConfig,
    /// Open parentheses around the current position.
    groups: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Parser {
            lexer: Lexer::new(input),
            config,
            groups: 0,
        }
    }

    /// Parses the whole input and distributes the result.
    pub fn run(mut self) -> ParseResult<TableFormula> {
        debug!(target: LOG_TARGET, "ENTER run '{}'", self.lexer.remaining());

        let formula = self.parse_table_formula()?;
        self.check_expansion(&formula)?;
        let formula = formula.distribute();

        debug!(target: LOG_TARGET, "EXIT run '{}'", formula);
        Ok(formula)
    }

    /// Parses `expression ~ expression EOF` without distributing.
    pub fn parse_table_formula(&mut self) -> ParseResult<TableFormula> {
        let columns = self.parse_expression()?;
        self.expect(TokenKind::Tilde)?;
        let rows = self.parse_expression()?;
        self.expect(TokenKind::Eof)?;

        Ok(TableFormula::new(columns, rows))
    }

    fn check_expansion(&self, formula: &TableFormula) -> ParseResult<()> {
        let limit = self.config.max_terms;
        for (side, expr) in [("columns", &formula.columns), ("rows", &formula.rows)] {
            let terms = expr.expanded_term_count();
            if terms > limit {
                warn!(
                    target: LOG_TARGET,
                    "{} side of '{}' expands to {} terms (limit {})", side, formula, terms, limit
                );
                return Err(ParseError::ExpansionLimit { side, terms, limit });
            }
        }
        Ok(())
    }

    /// Consumes the next token, failing unless it is of kind `expected`.
    fn expect(&mut self, expected: TokenKind) -> ParseResult<Token<'a>> {
        let token = self.lexer.peek()?;
        if token.is(expected) {
            self.lexer.next_token()
        } else {
            Err(self.unexpected(expected.to_string(), token.kind))
        }
    }

    fn unexpected(&self, expected: String, found: TokenKind) -> ParseError {
        let remaining = self.lexer.remaining().trim_start_matches([' ', '\t']);
        ParseError::unexpected(expected, found, remaining)
    }

    /// Consumes the next token if it is of kind `kind`.
    fn accept(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.lexer.peek()?.is(kind) {
            self.lexer.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let mut operands = vec![self.parse_term()?];

        while self.accept(TokenKind::Plus)? {
            self.check_chain_length(operands.len())?;
            operands.push(self.parse_term()?);
        }

        self.fold_right(operands, Expression::plus)
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut operands = vec![self.parse_factor()?];

        while self.accept(TokenKind::Times)? {
            self.check_chain_length(operands.len())?;
            operands.push(self.parse_factor()?);
        }

        self.fold_right(operands, Expression::multiply)
    }

    /// A chain of n operands folds into a tree at least n levels deep, so
    /// stop collecting once another operand could not fit.
    fn check_chain_length(&self, collected: usize) -> ParseResult<()> {
        if collected >= self.config.max_depth {
            return Err(self.nesting_limit());
        }
        Ok(())
    }

    /// Joins `a, b, c` into `a op (b op c)`, failing if the result would be
    /// deeper than `max_depth`. Operands are already within the limit.
    fn fold_right(
        &self,
        mut operands: Vec<Expression>,
        join: fn(Expression, Expression) -> Expression,
    ) -> ParseResult<Expression> {
        let count = operands.len();
        let depth = operands
            .iter()
            .enumerate()
            .map(|(idx, operand)| (idx + 1).min(count - 1) + operand.depth())
            .max()
            .unwrap_or(0);
        if depth > self.config.max_depth {
            return Err(self.nesting_limit());
        }

        let Some(mut folded) = operands.pop() else {
            return Err(ParseError::Internal("empty operand chain".to_string()));
        };
        while let Some(operand) = operands.pop() {
            folded = join(operand, folded);
        }
        Ok(folded)
    }

    fn nesting_limit(&self) -> ParseError {
        let limit = self.config.max_depth;
        warn!(target: LOG_TARGET, "formula nests deeper than {} levels", limit);
        ParseError::NestingLimit { limit }
    }

    fn parse_factor(&mut self) -> ParseResult<Expression> {
        let token = self.lexer.peek()?;

        match token.kind {
            // Parenthesized expression
            TokenKind::LParen => {
                self.lexer.next_token()?;
                if self.groups >= self.config.max_depth {
                    return Err(self.nesting_limit());
                }

                self.groups += 1;
                let expr = self.parse_expression()?;
                self.groups -= 1;

                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            // Identifier: function call or (possibly annotated) variable
            TokenKind::Identifier => {
                self.lexer.next_token()?;

                if self.accept(TokenKind::LParen)? {
                    return self.parse_function_call(token.text);
                }

                self.parse_variable(token.text)
            }

            found => Err(self.unexpected("IDENTIFIER or LPAREN".to_string(), found)),
        }
    }

    /// Parses the rest of `name(argument)` after the opening paren.
    fn parse_function_call(&mut self, name: &str) -> ParseResult<Expression> {
        let argument = self.read_raw_argument();
        self.expect(TokenKind::RParen)?;

        Ok(Expression::function_call(name, argument))
    }

    /// Reads up to the paren that closes the current call, skipping over
    /// balanced inner pairs. The text is returned untouched.
    fn read_raw_argument(&mut self) -> &'a str {
        let mut depth = 0usize;
        self.lexer.read_until(|ch| match ch {
            '(' => {
                depth += 1;
                false
            }
            ')' if depth == 0 => true,
            ')' => {
                depth -= 1;
                false
            }
            _ => false,
        })
    }

    /// Parses optional `[format]` and `::Type` after a variable name.
    fn parse_variable(&mut self, identifier: &str) -> ParseResult<Expression> {
        let mut variable = Variable::new(identifier);

        if self.accept(TokenKind::LBracket)? {
            let format = self.lexer.read_until(|ch| ch == ']');
            self.expect(TokenKind::RBracket)?;
            variable = variable.with_format(format);
        }

        if self.accept(TokenKind::Colon)? {
            self.expect(TokenKind::Colon)?;
            let type_name = self.expect(TokenKind::Identifier)?;
            variable = variable.with_type(type_name.text);
        }

        Ok(Expression::Variable(variable))
    }
}

/// Parses and distributes a table formula from a string or `FormulaParts`.
///
/// Uses `ParserConfig::default()`, which rejects formulas where either side
/// would distribute to more than `DEFAULT_MAX_TERMS` terms (for example
/// thirteen crossed two-variable sums, 8192 terms) or nest deeper than
/// `DEFAULT_MAX_DEPTH`. Use `run_with_config` with
/// `ParserConfig::without_term_limit()` to distribute any size.
pub fn run<S: FormulaSource + ?Sized>(source: &S) -> ParseResult<TableFormula> {
    run_with_config(source, ParserConfig::default())
}

pub fn run_with_config<S: FormulaSource + ?Sized>(
    source: &S,
    config: ParserConfig,
) -> ParseResult<TableFormula> {
    let text = source.formula_text();
    Parser::with_config(&text, config).run()
}

/// Convenience function to parse a formula string directly.
/// Same limits as `run`.
pub fn parse(input: &str) -> ParseResult<TableFormula> {
    Parser::new(input).run()
}
