//! FILENAME: core/parser/src/ast.rs
//! PURPOSE: Defines the Abstract Syntax Tree (AST) for table formulas.
//! CONTEXT: After the Lexer tokenizes a formula string, the Parser converts
//! those tokens into this tree structure. Downstream table builders read the
//! distributed tree through `extract_terms` and `Display`.
//!
//! SUPPORTED EXPRESSIONS:
//! - Variables: age, .hidden_col, bili[2], bili[%.1f]::Continuous
//! - Function calls with an opaque argument: log(x+2)
//! - Addition (grouping): a + b
//! - Multiplication (crossing): a * b
//! - Parentheses for grouping
//!
//! Each branch owns its children outright. Sharing a subtree between two
//! branches is done with `Clone`, which is a deep copy.

use serde::{Deserialize, Serialize};

/// A named variable with its optional display format and type override.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub identifier: String,
    /// Raw text between `[` and `]`, e.g. "2" or "%.3f".
    pub format: Option<String>,
    /// Identifier following `::`, e.g. "Continuous".
    pub type_override: Option<String>,
}

impl Variable {
    pub fn new(identifier: impl Into<String>) -> Self {
        Variable {
            identifier: identifier.into(),
            format: None,
            type_override: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_type(mut self, type_override: impl Into<String>) -> Self {
        self.type_override = Some(type_override.into());
        self
    }
}

/// One side of a table formula.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum Expression {
    /// A leaf variable reference.
    Variable(Variable),

    /// A leaf function call like log(x+2). The argument is kept verbatim.
    FunctionCall { name: String, argument: String },

    /// Grouping: left + right.
    Plus(Box<Expression>, Box<Expression>),

    /// Crossing: left * right.
    Multiply(Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn variable(identifier: impl Into<String>) -> Self {
        Expression::Variable(Variable::new(identifier))
    }

    pub fn function_call(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            argument: argument.into(),
        }
    }

    pub fn plus(left: Expression, right: Expression) -> Self {
        Expression::Plus(Box::new(left), Box::new(right))
    }

    pub fn multiply(left: Expression, right: Expression) -> Self {
        Expression::Multiply(Box::new(left), Box::new(right))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Expression::Variable(_) | Expression::FunctionCall { .. })
    }

    pub fn is_plus(&self) -> bool {
        matches!(self, Expression::Plus(..))
    }

    /// The identifier of a leaf; `None` for Plus and Multiply.
    pub fn name(&self) -> Option<&str> {
        match self {
            Expression::Variable(var) => Some(&var.identifier),
            Expression::FunctionCall { name, .. } => Some(name),
            Expression::Plus(..) | Expression::Multiply(..) => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expression::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Nodes on the longest root-to-leaf path; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expression::Variable(_) | Expression::FunctionCall { .. } => 1,
            Expression::Plus(left, right) | Expression::Multiply(left, right) => {
                1 + left.depth().max(right.depth())
            }
        }
    }

    /// Additive terms of this expression, left to right.
    ///
    /// Only Plus is flattened. A Multiply is a single interaction term and
    /// is returned whole, as is a leaf.
    pub fn extract_terms(&self) -> Vec<&Expression> {
        let mut terms = Vec::new();
        self.collect_terms(&mut terms);
        terms
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a Expression>) {
        match self {
            Expression::Plus(left, right) => {
                left.collect_terms(terms);
                right.collect_terms(terms);
            }
            Expression::Multiply(..) => terms.push(self),
            Expression::Variable(_) => terms.push(self),
            Expression::FunctionCall { .. } => terms.push(self),
        }
    }

    /// Factors of a product chain, left to right: `a*b*c` yields `[a, b, c]`.
    /// Anything that is not a Multiply is its own single factor.
    pub fn factors(&self) -> Vec<&Expression> {
        match self {
            Expression::Multiply(left, right) => {
                let mut factors = left.factors();
                factors.extend(right.factors());
                factors
            }
            _ => vec![self],
        }
    }

    /// Canonical text of this expression. No parentheses are added.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)?;
        if let Some(format) = &self.format {
            write!(f, "[{}]", format)?;
        }
        if let Some(type_override) = &self.type_override {
            write!(f, "::{}", type_override)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Variable(var) => write!(f, "{}", var),
            Expression::FunctionCall { name, argument } => write!(f, "{}({})", name, argument),
            Expression::Plus(left, right) => write!(f, "{}+{}", left, right),
            Expression::Multiply(left, right) => write!(f, "{}*{}", left, right),
        }
    }
}

/// The root of a parsed formula: `columns ~ rows`.
/// Kept apart from `Expression` so it can never appear as an operand.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TableFormula {
    pub columns: Expression,
    pub rows: Expression,
}

/// Additive terms of both sides of a table formula.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Terms<'a> {
    pub columns: Vec<&'a Expression>,
    pub rows: Vec<&'a Expression>,
}

impl Terms<'_> {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|term| term.render()).collect()
    }

    pub fn row_names(&self) -> Vec<String> {
        self.rows.iter().map(|term| term.render()).collect()
    }
}

impl TableFormula {
    pub fn new(columns: Expression, rows: Expression) -> Self {
        TableFormula { columns, rows }
    }

    pub fn extract_terms(&self) -> Terms<'_> {
        Terms {
            columns: self.columns.extract_terms(),
            rows: self.rows.extract_terms(),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for TableFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.columns, self.rows)
    }
}
