//! FILENAME: core/parser/src/distribute.rs
//! PURPOSE: Rewrites an expression into canonical sum-of-products form.
//! CONTEXT: Runs after parsing. `a*(b+c)` becomes `a*b+a*c`, recursively,
//! until no Multiply has a Plus as either operand.
//!
//! The rewrite is purely functional: it consumes the tree and builds the
//! expanded one. When an operand must appear in both halves of an expansion
//! it is deep-cloned, so the two branches never alias.
//!
//! COST: each expansion can double the number of terms, so the output is
//! exponential in the nesting of products over sums. `expanded_term_count`
//! predicts the size without building anything.
//!
//! DEPTH: the distributed depth of `l * r` is at most depth(l) + depth(r), so
//! with the parser's depth and term limits the recursion here stays shallow.

use log::trace;

use crate::ast::{Expression, TableFormula};
use crate::LOG_TARGET;

impl Expression {
    /// Distributes products over sums, to a fixed point.
    pub fn distribute(self) -> Expression {
        match self {
            Expression::Variable(_) => self,
            Expression::FunctionCall { .. } => self,
            Expression::Plus(left, right) => {
                Expression::plus((*left).distribute(), (*right).distribute())
            }
            Expression::Multiply(left, right) => {
                distribute_product((*left).distribute(), (*right).distribute())
            }
        }
    }

    /// Distributed copy of `self`, leaving `self` untouched.
    pub fn distributed(&self) -> Expression {
        self.clone().distribute()
    }

    /// Number of additive terms `distribute` will produce.
    pub fn expanded_term_count(&self) -> usize {
        match self {
            Expression::Variable(_) | Expression::FunctionCall { .. } => 1,
            Expression::Plus(left, right) => left
                .expanded_term_count()
                .saturating_add(right.expanded_term_count()),
            Expression::Multiply(left, right) => left
                .expanded_term_count()
                .saturating_mul(right.expanded_term_count()),
        }
    }

    /// True when no Multiply anywhere in the tree has a Plus operand.
    pub fn is_distributed(&self) -> bool {
        match self {
            Expression::Variable(_) | Expression::FunctionCall { .. } => true,
            Expression::Plus(left, right) => left.is_distributed() && right.is_distributed(),
            Expression::Multiply(left, right) => {
                !left.is_plus()
                    && !right.is_plus()
                    && left.is_distributed()
                    && right.is_distributed()
            }
        }
    }
}

/// Expands `left * right`, both already distributed.
/// A sum on the left is expanded before a sum on the right.
fn distribute_product(left: Expression, right: Expression) -> Expression {
    match (left, right) {
        (Expression::Plus(a, b), right) => {
            trace!(target: LOG_TARGET, "expand ({}+{})*{}", a, b, right);
            Expression::plus(
                Expression::multiply(*a, right.clone()).distribute(),
                Expression::multiply(*b, right).distribute(),
            )
        }
        (left, Expression::Plus(a, b)) => {
            trace!(target: LOG_TARGET, "expand {}*({}+{})", left, a, b);
            Expression::plus(
                Expression::multiply(left.clone(), *a).distribute(),
                Expression::multiply(left, *b).distribute(),
            )
        }
        (left, right) => Expression::multiply(left, right),
    }
}

impl TableFormula {
    /// Distributes both sides independently.
    pub fn distribute(self) -> TableFormula {
        TableFormula::new(self.columns.distribute(), self.rows.distribute())
    }

    pub fn is_distributed(&self) -> bool {
        self.columns.is_distributed() && self.rows.is_distributed()
    }
}
