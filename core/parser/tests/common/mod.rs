//! FILENAME: tests/common/mod.rs
//! Fixtures and assertion helpers for formula parser integration tests.

#![allow(dead_code)]

use formula_parser::{parse, Expression, TableFormula};

// ============================================================================
// FIXTURES
// ============================================================================

/// Formulas over the columns of a clinical trial dataset
/// (treatment arm, demographics, lab values).
pub struct TrialFixture;

impl TrialFixture {
    /// (input, canonical rendering after distribution)
    pub fn formulas() -> Vec<(&'static str, &'static str)> {
        vec![
            ("age ~ sex", "age ~ sex"),
            ("trt ~ age + sex + ascites", "trt ~ age+sex+ascites"),
            ("drug ~ bili[2]::Continuous + albumin[%.2f]", "drug ~ bili[2]::Continuous+albumin[%.2f]"),
            ("sex * (drug + placebo) ~ stage", "sex*drug+sex*placebo ~ stage"),
            ("(trt + sex) * (stage + edema) ~ age", "trt*stage+trt*edema+sex*stage+sex*edema ~ age"),
            ("trt ~ log(bili + 1) * sex", "trt ~ log(bili + 1)*sex"),
            ("trt ~ .hidden + spiders::Categorical", "trt ~ .hidden+spiders::Categorical"),
        ]
    }

    /// (input, expected error message)
    pub fn malformed() -> Vec<(&'static str, &'static str)> {
        vec![
            ("x + ~ y", "expected IDENTIFIER or LPAREN, found TILDE at '~ y'"),
            ("age sex", "expected TILDE, found IDENTIFIER at 'sex'"),
            ("age ~", "expected IDENTIFIER or LPAREN, found EOF at ''"),
            ("age ~ sex)", "expected EOF, found RPAREN at ')'"),
            ("age ~ 1", "unparseable input: '1'"),
        ]
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

pub fn parse_ok(input: &str) -> TableFormula {
    match parse(input) {
        Ok(formula) => formula,
        Err(e) => panic!("failed to parse '{}': {}", input, e),
    }
}

/// Assert that no product in `expr` has a sum as an operand.
pub fn assert_sum_of_products(expr: &Expression) {
    match expr {
        Expression::Plus(left, right) => {
            assert_sum_of_products(left);
            assert_sum_of_products(right);
        }
        Expression::Multiply(left, right) => {
            assert!(!left.is_plus(), "sum under product in {}", expr);
            assert!(!right.is_plus(), "sum under product in {}", expr);
            assert_sum_of_products(left);
            assert_sum_of_products(right);
        }
        Expression::Variable(_) | Expression::FunctionCall { .. } => {}
    }
}
