//! FILENAME: core/layout-engine/src/tests.rs
//! PURPOSE: Unit tests for layout building.

use formula_parser::{parse, Expression, FormulaParts, ParseError, ParserConfig, TableFormula};

use crate::builder::{build_layout, layout_from_source, layout_with_config};
use crate::definition::{Axis, FactorKind, LayoutFactor, TableLayout};
use crate::error::LayoutError;

fn layout(input: &str) -> TableLayout {
    layout_from_source(input).unwrap()
}

// ============================================================================
// BLOCKS
// ============================================================================

#[test]
fn single_variables_make_one_block_per_side() {
    let layout = layout("age ~ sex");

    assert_eq!(layout.formula, "age ~ sex");
    assert_eq!(layout.columns.len(), 1);
    assert_eq!(layout.rows.len(), 1);
    assert_eq!(layout.columns[0].factors, vec![LayoutFactor::variable("age")]);
    assert!(!layout.rows[0].is_interaction());
}

#[test]
fn plus_splits_blocks_and_times_crosses_factors() {
    let layout = layout("col1+col2 ~ drug*age+spiders");

    let labels: Vec<&str> = layout.rows.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["drug*age", "spiders"]);

    let drug_age = &layout.rows[0];
    assert!(drug_age.is_interaction());
    assert_eq!(
        drug_age.factors,
        vec![LayoutFactor::variable("drug"), LayoutFactor::variable("age")]
    );
    assert_eq!(layout.blocks(Axis::Columns).len(), 2);
}

#[test]
fn distributed_groups_become_separate_blocks() {
    let layout = layout("a*(b+c) ~ y");

    assert_eq!(layout.formula, "a*b+a*c ~ y");
    let labels: Vec<&str> = layout.columns.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["a*b", "a*c"]);
}

#[test]
fn factors_carry_variable_metadata() {
    let layout = layout("bili[2]::Continuous ~ trt");
    let bili = &layout.columns[0].factors[0];

    assert_eq!(bili.kind, FactorKind::Variable);
    assert_eq!(bili.name, "bili");
    assert_eq!(bili.format.as_deref(), Some("2"));
    assert_eq!(bili.type_override.as_deref(), Some("Continuous"));
    assert_eq!(bili.argument, None);
}

#[test]
fn factors_carry_function_argument() {
    let layout = layout("log(x+2) ~ trt");
    let log = &layout.columns[0].factors[0];

    assert_eq!(log.kind, FactorKind::Function);
    assert_eq!(log.name, "log");
    assert_eq!(log.argument.as_deref(), Some("x+2"));
}

// ============================================================================
// TABLE QUERIES
// ============================================================================

#[test]
fn sections_cross_rows_with_columns() {
    let layout = layout("a+b ~ x+y+z");

    assert_eq!(layout.section_count(), 6);
    let pairs: Vec<(String, String)> = layout
        .sections()
        .map(|(row, col)| (row.label.clone(), col.label.clone()))
        .collect();
    assert_eq!(pairs[0], ("x".to_string(), "a".to_string()));
    assert_eq!(pairs[1], ("x".to_string(), "b".to_string()));
    assert_eq!(pairs[5], ("z".to_string(), "b".to_string()));
}

#[test]
fn variable_names_are_distinct_and_skip_functions() {
    let layout = layout("trt*(age+sex) ~ log(bili)+age+stage");
    assert_eq!(layout.variable_names(), vec!["trt", "age", "sex", "stage"]);
}

// ============================================================================
// INPUTS AND ERRORS
// ============================================================================

#[test]
fn hand_built_formula_is_distributed_before_layout() {
    let formula = TableFormula::new(
        Expression::multiply(
            Expression::plus(Expression::variable("a"), Expression::variable("b")),
            Expression::variable("c"),
        ),
        Expression::variable("y"),
    );

    let layout = build_layout(&formula).unwrap();
    assert_eq!(layout.formula, "a*c+b*c ~ y");
    assert_eq!(layout.columns.len(), 2);
}

#[test]
fn layout_matches_parsed_formula() {
    let formula = parse("(a+b)*c ~ d").unwrap();
    assert_eq!(build_layout(&formula).unwrap(), layout("(a+b)*c ~ d"));
}

#[test]
fn hand_built_nested_formula_yields_only_leaf_factors() {
    // (a*(b+c))*(d+e) ~ f, never passed through the parser
    let columns = Expression::multiply(
        Expression::multiply(
            Expression::variable("a"),
            Expression::plus(Expression::variable("b"), Expression::variable("c")),
        ),
        Expression::plus(Expression::variable("d"), Expression::variable("e")),
    );
    let formula = TableFormula::new(columns, Expression::variable("f"));

    let layout = build_layout(&formula).unwrap();
    let labels: Vec<&str> = layout.columns.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["a*b*d", "a*b*e", "a*c*d", "a*c*e"]);
    for block in &layout.columns {
        assert_eq!(block.factors.len(), 3);
        assert!(block.factors.iter().all(|f| f.kind == FactorKind::Variable));
    }
}

#[test]
fn nesting_limit_is_wrapped() {
    let input = format!("{}a{} ~ y", "(".repeat(10_000), ")".repeat(10_000));
    let err = layout_from_source(input.as_str()).unwrap_err();
    assert_eq!(
        err,
        LayoutError::Parse(ParseError::NestingLimit {
            limit: formula_parser::DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn layout_accepts_formula_parts() {
    let from_parts = layout_from_source(&FormulaParts::new("age+sex", "trt")).unwrap();
    assert_eq!(from_parts, layout("age+sex ~ trt"));
}

#[test]
fn parse_errors_are_wrapped() {
    let err = layout_from_source("x + ~ y").unwrap_err();
    assert!(matches!(err, LayoutError::Parse(ParseError::Unexpected { .. })));
    assert!(err.to_string().starts_with("Formula error: expected IDENTIFIER or LPAREN"));
}

#[test]
fn expansion_limit_is_honoured() {
    let err = layout_with_config("(a+b)*(c+d) ~ y", ParserConfig::with_max_terms(2)).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::Parse(ParseError::ExpansionLimit { terms: 4, limit: 2, .. })
    ));
}

#[test]
fn layout_serializes_to_json() {
    let layout = layout("bili[2]*trt ~ log(x)");
    let json = serde_json::to_value(&layout).unwrap();

    assert_eq!(json["formula"], "bili[2]*trt ~ log(x)");
    assert_eq!(json["columns"][0]["factors"][0]["format"], "2");
    assert_eq!(json["rows"][0]["factors"][0]["kind"], "Function");

    let back: TableLayout = serde_json::from_value(json).unwrap();
    assert_eq!(back, layout);
}
