//! FILENAME: core/layout-engine/src/builder.rs
//! Formula -> layout mapping.
//!
//! Field mapping:
//! - Each additive term of the columns side -> one column block
//! - Each additive term of the rows side -> one row block
//! - Each factor of a product term -> one `LayoutFactor` of that block

use std::borrow::Cow;

use formula_parser::{
    run_with_config, Expression, FormulaSource, ParseError, ParserConfig, TableFormula,
};
use log::debug;

use crate::definition::{LayoutBlock, LayoutFactor, TableLayout};
use crate::error::LayoutResult;

/// Builds the layout of a formula. A formula that was assembled by hand and
/// not yet distributed is distributed first.
pub fn build_layout(formula: &TableFormula) -> LayoutResult<TableLayout> {
    let formula: Cow<'_, TableFormula> = if formula.is_distributed() {
        Cow::Borrowed(formula)
    } else {
        Cow::Owned(formula.clone().distribute())
    };

    let terms = formula.extract_terms();
    let layout = TableLayout {
        formula: formula.render(),
        columns: build_blocks(&terms.columns)?,
        rows: build_blocks(&terms.rows)?,
    };

    debug!(
        target: formula_parser::LOG_TARGET,
        "layout '{}': {} column blocks, {} row blocks",
        layout.formula,
        layout.columns.len(),
        layout.rows.len()
    );
    Ok(layout)
}

/// Parses `source` with default settings and builds its layout.
pub fn layout_from_source<S: FormulaSource + ?Sized>(source: &S) -> LayoutResult<TableLayout> {
    layout_with_config(source, ParserConfig::default())
}

pub fn layout_with_config<S: FormulaSource + ?Sized>(
    source: &S,
    config: ParserConfig,
) -> LayoutResult<TableLayout> {
    let formula = run_with_config(source, config)?;
    build_layout(&formula)
}

fn build_blocks(terms: &[&Expression]) -> LayoutResult<Vec<LayoutBlock>> {
    terms
        .iter()
        .map(|term| {
            let factors = term
                .factors()
                .into_iter()
                .map(factor_from_leaf)
                .collect::<LayoutResult<Vec<_>>>()?;

            Ok(LayoutBlock {
                label: term.render(),
                factors,
            })
        })
        .collect()
}

/// Factors of a distributed term are always leaves: `factors` flattens every
/// Multiply and distribution leaves no Plus under one.
fn factor_from_leaf(expr: &Expression) -> LayoutResult<LayoutFactor> {
    match expr {
        Expression::Variable(var) => Ok(LayoutFactor {
            format: var.format.clone(),
            type_override: var.type_override.clone(),
            ..LayoutFactor::variable(var.identifier.clone())
        }),
        Expression::FunctionCall { name, argument } => {
            Ok(LayoutFactor::function(name.clone(), argument.clone()))
        }
        Expression::Plus(..) | Expression::Multiply(..) => Err(ParseError::Internal(
            format!("factor '{}' left compound after distribution", expr),
        )
        .into()),
    }
}
