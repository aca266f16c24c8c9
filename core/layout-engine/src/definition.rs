//! FILENAME: core/layout-engine/src/definition.rs
//! Table Layout Definition - The serializable description.
//!
//! This module contains all the types needed to DESCRIBE a summary table.
//! These structures are designed to be:
//! - Serializable (so a host can store or transmit them)
//! - Immutable snapshots of one parsed formula
//!
//! Every additive term of a formula side becomes one `LayoutBlock`; the
//! crossed factors of that term are listed in order inside the block.

use serde::{Deserialize, Serialize};

// ============================================================================
// FACTORS
// ============================================================================

/// Whether a factor names a data column or wraps one in a function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactorKind {
    Variable,
    Function,
}

/// One crossed factor of a block, with the metadata the formula attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutFactor {
    /// Variable identifier or function name.
    pub name: String,

    pub kind: FactorKind,

    /// Display format from `name[format]`. Variables only.
    pub format: Option<String>,

    /// Type from `name::Type`. Variables only.
    pub type_override: Option<String>,

    /// Verbatim argument text. Function calls only.
    pub argument: Option<String>,
}

impl LayoutFactor {
    pub fn variable(name: impl Into<String>) -> Self {
        LayoutFactor {
            name: name.into(),
            kind: FactorKind::Variable,
            format: None,
            type_override: None,
            argument: None,
        }
    }

    pub fn function(name: impl Into<String>, argument: impl Into<String>) -> Self {
        LayoutFactor {
            name: name.into(),
            kind: FactorKind::Function,
            format: None,
            type_override: None,
            argument: Some(argument.into()),
        }
    }
}

// ============================================================================
// BLOCKS
// ============================================================================

/// One additive term of a formula side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBlock {
    /// Rendered term, e.g. "drug*age".
    pub label: String,

    /// Crossed factors, left to right. Never empty.
    pub factors: Vec<LayoutFactor>,
}

impl LayoutBlock {
    /// True when the block crosses two or more factors.
    pub fn is_interaction(&self) -> bool {
        self.factors.len() > 1
    }
}

/// Which side of the formula a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Columns,
    Rows,
}

// ============================================================================
// TABLE LAYOUT
// ============================================================================

/// Complete layout of a summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Canonical text of the distributed formula.
    pub formula: String,
    pub columns: Vec<LayoutBlock>,
    pub rows: Vec<LayoutBlock>,
}

impl TableLayout {
    pub fn blocks(&self, axis: Axis) -> &[LayoutBlock] {
        match axis {
            Axis::Columns => &self.columns,
            Axis::Rows => &self.rows,
        }
    }

    /// Every (row block, column block) pair, row-major. Each pair is one
    /// summary section the statistics engine computes.
    pub fn sections(&self) -> impl Iterator<Item = (&LayoutBlock, &LayoutBlock)> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| self.columns.iter().map(move |col| (row, col)))
    }

    pub fn section_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    /// Distinct variable names in order of first appearance, columns first.
    /// Function factors are skipped since their inputs are opaque.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for block in self.columns.iter().chain(self.rows.iter()) {
            for factor in &block.factors {
                if factor.kind == FactorKind::Variable && !names.contains(&factor.name.as_str()) {
                    names.push(&factor.name);
                }
            }
        }
        names
    }
}
