//! FILENAME: core/layout-engine/src/error.rs

use formula_parser::ParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Formula error: {0}")]
    Parse(#[from] ParseError),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
