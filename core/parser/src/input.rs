//! FILENAME: core/parser/src/input.rs
//! PURPOSE: Values the parser can be run on.
//! CONTEXT: Callers either hold the formula as one string or as its two
//! sides; both are turned into `"<columns> ~ <rows>"` text before lexing.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Anything that can supply the text of a table formula.
pub trait FormulaSource {
    fn formula_text(&self) -> Cow<'_, str>;
}

impl FormulaSource for str {
    fn formula_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl FormulaSource for String {
    fn formula_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: FormulaSource + ?Sized> FormulaSource for &T {
    fn formula_text(&self) -> Cow<'_, str> {
        (**self).formula_text()
    }
}

/// A formula held as its two sides, e.g. from a settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaParts {
    pub columns: String,
    pub rows: String,
}

impl FormulaParts {
    pub fn new(columns: impl Into<String>, rows: impl Into<String>) -> Self {
        FormulaParts {
            columns: columns.into(),
            rows: rows.into(),
        }
    }
}

impl FormulaSource for FormulaParts {
    fn formula_text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} ~ {}", self.columns, self.rows))
    }
}
