//! FILENAME: core/layout-engine/src/lib.rs
//! Summary table layout for parsed table formulas.
//!
//! This crate turns the distributed tree produced by `formula-parser` into
//! the block structure a statistics or rendering engine fills in. It never
//! looks at data.
//!
//! Layers:
//! - `definition`: Serializable layout (what the table IS)
//! - `builder`: Formula -> layout mapping (HOW we derive it)

pub mod builder;
pub mod definition;
pub mod error;

#[cfg(test)]
mod tests;

pub use builder::{build_layout, layout_from_source, layout_with_config};
pub use definition::*;
pub use error::{LayoutError, LayoutResult};
