//! Element table for the chemc formula tools.
//!
//! An [`ElementTable`] maps element symbols to atomic numbers. It is loaded
//! once from a definitions file of whitespace-separated `symbol number` pairs
//! (or taken from the built-in [`ElementTable::standard`] prelude) and then
//! shared read-only by everything that evaluates formulas.

pub mod element;
pub mod error;
pub mod standard;
pub mod table;

pub use element::{is_formula_symbol, Element};
pub use error::{TableError, TableResult};
pub use table::ElementTable;
