//! Variable storage for expression evaluation
//!
//! - [`table`]: [`ProbeTable`], an open-addressing hash map with linear
//!   probing, doubling growth, and probe-chain repair on removal
//! - [`commands`]: a small command language for driving a table by hand
//!
//! [`SymbolTable`] is the table specialised to variable names and `i32`
//! values. It lives for a whole session: entries are created by the first
//! assignment to a name and overwritten by later ones. Nothing in the
//! expression language removes a variable.

pub mod commands;
pub mod table;

pub use table::{ProbeTable, Slot, DEFAULT_CAPACITY};

/// Variable name → last assigned value
pub type SymbolTable = ProbeTable<String, i32>;
