//! # Introduction
//!
//! exprtree parses single lines of a small integer expression language into
//! trees and evaluates them against a table of variables that persists from
//! line to line. A terminal UI built with [ratatui](https://docs.rs/ratatui)
//! shows each line's postfix form next to every slot of the variable table.
//!
//! ## Pipeline
//!
//! ```text
//! Line → Scanner → Parser → Node → evaluate ⇄ SymbolTable
//! ```
//!
//! 1. [`parser`]: tokenises a line with a maximal-munch automaton and
//!    builds a [`parser::ast::Node`] by recursive descent.
//! 2. [`interpreter`]: evaluates trees with checked `i32` arithmetic, runs
//!    postfix notation directly, and keeps a [`interpreter::engine::Session`].
//! 3. [`memory`]: [`memory::ProbeTable`], the open-addressing table behind
//!    [`memory::SymbolTable`].
//! 4. [`snapshot`]: [`snapshot::Transcript`], the bounded history of lines.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Language
//!
//! ```text
//! a = 5          → 5
//! b = a * 2 + 1  → 11
//! b %= 4         → 3
//! -(a - ++b)     → -1
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod ui;
