//! Expression evaluation
//!
//! This module provides the evaluation side of the pipeline:
//! - [`engine`]: [`Session`](engine::Session), a symbol table shared across lines
//! - [`errors`]: evaluation, postfix and session error types
//! - [`ops`]: per-operator-family evaluation with checked `i32` arithmetic
//! - [`rpn`]: evaluator for the postfix notation produced by `Node::format`
//!
//! # Evaluation Model
//!
//! `Node::evaluate` walks the tree depth first, left child before right.
//! Assignment and `++`/`--` nodes write through to the symbol table as
//! they run, so a failure part way through leaves earlier writes in place.

pub mod engine;
pub mod errors;
mod expressions;
pub mod ops;
pub mod rpn;
