//! Expression parser
//!
//! This module transforms one line of source text into an expression tree:
//! - [`lexer`]: Tokenization with a maximal-munch automaton (text → tokens)
//! - [`parse`]: Parser state, options, errors and the [`parse()`] entry point
//! - `expressions`: The recursive descent grammar (tokens → tree)
//! - [`ast`]: Tree node definitions and postfix formatting
//!
//! # Language
//!
//! Integers, variables, `+ - * / %`, prefix `+ - ++ --`, postfix `++ --`,
//! parentheses, and the assignments `= += -= *= /= %=`.
//! There are no floating point values, strings, comparisons or calls.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;

pub use parse::{
    parse, parse_with, ParseError, ParseOptions, Parser, PostfixMode, DEFAULT_MAX_DEPTH,
};
