//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its error and option types,
//! and the [`parse`] entry point. The grammar functions themselves live in
//! `expressions` as a further `impl Parser` block.
//!
//! The parser pulls tokens from a [`Scanner`] one at a time, so it always
//! holds exactly one token of lookahead in `current`. Errors report the
//! scanner's position at the moment of failure: the start of the offending
//! token, or the line length when the input ran out.

use crate::parser::ast::{Node, NotAVariable};
use crate::parser::lexer::{Operator, Scanner, Token};
use std::fmt;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Grammar violation or trailing input at a character offset
    Syntax { message: String, position: usize },
    /// Assignment or `++`/`--` aimed at a non-variable
    NotAVariable(NotAVariable),
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, position: usize) -> Self {
        ParseError::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Offset of a syntax error; `None` for [`ParseError::NotAVariable`]
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { position, .. } => Some(*position),
            ParseError::NotAVariable(_) => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax { message, position } => {
                write!(f, "Syntax error at position {}: {}", position, message)
            }
            ParseError::NotAVariable(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<NotAVariable> for ParseError {
    fn from(err: NotAVariable) -> Self {
        ParseError::NotAVariable(err)
    }
}

/// What to do with `++`/`--` written after an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostfixMode {
    /// Check that the operand is a variable, then drop the operator.
    /// `x++` evaluates to `x` and leaves it unchanged.
    #[default]
    Discard,
    /// Build `PostIncrement`/`PostDecrement` nodes.
    Apply,
}

/// Default bound on parenthesis nesting and tree height
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Parser behavior options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    pub postfix: PostfixMode,
    /// Maximum parenthesis nesting, and maximum height of the built tree.
    /// A chain like `1+1+...+1` is as tall as it is long.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            postfix: PostfixMode::Discard,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive descent parser for one line of input
pub struct Parser {
    pub(crate) scanner: Scanner,
    pub(crate) current: Token,
    pub(crate) options: ParseOptions,
    pub(crate) depth: usize,
}

impl Parser {
    pub fn new(line: &str) -> Self {
        Self::with_options(line, ParseOptions::default())
    }

    pub fn with_options(line: &str, options: ParseOptions) -> Self {
        let mut parser = Parser {
            scanner: Scanner::new(line),
            current: Token::End,
            options,
            depth: 0,
        };
        parser.advance();
        parser
    }

    /// Parse the whole line as one expression.
    ///
    /// Anything left after the expression is a syntax error, so `"1 2"` is
    /// rejected rather than silently evaluating to `1`.
    pub fn parse_line(&mut self) -> Result<Node, ParseError> {
        let tree = self.parse_expression()?;
        if self.current != Token::End {
            return Err(self.error(format!("unexpected {} after expression", self.current)));
        }
        debug!(rpn = %tree, "parsed expression");
        Ok(tree)
    }

    // ===== Helper methods =====

    /// Move to the next token, substituting `End` once the scanner is done.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.scanner.next().unwrap_or(Token::End);
        std::mem::replace(&mut self.current, next)
    }

    /// Consume the current token if it is `expected`, else fail.
    pub(crate) fn expect_token(&mut self, expected: &Token, message: &str) -> Result<(), ParseError> {
        if &self.current == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn current_operator(&self) -> Option<Operator> {
        match self.current {
            Token::Operator(op) => Some(op),
            _ => None,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.scanner.position()
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::syntax(message, self.position())
    }
}

/// Parse one line with default options.
pub fn parse(line: &str) -> Result<Node, ParseError> {
    Parser::new(line).parse_line()
}

/// Parse one line with explicit options.
pub fn parse_with(line: &str, options: ParseOptions) -> Result<Node, ParseError> {
    Parser::with_options(line, options).parse_line()
}
