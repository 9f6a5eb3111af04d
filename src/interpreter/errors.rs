//! Error types for evaluating expressions
//!
//! This module defines the failures that happen after parsing:
//! - [`EvalError`]: a tree could not be evaluated (unknown variable,
//!   division by zero, overflow)
//! - [`RpnError`]: a postfix expression could not be built or evaluated
//! - [`SessionError`]: anything a [`Session`] line can fail with
//!
//! None of these are fatal. A failing line leaves every assignment made
//! by earlier lines in place.
//!
//! [`Session`]: crate::interpreter::engine::Session

use crate::parser::ast::NotAVariable;
use crate::parser::parse::ParseError;
use std::fmt;

/// Errors that can occur while evaluating a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A variable was read before anything was assigned to it
    UndefinedVariable { name: String },

    /// Division or modulo by zero
    DivisionByZero { operation: String },

    /// Result does not fit in an `i32`
    IntegerOverflow { operation: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedVariable { name } => {
                write!(f, "Undefined variable: {}", name)
            }
            EvalError::DivisionByZero { operation } => {
                write!(f, "Division by zero in operation: {}", operation)
            }
            EvalError::IntegerOverflow { operation } => {
                write!(f, "Integer overflow in operation: {}", operation)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Errors from the postfix evaluator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpnError {
    /// No tokens at all
    Empty,

    /// An operator found fewer operands on the stack than it needs.
    /// `position` is the operator's index among the input tokens.
    MissingOperand { operator: String, position: usize },

    /// More than one operand was left once the input ran out
    Unbalanced { remaining: usize },

    /// The tree would be taller than `limit` nodes
    TooDeep { limit: usize, position: usize },

    NotAVariable(NotAVariable),

    Eval(EvalError),
}

impl fmt::Display for RpnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpnError::Empty => write!(f, "Empty postfix expression"),
            RpnError::MissingOperand { operator, position } => {
                write!(
                    f,
                    "Operator '{}' at token {} is missing an operand",
                    operator, position
                )
            }
            RpnError::Unbalanced { remaining } => {
                write!(
                    f,
                    "Postfix expression left {} operands on the stack",
                    remaining
                )
            }
            RpnError::TooDeep { limit, position } => {
                write!(
                    f,
                    "Operator at token {} nests the expression deeper than {}",
                    position, limit
                )
            }
            RpnError::NotAVariable(err) => write!(f, "{}", err),
            RpnError::Eval(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RpnError {}

impl From<NotAVariable> for RpnError {
    fn from(err: NotAVariable) -> Self {
        RpnError::NotAVariable(err)
    }
}

impl From<EvalError> for RpnError {
    fn from(err: EvalError) -> Self {
        RpnError::Eval(err)
    }
}

/// Failure of one session line, whichever stage it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Parse(ParseError),
    Eval(EvalError),
    Rpn(RpnError),
}

impl SessionError {
    /// Character offset of a syntax error, if the failure has one
    pub fn position(&self) -> Option<usize> {
        match self {
            SessionError::Parse(err) => err.position(),
            SessionError::Eval(_) | SessionError::Rpn(_) => None,
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Parse(err) => write!(f, "{}", err),
            SessionError::Eval(err) => write!(f, "{}", err),
            SessionError::Rpn(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Parse(err) => Some(err),
            SessionError::Eval(err) => Some(err),
            SessionError::Rpn(err) => Some(err),
        }
    }
}

impl From<ParseError> for SessionError {
    fn from(err: ParseError) -> Self {
        SessionError::Parse(err)
    }
}

impl From<EvalError> for SessionError {
    fn from(err: EvalError) -> Self {
        SessionError::Eval(err)
    }
}

impl From<RpnError> for SessionError {
    fn from(err: RpnError) -> Self {
        SessionError::Rpn(err)
    }
}
