//! Expression evaluation implementation
//!
//! [`Node::evaluate`] walks the tree recursively, reading and writing
//! variables through the [`SymbolTable`] it is handed. Per-family work is
//! in the `ops` modules.
//!
//! # Safety
//!
//! All arithmetic operations use checked math to detect overflows and emit
//! [`EvalError`]s rather than panicking or wrapping.

use crate::interpreter::errors::EvalError;
use crate::memory::SymbolTable;
use crate::parser::ast::{Node, Variable};
use tracing::trace;

impl Node {
    /// Evaluate the tree, reading and updating variables in `symbols`.
    ///
    /// Writes made before a failure are kept.
    pub fn evaluate(&self, symbols: &mut SymbolTable) -> Result<i32, EvalError> {
        match self {
            Node::Number(n) => Ok(*n),
            Node::Variable(var) => var.value(symbols),
            Node::Negate(operand) => Self::evaluate_negate(operand, symbols),
            Node::Update { op, target } => Self::evaluate_update(*op, target, symbols),
            Node::Binary { op, left, right } => {
                Self::evaluate_binary(*op, left, right, symbols)
            }
            Node::Assignment { op, target, value } => {
                Self::evaluate_assignment(*op, target, value, symbols)
            }
        }
    }
}

impl Variable {
    /// Current value, or [`EvalError::UndefinedVariable`] if never assigned
    pub fn value(&self, symbols: &SymbolTable) -> Result<i32, EvalError> {
        symbols
            .find(self.name())
            .copied()
            .ok_or_else(|| EvalError::UndefinedVariable {
                name: self.name().to_string(),
            })
    }

    /// Store `value` under this variable's name
    pub fn update(&self, symbols: &mut SymbolTable, value: i32) {
        trace!(name = self.name(), value, "variable updated");
        symbols.add(self.name().to_string(), value);
    }
}
