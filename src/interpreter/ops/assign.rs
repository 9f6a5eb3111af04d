//! Assignment evaluation
//!
//! Plain `=` evaluates the right side and stores it. Compound forms read
//! the target first (so an unassigned target is an error), then evaluate
//! the right side, combine, and store.

use crate::interpreter::errors::EvalError;
use crate::memory::SymbolTable;
use crate::parser::ast::{AssignOp, Node, Variable};

impl Node {
    pub(crate) fn evaluate_assignment(
        op: AssignOp,
        target: &Variable,
        value: &Node,
        symbols: &mut SymbolTable,
    ) -> Result<i32, EvalError> {
        let result = match op.combining_op() {
            None => value.evaluate(symbols)?,
            Some(bin_op) => {
                let current = target.value(symbols)?;
                let rhs = value.evaluate(symbols)?;
                bin_op.apply(current, rhs)?
            }
        };

        target.update(symbols, result);
        Ok(result)
    }
}
