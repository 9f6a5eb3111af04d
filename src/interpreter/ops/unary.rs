//! Unary operator evaluation

use crate::interpreter::errors::EvalError;
use crate::memory::SymbolTable;
use crate::parser::ast::{Node, UpdateOp, Variable};

impl Node {
    pub(crate) fn evaluate_negate(
        operand: &Node,
        symbols: &mut SymbolTable,
    ) -> Result<i32, EvalError> {
        let n = operand.evaluate(symbols)?;
        n.checked_neg().ok_or(EvalError::IntegerOverflow {
            operation: format!("-({})", n),
        })
    }

    /// `++`/`--` in either position: write back value ± 1, yield the new
    /// value for prefix forms and the old one for postfix forms.
    pub(crate) fn evaluate_update(
        op: UpdateOp,
        target: &Variable,
        symbols: &mut SymbolTable,
    ) -> Result<i32, EvalError> {
        let current = target.value(symbols)?;
        let updated = current
            .checked_add(op.delta())
            .ok_or_else(|| EvalError::IntegerOverflow {
                operation: format!("{} {}", target.name(), op.symbol()),
            })?;

        target.update(symbols, updated);

        if op.yields_old_value() {
            Ok(current)
        } else {
            Ok(updated)
        }
    }
}
