//! Binary operator evaluation
//!
//! All arithmetic is checked: overflow and division by zero surface as
//! [`EvalError`]s instead of wrapping or panicking.

use crate::interpreter::errors::EvalError;
use crate::memory::SymbolTable;
use crate::parser::ast::{BinOp, Node};

impl BinOp {
    /// Apply the operator to two already-evaluated operands
    pub fn apply(self, left: i32, right: i32) -> Result<i32, EvalError> {
        let operation = || format!("{} {} {}", left, self.symbol(), right);

        if matches!(self, BinOp::Divide | BinOp::Mod) && right == 0 {
            return Err(EvalError::DivisionByZero {
                operation: operation(),
            });
        }

        let result = match self {
            BinOp::Add => left.checked_add(right),
            BinOp::Subtract => left.checked_sub(right),
            BinOp::Multiply => left.checked_mul(right),
            BinOp::Divide => left.checked_div(right),
            // The zero divisor is ruled out above; MIN % -1 is 0.
            BinOp::Mod => Some(left.wrapping_rem(right)),
        };

        result.ok_or_else(|| EvalError::IntegerOverflow {
            operation: operation(),
        })
    }
}

impl Node {
    /// Evaluate left then right, then combine
    pub(crate) fn evaluate_binary(
        op: BinOp,
        left: &Node,
        right: &Node,
        symbols: &mut SymbolTable,
    ) -> Result<i32, EvalError> {
        let l = left.evaluate(symbols)?;
        let r = right.evaluate(symbols)?;
        op.apply(l, r)
    }
}
