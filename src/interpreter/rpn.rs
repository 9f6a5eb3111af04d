//! Postfix (RPN) evaluator
//!
//! Evaluates the notation produced by [`Node::format`] without going
//! through the scanner and parser. Tokens are separated by whitespace:
//!
//! | token                     | arity | node                         |
//! |---------------------------|-------|------------------------------|
//! | `~`                       | 1     | negate                       |
//! | `++` `--`                 | 1     | pre-increment, pre-decrement |
//! | `+++` `---`               | 1     | post-increment, post-decrement |
//! | `+ - * / %`               | 2     | arithmetic                   |
//! | `= += -= *= /= %=`        | 2     | assignment                   |
//! | anything parsing as `i32` | 0     | number                       |
//! | anything else             | 0     | variable                     |
//!
//! Each operator pops its operands, builds the node through the same
//! factories the parser uses (so targets are still checked for being
//! variables), and pushes the result. Trees taller than the depth limit
//! are refused while they are being built.

use crate::interpreter::errors::RpnError;
use crate::memory::SymbolTable;
use crate::parser::ast::{AssignOp, BinOp, Node, UpdateOp};
use crate::parser::parse::DEFAULT_MAX_DEPTH;

enum RpnToken {
    Negate,
    Update(UpdateOp),
    Binary(BinOp),
    Assign(AssignOp),
    Operand(Node),
}

fn classify(token: &str) -> RpnToken {
    match token {
        "~" => RpnToken::Negate,
        "++" => RpnToken::Update(UpdateOp::PreIncrement),
        "--" => RpnToken::Update(UpdateOp::PreDecrement),
        "+++" => RpnToken::Update(UpdateOp::PostIncrement),
        "---" => RpnToken::Update(UpdateOp::PostDecrement),
        "+" => RpnToken::Binary(BinOp::Add),
        "-" => RpnToken::Binary(BinOp::Subtract),
        "*" => RpnToken::Binary(BinOp::Multiply),
        "/" => RpnToken::Binary(BinOp::Divide),
        "%" => RpnToken::Binary(BinOp::Mod),
        "=" => RpnToken::Assign(AssignOp::Assign),
        "+=" => RpnToken::Assign(AssignOp::AddTo),
        "-=" => RpnToken::Assign(AssignOp::SubtractFrom),
        "*=" => RpnToken::Assign(AssignOp::MultiplyBy),
        "/=" => RpnToken::Assign(AssignOp::DivideBy),
        "%=" => RpnToken::Assign(AssignOp::ModBy),
        other => match other.parse::<i32>() {
            Ok(n) => RpnToken::Operand(Node::number(n)),
            Err(_) => RpnToken::Operand(Node::variable(other)),
        },
    }
}

/// Operand stack of subtrees and their heights; popping an empty stack
/// names the operator that wanted it
struct Stack<'a> {
    nodes: Vec<(Node, usize)>,
    operator: &'a str,
    position: usize,
    max_depth: usize,
}

impl Stack<'_> {
    fn pop(&mut self) -> Result<(Node, usize), RpnError> {
        self.nodes.pop().ok_or_else(|| RpnError::MissingOperand {
            operator: self.operator.to_string(),
            position: self.position,
        })
    }

    /// Pop the right operand, then the left one
    fn pop_pair(&mut self) -> Result<((Node, usize), (Node, usize)), RpnError> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    /// Height of a node over a child of height `child`
    fn grow(&self, child: usize) -> Result<usize, RpnError> {
        if child >= self.max_depth {
            return Err(RpnError::TooDeep {
                limit: self.max_depth,
                position: self.position,
            });
        }
        Ok(child + 1)
    }
}

/// Build the tree described by a postfix expression.
pub fn build(expression: &str) -> Result<Node, RpnError> {
    build_with_depth(expression, DEFAULT_MAX_DEPTH)
}

/// Build the tree, refusing any tree taller than `max_depth` nodes.
pub fn build_with_depth(expression: &str, max_depth: usize) -> Result<Node, RpnError> {
    let mut stack = Stack {
        nodes: Vec::new(),
        operator: "",
        position: 0,
        max_depth,
    };

    for (position, token) in expression.split_whitespace().enumerate() {
        stack.operator = token;
        stack.position = position;

        let entry = match classify(token) {
            RpnToken::Operand(node) => (node, 1),
            RpnToken::Negate => {
                let (child, height) = stack.pop()?;
                (Node::negate(child), stack.grow(height)?)
            }
            RpnToken::Update(op) => {
                let (child, height) = stack.pop()?;
                (Node::update(op, child)?, stack.grow(height)?)
            }
            RpnToken::Binary(op) => {
                let ((left, lh), (right, rh)) = stack.pop_pair()?;
                (Node::binary(op, left, right), stack.grow(lh.max(rh))?)
            }
            RpnToken::Assign(op) => {
                let ((left, lh), (right, rh)) = stack.pop_pair()?;
                (Node::assignment(op, left, right)?, stack.grow(lh.max(rh))?)
            }
        };
        stack.nodes.push(entry);
    }

    let (root, _) = stack.nodes.pop().ok_or(RpnError::Empty)?;
    if !stack.nodes.is_empty() {
        return Err(RpnError::Unbalanced {
            remaining: stack.nodes.len() + 1,
        });
    }
    Ok(root)
}

/// Build and evaluate a postfix expression against `symbols`.
pub fn evaluate(expression: &str, symbols: &mut SymbolTable) -> Result<i32, RpnError> {
    let tree = build(expression)?;
    Ok(tree.evaluate(symbols)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::errors::EvalError;

    #[test]
    fn test_arithmetic() {
        let mut symbols = SymbolTable::new();
        assert_eq!(evaluate("1 2 3 * +", &mut symbols), Ok(7));
        assert_eq!(evaluate("8 4 - 2 -", &mut symbols), Ok(2));
        assert_eq!(evaluate("5 ~ 3 -", &mut symbols), Ok(-8));
        assert_eq!(evaluate("-5 2 *", &mut symbols), Ok(-10));
    }

    #[test]
    fn test_assignment_and_updates() {
        let mut symbols = SymbolTable::new();
        assert_eq!(evaluate("x 4 =", &mut symbols), Ok(4));
        assert_eq!(evaluate("x +++", &mut symbols), Ok(4));
        assert_eq!(symbols.find("x"), Some(&5));
        assert_eq!(evaluate("x ++", &mut symbols), Ok(6));
        assert_eq!(evaluate("x ---", &mut symbols), Ok(6));
        assert_eq!(evaluate("x --", &mut symbols), Ok(4));
        assert_eq!(evaluate("x 3 *=", &mut symbols), Ok(12));
        assert_eq!(symbols.find("x"), Some(&12));
    }

    #[test]
    fn test_build_matches_format() {
        let tree = build("a 1 2 b % + =").unwrap();
        assert_eq!(tree.format(), "a 1 2 b % + =");
    }

    #[test]
    fn test_missing_operand() {
        assert_eq!(
            build("1 +"),
            Err(RpnError::MissingOperand {
                operator: "+".to_string(),
                position: 1
            })
        );
        assert!(matches!(build("~"), Err(RpnError::MissingOperand { .. })));
    }

    #[test]
    fn test_empty_and_unbalanced() {
        assert_eq!(build("   "), Err(RpnError::Empty));
        assert_eq!(build("1 2 3 +"), Err(RpnError::Unbalanced { remaining: 2 }));
    }

    #[test]
    fn test_height_limit() {
        assert!(build_with_depth("1 2 + 3 +", 3).is_ok());
        assert_eq!(
            build_with_depth("1 2 + 3 + 4 +", 3),
            Err(RpnError::TooDeep {
                limit: 3,
                position: 6
            })
        );
        assert!(matches!(
            build_with_depth("x ~ ~ ~", 3),
            Err(RpnError::TooDeep { position: 3, .. })
        ));
    }

    #[test]
    fn test_not_a_variable() {
        assert!(matches!(build("3 4 ="), Err(RpnError::NotAVariable(_))));
        assert!(matches!(build("1 2 + ++"), Err(RpnError::NotAVariable(_))));
    }

    #[test]
    fn test_eval_errors_are_wrapped() {
        let mut symbols = SymbolTable::new();
        assert_eq!(
            evaluate("y 1 +", &mut symbols),
            Err(RpnError::Eval(EvalError::UndefinedVariable {
                name: "y".to_string()
            }))
        );
        assert!(matches!(
            evaluate("1 0 %", &mut symbols),
            Err(RpnError::Eval(EvalError::DivisionByZero { .. }))
        ));
    }
}
