//! Expression parsing implementation
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! Expression       → SimpleExpression (AssignOp SimpleExpression)*
//! SimpleExpression → Term (('+' | '-') Term)*
//! Term             → Factor (('*' | '/' | '%') Factor)*
//! Factor           → PreOp* Atom PostOp*
//! Atom             → number | identifier | '(' Expression ')'
//! ```
//!
//! Every level loops, so every level is left-associative, assignment
//! included: `a = b = 3` groups as `(a = b) = 3` and is rejected because
//! `a = b` is not a variable.
//!
//! In a run of prefix operators only the last one takes effect (`--+x` is
//! `+x`). Postfix operators apply to the whole prefixed factor, so `-x++`
//! targets `-x`. Whether postfix operators build nodes at all depends on
//! [`PostfixMode`].
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Operator, Token};
use crate::parser::parse::{ParseError, Parser, PostfixMode};

/// A parsed subtree and the number of nodes on its longest root-to-leaf path
struct Subtree {
    node: Node,
    height: usize,
}

impl Subtree {
    fn leaf(node: Node) -> Self {
        Subtree { node, height: 1 }
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        Ok(self.expression()?.node)
    }

    fn expression(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.simple_expression()?;

        while let Some(op) = self.current_operator().and_then(assign_op) {
            let at = self.position();
            self.advance();
            let right = self.simple_expression()?;
            left = Subtree {
                height: self.grow(left.height.max(right.height), at)?,
                node: Node::assignment(op, left.node, right.node)?,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn simple_expression(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.term()?;

        while let Some(op) = self.current_operator().and_then(add_op) {
            let at = self.position();
            self.advance();
            let right = self.term()?;
            left = Subtree {
                height: self.grow(left.height.max(right.height), at)?,
                node: Node::binary(op, left.node, right.node),
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn term(&mut self) -> Result<Subtree, ParseError> {
        let mut left = self.factor()?;

        while let Some(op) = self.current_operator().and_then(mul_op) {
            let at = self.position();
            self.advance();
            let right = self.factor()?;
            left = Subtree {
                height: self.grow(left.height.max(right.height), at)?,
                node: Node::binary(op, left.node, right.node),
            };
        }

        Ok(left)
    }

    /// Parse prefix operators, an atom, then postfix operators
    fn factor(&mut self) -> Result<Subtree, ParseError> {
        let start = self.position();
        let mut prefix = None;
        while let Some(op) = self.current_operator().filter(|op| is_prefix_op(*op)) {
            prefix = Some(op);
            self.advance();
        }

        let atom = self.atom()?;
        let mut tree = match prefix {
            Some(Operator::Minus) => Subtree {
                height: self.grow(atom.height, start)?,
                node: Node::negate(atom.node),
            },
            Some(Operator::PlusPlus) => Subtree {
                height: self.grow(atom.height, start)?,
                node: Node::update(UpdateOp::PreIncrement, atom.node)?,
            },
            Some(Operator::MinusMinus) => Subtree {
                height: self.grow(atom.height, start)?,
                node: Node::update(UpdateOp::PreDecrement, atom.node)?,
            },
            _ => atom,
        };

        while let Some(op) = self.current_operator().and_then(postfix_op) {
            let at = self.position();
            self.advance();
            tree = match self.options.postfix {
                PostfixMode::Apply => Subtree {
                    height: self.grow(tree.height, at)?,
                    node: Node::update(op, tree.node)?,
                },
                PostfixMode::Discard => Subtree {
                    height: tree.height,
                    node: Node::from(Variable::try_from(tree.node)?),
                },
            };
        }

        Ok(tree)
    }

    /// Parse number, identifier, or parenthesized expression
    fn atom(&mut self) -> Result<Subtree, ParseError> {
        let node = match &self.current {
            Token::Number(n) => Node::number(*n),
            Token::Identifier(name) => Node::variable(name.clone()),
            Token::OpenParen => return self.parenthesized(),
            other => {
                return Err(self.error(format!(
                    "expected a number, identifier or '(', found {}",
                    other
                )))
            }
        };
        self.advance();
        Ok(Subtree::leaf(node))
    }

    fn parenthesized(&mut self) -> Result<Subtree, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(format!(
                "parentheses nested deeper than {}",
                self.options.max_depth
            )));
        }

        self.advance(); // consume '('
        self.depth += 1;
        let inner = self.expression();
        self.depth -= 1;

        let inner = inner?;
        self.expect_token(&Token::CloseParen, "expected ')'")?;
        Ok(inner)
    }

    /// Height of a node placed over a child of height `child`.
    ///
    /// Evaluating, printing and dropping a tree all recurse once per level,
    /// so a tree taller than `max_depth` is refused before it is built.
    fn grow(&self, child: usize, at: usize) -> Result<usize, ParseError> {
        let height = child + 1;
        if height > self.options.max_depth {
            return Err(ParseError::syntax(
                format!("expression nested deeper than {}", self.options.max_depth),
                at,
            ));
        }
        Ok(height)
    }
}

fn assign_op(op: Operator) -> Option<AssignOp> {
    match op {
        Operator::Assign => Some(AssignOp::Assign),
        Operator::PlusAssign => Some(AssignOp::AddTo),
        Operator::MinusAssign => Some(AssignOp::SubtractFrom),
        Operator::TimesAssign => Some(AssignOp::MultiplyBy),
        Operator::DivideAssign => Some(AssignOp::DivideBy),
        Operator::ModuloAssign => Some(AssignOp::ModBy),
        _ => None,
    }
}

fn add_op(op: Operator) -> Option<BinOp> {
    match op {
        Operator::Plus => Some(BinOp::Add),
        Operator::Minus => Some(BinOp::Subtract),
        _ => None,
    }
}

fn mul_op(op: Operator) -> Option<BinOp> {
    match op {
        Operator::Times => Some(BinOp::Multiply),
        Operator::Divide => Some(BinOp::Divide),
        Operator::Modulo => Some(BinOp::Mod),
        _ => None,
    }
}

fn is_prefix_op(op: Operator) -> bool {
    matches!(
        op,
        Operator::Plus | Operator::Minus | Operator::PlusPlus | Operator::MinusMinus
    )
}

fn postfix_op(op: Operator) -> Option<UpdateOp> {
    match op {
        Operator::PlusPlus => Some(UpdateOp::PostIncrement),
        Operator::MinusMinus => Some(UpdateOp::PostDecrement),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{AssignOp, Node};
    use crate::parser::parse::{parse, parse_with, ParseError, ParseOptions, PostfixMode};

    fn rpn(line: &str) -> String {
        parse(line).unwrap().format()
    }

    fn applying() -> ParseOptions {
        ParseOptions {
            postfix: PostfixMode::Apply,
            ..ParseOptions::default()
        }
    }

    #[test]
    fn test_precedence() {
        assert_eq!(rpn("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(rpn("(1 + 2) * 3"), "1 2 + 3 *");
        assert_eq!(rpn("a = 1 + 2 % b"), "a 1 2 b % + =");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(rpn("8 - 4 - 2"), "8 4 - 2 -");
        assert_eq!(rpn("8 / 4 * 2"), "8 4 / 2 *");
    }

    #[test]
    fn test_compound_assignment() {
        let tree = parse("total += x * 2").unwrap();
        match &tree {
            Node::Assignment { op, target, .. } => {
                assert_eq!(*op, AssignOp::AddTo);
                assert_eq!(target.name(), "total");
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
        assert_eq!(tree.format(), "total x 2 * +=");
    }

    #[test]
    fn test_prefix_operators() {
        assert_eq!(rpn("-x"), "x ~");
        assert_eq!(rpn("++x"), "x ++");
        assert_eq!(rpn("--x"), "x --");
        assert_eq!(rpn("+x"), "x");
        assert_eq!(rpn("3 - -2"), "3 2 ~ -");
    }

    #[test]
    fn test_only_last_prefix_survives() {
        assert_eq!(rpn("--+x"), "x");
        assert_eq!(rpn("+ - x"), "x ~");
        assert_eq!(rpn("- ++x"), "x ++");
    }

    #[test]
    fn test_prefix_requires_variable() {
        assert!(matches!(parse("++3"), Err(ParseError::NotAVariable(_))));
        assert!(matches!(parse("--(a)"), Ok(_)));
    }

    #[test]
    fn test_postfix_discarded_by_default() {
        assert_eq!(rpn("x++"), "x");
        assert_eq!(rpn("x-- + 1"), "x 1 +");
        assert!(matches!(parse("(a + b)++"), Err(ParseError::NotAVariable(_))));
    }

    #[test]
    fn test_postfix_applied() {
        let tree = parse_with("x++ * 2", applying()).unwrap();
        assert_eq!(tree.format(), "x +++ 2 *");
        let tree = parse_with("y--", applying()).unwrap();
        assert_eq!(tree.format(), "y ---");
        assert!(matches!(
            parse_with("x++ ++", applying()),
            Err(ParseError::NotAVariable(_))
        ));
        assert!(matches!(
            parse_with("-x++", applying()),
            Err(ParseError::NotAVariable(_))
        ));
    }

    #[test]
    fn test_chained_assignment_is_rejected() {
        let err = parse("a = b = 3").unwrap_err();
        match err {
            ParseError::NotAVariable(e) => assert_eq!(e.found.format(), "a b ="),
            other => panic!("Expected NotAVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_positions() {
        assert_eq!(parse("1 +").unwrap_err().position(), Some(3));
        assert_eq!(parse("(1 + 2").unwrap_err().position(), Some(6));
        assert_eq!(parse("1 2").unwrap_err().position(), Some(2));
        assert_eq!(parse("").unwrap_err().position(), Some(0));
        assert_eq!(parse("2 * )").unwrap_err().position(), Some(4));
        assert_eq!(parse("a + #b").unwrap_err().position(), Some(4));
        assert_eq!(parse("x = 1)").unwrap_err().position(), Some(5));
    }

    #[test]
    fn test_nesting_limit() {
        let options = ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        };
        assert!(parse_with("(((1)))", options).is_ok());
        let err = parse_with("((((1))))", options).unwrap_err();
        assert_eq!(err.position(), Some(3));
    }

    #[test]
    fn test_operator_chain_limit() {
        let options = ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        };
        assert!(parse_with("1 + 2 + 3", options).is_ok());
        assert!(parse_with("a = -(b * 2)", options).is_err());
        assert!(parse_with("-(b * 2)", options).is_ok());

        let err = parse_with("1 + 2 + 3 + 4", options).unwrap_err();
        assert_eq!(err.position(), Some(10));
        assert_eq!(
            err.to_string(),
            "Syntax error at position 10: expression nested deeper than 3"
        );

        let err = parse_with("x = 1 + 2 + 3", options).unwrap_err();
        assert_eq!(err.position(), Some(2));
        assert!(parse_with("---x", options).is_ok());
    }

    #[test]
    fn test_error_message_names_token() {
        let err = parse("* 2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error at position 0: expected a number, identifier or '(', found '*'"
        );
    }
}
