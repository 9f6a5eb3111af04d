// AST (Abstract Syntax Tree) definitions for the expression language

use std::fmt;

/// A named variable; the only legal target of assignment and `++`/`--`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Increment/decrement operators (unary, write back to their variable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    PreIncrement,  // ++x
    PreDecrement,  // --x
    PostIncrement, // x++
    PostDecrement, // x--
}

impl UpdateOp {
    /// Postfix-notation symbol. Post forms use `+++`/`---` so they stay
    /// distinct from the prefix forms.
    pub fn symbol(self) -> &'static str {
        match self {
            UpdateOp::PreIncrement => "++",
            UpdateOp::PreDecrement => "--",
            UpdateOp::PostIncrement => "+++",
            UpdateOp::PostDecrement => "---",
        }
    }

    /// +1 or -1
    pub fn delta(self) -> i32 {
        match self {
            UpdateOp::PreIncrement | UpdateOp::PostIncrement => 1,
            UpdateOp::PreDecrement | UpdateOp::PostDecrement => -1,
        }
    }

    /// Whether the expression yields the value before the update
    pub fn yields_old_value(self) -> bool {
        matches!(self, UpdateOp::PostIncrement | UpdateOp::PostDecrement)
    }
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Mod => "%",
        }
    }
}

/// Assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,       // =
    AddTo,        // +=
    SubtractFrom, // -=
    MultiplyBy,   // *=
    DivideBy,     // /=
    ModBy,        // %=
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddTo => "+=",
            AssignOp::SubtractFrom => "-=",
            AssignOp::MultiplyBy => "*=",
            AssignOp::DivideBy => "/=",
            AssignOp::ModBy => "%=",
        }
    }

    /// Arithmetic applied to the old value, `None` for plain `=`
    pub fn combining_op(self) -> Option<BinOp> {
        match self {
            AssignOp::Assign => None,
            AssignOp::AddTo => Some(BinOp::Add),
            AssignOp::SubtractFrom => Some(BinOp::Subtract),
            AssignOp::MultiplyBy => Some(BinOp::Multiply),
            AssignOp::DivideBy => Some(BinOp::Divide),
            AssignOp::ModBy => Some(BinOp::Mod),
        }
    }
}

/// Expression tree node.
///
/// Each node exclusively owns its children. Nodes that write to a variable
/// hold a [`Variable`] directly, so their target is checked once when the
/// node is built by [`Node::update`] or [`Node::assignment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Number(i32),
    Variable(Variable),
    Negate(Box<Node>),
    Update {
        op: UpdateOp,
        target: Variable,
    },
    Binary {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Assignment {
        op: AssignOp,
        target: Variable,
        value: Box<Node>,
    },
}

impl Node {
    pub fn number(value: i32) -> Node {
        Node::Number(value)
    }

    pub fn variable(name: impl Into<String>) -> Node {
        Node::Variable(Variable::new(name))
    }

    pub fn negate(operand: Node) -> Node {
        Node::Negate(Box::new(operand))
    }

    pub fn binary(op: BinOp, left: Node, right: Node) -> Node {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build an increment/decrement node; fails if `operand` is not a variable.
    pub fn update(op: UpdateOp, operand: Node) -> Result<Node, NotAVariable> {
        let target = Variable::try_from(operand)?;
        Ok(Node::Update { op, target })
    }

    /// Build an assignment node; fails if `left` is not a variable.
    pub fn assignment(op: AssignOp, left: Node, right: Node) -> Result<Node, NotAVariable> {
        let target = Variable::try_from(left)?;
        Ok(Node::Assignment {
            op,
            target,
            value: Box::new(right),
        })
    }

    /// Render the subtree in postfix (RPN) notation, tokens separated by spaces
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(n) => write!(f, "{}", n),
            Node::Variable(var) => write!(f, "{}", var.name()),
            // '~' keeps unary negation apart from binary '-'
            Node::Negate(operand) => write!(f, "{} ~", operand),
            Node::Update { op, target } => write!(f, "{} {}", target.name(), op.symbol()),
            Node::Binary { op, left, right } => {
                write!(f, "{} {} {}", left, right, op.symbol())
            }
            Node::Assignment { op, target, value } => {
                write!(f, "{} {} {}", target.name(), value, op.symbol())
            }
        }
    }
}

impl From<Variable> for Node {
    fn from(var: Variable) -> Self {
        Node::Variable(var)
    }
}

impl TryFrom<Node> for Variable {
    type Error = NotAVariable;

    fn try_from(node: Node) -> Result<Self, Self::Error> {
        match node {
            Node::Variable(var) => Ok(var),
            other => Err(NotAVariable {
                found: Box::new(other),
            }),
        }
    }
}

/// An assignment or `++`/`--` was aimed at something other than a variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAVariable {
    pub found: Box<Node>,
}

impl fmt::Display for NotAVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable expected, found: {}", self.found)
    }
}

impl std::error::Error for NotAVariable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_binary_is_postfix() {
        let tree = Node::binary(
            BinOp::Multiply,
            Node::binary(BinOp::Add, Node::number(1), Node::variable("x")),
            Node::number(3),
        );
        assert_eq!(tree.format(), "1 x + 3 *");
    }

    #[test]
    fn test_format_disambiguates_unary_symbols() {
        let neg = Node::negate(Node::variable("a"));
        assert_eq!(neg.format(), "a ~");

        let pre = Node::update(UpdateOp::PreIncrement, Node::variable("a")).unwrap();
        let post = Node::update(UpdateOp::PostIncrement, Node::variable("a")).unwrap();
        let post_dec = Node::update(UpdateOp::PostDecrement, Node::variable("a")).unwrap();
        assert_eq!(pre.format(), "a ++");
        assert_eq!(post.format(), "a +++");
        assert_eq!(post_dec.format(), "a ---");
    }

    #[test]
    fn test_format_assignment() {
        let tree = Node::assignment(
            AssignOp::ModBy,
            Node::variable("n"),
            Node::binary(BinOp::Subtract, Node::number(7), Node::number(2)),
        )
        .unwrap();
        assert_eq!(tree.format(), "n 7 2 - %=");
    }

    #[test]
    fn test_assignment_requires_variable() {
        let err = Node::assignment(AssignOp::Assign, Node::number(3), Node::number(4))
            .unwrap_err();
        assert_eq!(*err.found, Node::number(3));
        assert_eq!(err.to_string(), "Variable expected, found: 3");
    }

    #[test]
    fn test_update_requires_variable() {
        let sum = Node::binary(BinOp::Add, Node::variable("a"), Node::variable("b"));
        let err = Node::update(UpdateOp::PostIncrement, sum).unwrap_err();
        assert_eq!(err.to_string(), "Variable expected, found: a b +");
    }

    #[test]
    fn test_assign_op_combining() {
        assert_eq!(AssignOp::Assign.combining_op(), None);
        assert_eq!(AssignOp::DivideBy.combining_op(), Some(BinOp::Divide));
        assert_eq!(UpdateOp::PostDecrement.delta(), -1);
        assert!(UpdateOp::PostIncrement.yields_old_value());
        assert!(!UpdateOp::PreIncrement.yields_old_value());
    }
}
