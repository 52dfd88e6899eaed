//! Wire contract shared by the requester (`gateway`) and the evaluator
//! (`calculator`).
//!
//! An expression travels as a [`Tree`] encoded with a [`Format`]. The typed
//! [`Expr`] is what both sides build and evaluate; the reply is a single-leaf
//! [`Tree`] carrying a [`Reply`].

use std::convert::TryFrom;
use std::fmt;

use strum_macros::EnumString;

pub use codec::{read_payload, write_payload, Format, DEFAULT_MAX_PAYLOAD, MAX_DEPTH};
pub use error::ProtocolError;
pub use reply::Reply;
pub use tree::{Node, Tree};

mod codec;
mod error;
mod reply;
mod tree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, strum_macros::Display)]
pub enum Operator {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
}

impl Operator {
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Add | Self::Sub => Precedence::Low,
            Self::Mul | Self::Div => Precedence::High,
        }
    }

    /// Returns the operator named by `symbol`, if it is one of `+ - * /`
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        symbol.parse().ok()
    }
}

/// A fully built expression
///
/// Every operator node owns exactly two operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Operand(i64),
    BinaryOp(Operator, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn binary(op: Operator, left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp(op, Box::new(left), Box::new(right))
    }

    /// Number of levels from the root to the deepest operand
    pub fn depth(&self) -> usize {
        match self {
            Expr::Operand(_) => 1,
            Expr::BinaryOp(_, l, r) => 1 + l.depth().max(r.depth()),
        }
    }
}

// Fully parenthesised so the structure is visible in logs
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Operand(v) => write!(f, "{}", v),
            Expr::BinaryOp(op, l, r) => write!(f, "({} {} {})", l, op, r),
        }
    }
}

impl From<&Expr> for Tree {
    fn from(expr: &Expr) -> Tree {
        match expr {
            Expr::Operand(v) => Tree::leaf(v.to_string()),
            Expr::BinaryOp(op, l, r) => Tree {
                node: Node {
                    value: op.to_string(),
                    left: Some(Box::new(Tree::from(&**l))),
                    right: Some(Box::new(Tree::from(&**r))),
                },
            },
        }
    }
}

impl TryFrom<Tree> for Expr {
    type Error = ProtocolError;

    fn try_from(tree: Tree) -> Result<Self, Self::Error> {
        let Node { value, left, right } = tree.node;
        match (left, right) {
            (None, None) => match value.parse() {
                Ok(v) => Ok(Expr::Operand(v)),
                Err(_) => Err(ProtocolError::InvalidOperand(value)),
            },
            (Some(left), Some(right)) => {
                let op = match Operator::from_symbol(&value) {
                    Some(op) => op,
                    None => return Err(ProtocolError::UnknownOperator(value)),
                };
                Ok(Expr::binary(
                    op,
                    Expr::try_from(*left)?,
                    Expr::try_from(*right)?,
                ))
            }
            _ if Operator::from_symbol(&value).is_some() => {
                Err(ProtocolError::MissingOperand(value))
            }
            _ => Err(ProtocolError::UnexpectedChildren(value)),
        }
    }
}
