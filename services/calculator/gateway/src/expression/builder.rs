use derive_more::Display;

use calculator_client::{Expr, Operator, Precedence, MAX_DEPTH};

#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[display(fmt = "empty expression")]
    EmptyExpression,
    #[display(fmt = "invalid operand \"{}\"", _0)]
    InvalidOperand(String),
    #[display(fmt = "operator \"{}\" is missing an operand", _0)]
    MissingOperand(Operator),
    #[display(fmt = "unexpected operand \"{}\"", _0)]
    UnexpectedOperand(String),
    #[display(fmt = "expression nests deeper than {} levels", _0)]
    TooDeep(usize),
}

impl std::error::Error for BuildError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Idle,
    /// The root's right child is a grafted high precedence operator still
    /// waiting for its right operand
    AwaitingHighPrecedenceOperand,
}

impl Default for Pending {
    fn default() -> Self {
        Pending::Idle
    }
}

/// A tree under construction, operator slots may still be empty
#[derive(Debug)]
enum Partial<'a> {
    Operand(&'a str),
    Op {
        op: Operator,
        left: Option<Box<Partial<'a>>>,
        right: Option<Box<Partial<'a>>>,
    },
}

type Slot<'a> = Option<Box<Partial<'a>>>;

impl<'a> Partial<'a> {
    fn open(op: Operator, left: Slot<'a>) -> Partial<'a> {
        Partial::Op {
            op,
            left,
            right: None,
        }
    }

    /// The slot the next operand is attached to
    fn operand_slot(&mut self, pending: Pending) -> Option<&mut Slot<'a>> {
        let right = match self {
            Partial::Operand(_) => return None,
            Partial::Op { right, .. } => right,
        };

        match (pending, right) {
            (Pending::AwaitingHighPrecedenceOperand, Some(graft)) => match **graft {
                Partial::Op { ref mut right, .. } => Some(right),
                Partial::Operand(_) => None,
            },
            (_, right) => Some(right),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Partial::Operand(_) => 1,
            Partial::Op { left, right, .. } => {
                let depth = |slot: &Slot<'a>| slot.as_deref().map_or(0, Partial::depth);
                1 + depth(left).max(depth(right))
            }
        }
    }

    fn into_expr(self) -> Result<Expr, BuildError> {
        match self {
            Partial::Operand(token) => token
                .parse()
                .map(Expr::Operand)
                .map_err(|_| BuildError::InvalidOperand(token.to_string())),
            Partial::Op {
                op,
                left: Some(l),
                right: Some(r),
            } => Ok(Expr::binary(op, (*l).into_expr()?, (*r).into_expr()?)),
            Partial::Op { op, .. } => Err(BuildError::MissingOperand(op)),
        }
    }
}

#[derive(Debug, Default)]
struct Builder<'a> {
    root: Slot<'a>,
    pending: Pending,
}

impl<'a> Builder<'a> {
    fn push(mut self, token: &'a str) -> Result<Self, BuildError> {
        match Operator::from_symbol(token) {
            Some(op) => self.push_operator(op),
            None => self.push_operand(token)?,
        }

        // A token deepens the tree by at most one level
        if self.root.as_deref().map_or(0, Partial::depth) > MAX_DEPTH {
            return Err(BuildError::TooDeep(MAX_DEPTH));
        }
        Ok(self)
    }

    fn push_operator(&mut self, op: Operator) {
        let pending = std::mem::take(&mut self.pending);
        let root = match self.root.take() {
            Some(root) => root,
            None => {
                self.root = Some(Box::new(Partial::open(op, None)));
                return;
            }
        };

        let root = match *root {
            // Binds tighter than the root, so it takes over the root's right operand
            Partial::Op {
                op: root_op,
                left,
                right,
            } if pending == Pending::Idle
                && op.precedence() == Precedence::High
                && root_op.precedence() == Precedence::Low =>
            {
                self.pending = Pending::AwaitingHighPrecedenceOperand;
                Partial::Op {
                    op: root_op,
                    left,
                    right: Some(Box::new(Partial::open(op, right))),
                }
            }
            root => Partial::open(op, Some(Box::new(root))),
        };
        self.root = Some(Box::new(root));
    }

    fn push_operand(&mut self, token: &'a str) -> Result<(), BuildError> {
        if self.root.is_none() {
            self.root = Some(Box::new(Partial::Operand(token)));
            return Ok(());
        }

        // A leading space leaves an empty first operand
        if let Some(Partial::Operand(root)) = self.root.as_deref() {
            if root.is_empty() {
                return Err(BuildError::InvalidOperand(String::new()));
            }
        }

        let pending = std::mem::take(&mut self.pending);
        let slot = self
            .root
            .as_deref_mut()
            .and_then(|root| root.operand_slot(pending));

        match slot {
            Some(slot) if slot.is_none() => {
                *slot = Some(Box::new(Partial::Operand(token)));
                Ok(())
            }
            _ => Err(BuildError::UnexpectedOperand(token.to_string())),
        }
    }

    fn finish(self) -> Result<Expr, BuildError> {
        match self.root {
            Some(root) => (*root).into_expr(),
            None => Err(BuildError::EmptyExpression),
        }
    }
}

/// Builds an expression tree in a single left to right pass.
///
/// `+ -` bind looser than `* /`; operators of the same tier associate to the
/// left. Only a single elevation at a time is tracked, which is all two tiers
/// without grouping require.
///
/// Trees deeper than [`MAX_DEPTH`] are rejected, as the wire formats cannot
/// carry them.
pub fn build(tokens: &[&str]) -> Result<Expr, BuildError> {
    if tokens.iter().all(|t| t.is_empty()) {
        return Err(BuildError::EmptyExpression);
    }

    tokens
        .iter()
        .try_fold(Builder::default(), |builder, token| builder.push(*token))?
        .finish()
}
