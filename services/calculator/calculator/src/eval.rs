use derive_more::Display;
use log::warn;

use calculator_client::{Expr, Operator, Tree};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[display(fmt = "division by zero")]
    DivisionByZero,
    #[display(fmt = "integer overflow in \"{}\"", _0)]
    Overflow(Operator),
}

impl std::error::Error for EvalError {}

/// Applies `op` with checked integer arithmetic; division truncates towards zero
pub fn apply(op: Operator, left: i64, right: i64) -> Result<i64, EvalError> {
    let val = match op {
        Operator::Add => left.checked_add(right),
        Operator::Sub => left.checked_sub(right),
        Operator::Mul => left.checked_mul(right),
        Operator::Div if right == 0 => return Err(EvalError::DivisionByZero),
        Operator::Div => left.checked_div(right),
    };
    val.ok_or(EvalError::Overflow(op))
}

pub fn evaluate(expr: &Expr) -> Result<i64, EvalError> {
    match expr {
        Expr::Operand(v) => Ok(*v),
        Expr::BinaryOp(op, l, r) => {
            let left = evaluate(l)?;
            let right = evaluate(r)?;
            apply(*op, left, right)
        }
    }
}

/// Evaluates an unvalidated wire tree, substituting zero wherever the tree is
/// malformed: non-numeric operands, unknown operators and missing children.
///
/// Division by zero and overflow are still errors.
pub fn evaluate_lenient(tree: &Tree) -> Result<i64, EvalError> {
    let node = &tree.node;
    if tree.is_leaf() {
        return Ok(node.value.parse().unwrap_or_else(|_| {
            warn!("Non-numeric operand \"{}\" evaluated as 0", node.value);
            0
        }));
    }

    let left = node.left.as_deref().map_or(Ok(0), evaluate_lenient)?;
    let right = node.right.as_deref().map_or(Ok(0), evaluate_lenient)?;

    match Operator::from_symbol(&node.value) {
        Some(op) => apply(op, left, right),
        None => {
            warn!("Expression error: unknown operator \"{}\"", node.value);
            Ok(0)
        }
    }
}
