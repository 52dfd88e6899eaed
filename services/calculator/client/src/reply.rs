use std::convert::TryFrom;

use crate::{ProtocolError, Tree};

const ERROR_PREFIX: &str = "error: ";

/// Outcome of one evaluation, carried back as a single leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Value(i64),
    Failure(String),
}

impl From<&Reply> for Tree {
    fn from(reply: &Reply) -> Tree {
        match reply {
            Reply::Value(v) => Tree::leaf(v.to_string()),
            Reply::Failure(message) => Tree::leaf(format!("{}{}", ERROR_PREFIX, message)),
        }
    }
}

impl TryFrom<Tree> for Reply {
    type Error = ProtocolError;

    fn try_from(tree: Tree) -> Result<Self, ProtocolError> {
        if !tree.is_leaf() {
            return Err(ProtocolError::UnexpectedShape);
        }

        let value = tree.node.value;
        if let Ok(v) = value.parse() {
            return Ok(Reply::Value(v));
        }
        match value.strip_prefix(ERROR_PREFIX) {
            Some(message) => Ok(Reply::Failure(message.to_string())),
            None => Err(ProtocolError::InvalidResult(value)),
        }
    }
}
