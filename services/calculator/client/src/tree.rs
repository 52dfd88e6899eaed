use serde::{Deserialize, Serialize};

/// Serialized form of an expression or result tree
///
/// ```json
/// { "node": { "value": "+", "left": { "node": ... }, "right": null } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub node: Node,
}

/// Both children must be present, if only as `null`, so a cut-off payload
/// never decodes as a smaller tree
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub value: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub left: Option<Box<Tree>>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub right: Option<Box<Tree>>,
}

impl Tree {
    pub fn leaf(value: impl Into<String>) -> Tree {
        Tree {
            node: Node {
                value: value.into(),
                left: None,
                right: None,
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }
}
