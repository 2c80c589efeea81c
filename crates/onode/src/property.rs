//! Values stored under a node key.

use serde_json::Value;

use crate::node::Node;

/// What a node stores under one of its keys: either an opaque leaf value or
/// a child node.
///
/// Leaves are never traversed by path, even when they hold arrays or
/// objects.
#[derive(Clone, Debug, PartialEq)]
pub enum Property {
    /// A scalar, array, object or `null` stored as-is.
    Leaf(Value),
    /// A nested node.
    Child(Node),
}

impl Property {
    /// Returns `true` if this is a child node.
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Child(_))
    }

    /// The leaf value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Child(_) => None,
        }
    }

    /// The child node, if this is a node.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Child(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }

    /// Consume into the leaf value, if this is a leaf.
    pub fn into_leaf(self) -> Option<Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Child(_) => None,
        }
    }

    /// Consume into the child node, if this is a node.
    pub fn into_node(self) -> Option<Node> {
        match self {
            Self::Child(node) => Some(node),
            Self::Leaf(_) => None,
        }
    }
}

impl From<Value> for Property {
    fn from(value: Value) -> Self {
        Self::Leaf(value)
    }
}

impl From<Node> for Property {
    fn from(node: Node) -> Self {
        Self::Child(node)
    }
}
