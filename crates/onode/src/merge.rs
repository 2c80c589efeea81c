//! Deep merge of plain JSON objects into a node tree.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{NodeError, Result};
use crate::node::Node;
use crate::property::Property;

impl Node {
    /// Deep-merge the object `source` into this node, or into the node at
    /// `path` (created if needed), and return `self` for chaining.
    ///
    /// Nested objects become child nodes, reusing nodes already present and
    /// replacing leaves. Everything else, arrays and `null` included, is
    /// stored as a leaf with [`Node::set`]. Source keys are interpreted as
    /// paths, so `{"a.b": 1}` writes `1` at `a.b`.
    ///
    /// ```
    /// use onode::Node;
    /// use serde_json::json;
    ///
    /// let root = Node::new();
    /// root.extend(&json!({"a": {"x": 1}}), None)?
    ///     .extend(&json!({"y": 2}), Some("a"))?;
    /// assert_eq!(root.to_object(&Default::default()), json!({"a": {"x": 1, "y": 2}}));
    /// # Ok::<(), onode::NodeError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - [`NodeError::MalformedMergeSource`] if `source` is not an object.
    /// - [`NodeError::NonTraversableSegment`] if `path` runs through a leaf.
    /// - [`NodeError::NotANode`] if `path` itself holds a leaf.
    ///
    /// A `path` with an empty segment cannot be materialized; like a write
    /// through [`Node::set`], the merge is then skipped and the tree is left
    /// untouched.
    pub fn extend(&self, source: &Value, path: Option<&str>) -> Result<&Self> {
        let Value::Object(map) = source else {
            return Err(NodeError::MalformedMergeSource {
                found: value_kind(source),
            });
        };

        let target = match path.filter(|p| !p.is_empty()) {
            None => self.clone(),
            Some(path) => match self.get(path, true)? {
                Some(Property::Child(node)) => node,
                Some(Property::Leaf(_)) => {
                    return Err(NodeError::NotANode {
                        path: path.to_string(),
                    });
                }
                None => {
                    debug!(path, "skipping merge into unmaterializable destination");
                    return Ok(self);
                }
            },
        };

        target.merge_map(map);
        Ok(self)
    }

    fn merge_map(&self, map: &Map<String, Value>) {
        for (key, value) in map {
            match value {
                Value::Object(nested) => match self.ensure_node(key) {
                    Some(child) => child.merge_map(nested),
                    None => debug!(key = %key, "dropping merge key with empty segment"),
                },
                other => self.set(key, other.clone()),
            }
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
