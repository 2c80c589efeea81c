//! The [`Node`] tree: construction, path lookup, and path writes.
//!
//! A [`Node`] is a shared handle onto one vertex of the tree. Cloning the
//! handle does not copy the vertex; a handle obtained from [`Node::get`]
//! aliases the stored child, so writes through it are visible from the
//! root. Children hold their parent through a weak reference, so dropping
//! the root handle frees the whole tree.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::config::NodeConfig;
use crate::error::{NodeError, Result};
use crate::property::Property;

/// A vertex in a path-addressable object tree.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeInner>>);

pub(crate) struct NodeInner {
    separator: Rc<str>,
    parent: Weak<RefCell<NodeInner>>,
    name: Option<String>,
    /// Segments from the root down to this node, fixed at creation.
    path: Vec<String>,
    pub(crate) properties: IndexMap<String, Property>,
}

impl Node {
    /// Create an empty root using the `"."` separator.
    pub fn new() -> Self {
        Self::root(Rc::from(crate::config::DEFAULT_SEPARATOR))
    }

    /// Create an empty root splitting paths on `separator`.
    pub fn with_separator(separator: impl Into<String>) -> Result<Self> {
        Self::with_config(&NodeConfig::with_separator(separator))
    }

    /// Create an empty root from a validated configuration.
    pub fn with_config(config: &NodeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::root(Rc::from(config.separator.as_str())))
    }

    /// Build a root holding a deep copy of `value`, which must be an object.
    ///
    /// ```
    /// use onode::Node;
    /// use serde_json::json;
    ///
    /// let root = Node::from_value(&json!({"a": {"b": 1}})).unwrap();
    /// assert_eq!(root.get_value("a.b").unwrap(), Some(json!(1)));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = Self::new();
        root.extend(value, None)?;
        Ok(root)
    }

    fn root(separator: Rc<str>) -> Self {
        Self(Rc::new(RefCell::new(NodeInner {
            separator,
            parent: Weak::new(),
            name: None,
            path: Vec::new(),
            properties: IndexMap::new(),
        })))
    }

    /// The key this node occupies under its parent; `None` for a root.
    pub fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    /// The enclosing node, if this node has one and it is still alive.
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Returns `true` if this node was created as a root.
    pub fn is_root(&self) -> bool {
        self.0.borrow().name.is_none()
    }

    /// The separator shared by this node and all of its descendants.
    pub fn separator(&self) -> String {
        self.0.borrow().separator.to_string()
    }

    /// Own keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Number of own keys.
    pub fn len(&self) -> usize {
        self.0.borrow().properties.len()
    }

    /// Returns `true` if this node stores nothing.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().properties.is_empty()
    }

    /// Returns `true` if `key` is one of this node's own keys.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().properties.contains_key(key)
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Resolve `path` to the stored leaf or node.
    ///
    /// Returns `Ok(None)` for an empty path, or when a segment is missing
    /// (or is a leaf with more path after it) and `create_if_absent` is
    /// false. With `create_if_absent`, missing segments and `null` leaves
    /// are materialized as empty child nodes; empty segments are never
    /// materialized and resolve to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`NodeError::NonTraversableSegment`] when `create_if_absent` is set
    /// and an intermediate segment holds a non-null leaf.
    pub fn get(&self, path: &str, create_if_absent: bool) -> Result<Option<Property>> {
        if path.is_empty() {
            return Ok(None);
        }

        let separator = self.0.borrow().separator.clone();
        let segments: Vec<&str> = path.split(&*separator).collect();
        let Some((last, intermediate)) = segments.split_last() else {
            return Ok(None);
        };

        let mut current = self.clone();
        for (depth, segment) in intermediate.iter().enumerate() {
            current = match current.lookup(segment) {
                Some(Property::Child(node)) => node,
                None | Some(Property::Leaf(Value::Null)) => {
                    if !create_if_absent {
                        return Ok(None);
                    }
                    match current.materialize(segment) {
                        Some(node) => node,
                        None => return Ok(None),
                    }
                }
                Some(Property::Leaf(_)) if !create_if_absent => return Ok(None),
                Some(Property::Leaf(_)) => {
                    return Err(NodeError::NonTraversableSegment {
                        path: path.to_string(),
                        segment: segments[..=depth].join(&*separator),
                    });
                }
            };
        }

        match current.lookup(last) {
            None | Some(Property::Leaf(Value::Null)) if create_if_absent => {
                Ok(current.materialize(last).map(Property::Child))
            }
            found => Ok(found),
        }
    }

    /// Resolve `path` and return the leaf stored there, if any.
    pub fn get_value(&self, path: &str) -> Result<Option<Value>> {
        Ok(self.get(path, false)?.and_then(Property::into_leaf))
    }

    /// Resolve `path` and return the node stored there, if any.
    pub fn get_node(&self, path: &str) -> Result<Option<Node>> {
        Ok(self.get(path, false)?.and_then(Property::into_node))
    }

    /// Store `value` as a leaf at `path`, replacing whatever was there.
    ///
    /// Intermediate segments that are missing or hold leaves become fresh
    /// empty nodes. Writing through a path with an empty segment (for
    /// example one starting with the separator) stops at that segment and
    /// stores nothing.
    pub fn set(&self, path: &str, value: impl Into<Value>) {
        if let Some((owner, key)) = self.walk_creating(path) {
            owner.insert(key, Property::Leaf(value.into()));
        }
    }

    /// Return the node at `path`, replacing anything else stored along the
    /// way (including a leaf at `path` itself) with fresh nodes.
    pub(crate) fn ensure_node(&self, path: &str) -> Option<Node> {
        let (owner, key) = self.walk_creating(path)?;
        match owner.lookup(&key) {
            Some(Property::Child(node)) => Some(node),
            _ => owner.materialize(&key),
        }
    }

    /// Walk all but the last segment of `path`, forcing each to be a node,
    /// and return the owning node with the final key.
    fn walk_creating(&self, path: &str) -> Option<(Node, String)> {
        if path.is_empty() {
            debug!("ignoring write through empty path");
            return None;
        }

        let separator = self.0.borrow().separator.clone();
        let mut segments: Vec<&str> = path.split(&*separator).collect();
        let last = segments.pop()?;

        let mut current = self.clone();
        for segment in segments {
            if segment.is_empty() {
                debug!(path, "ignoring write through empty segment");
                return None;
            }
            current = match current.lookup(segment) {
                Some(Property::Child(node)) => node,
                _ => current.materialize(segment)?,
            };
        }

        if last.is_empty() {
            debug!(path, "ignoring write through empty segment");
            return None;
        }
        Some((current, last.to_string()))
    }

    /// The path of this node, or of `key` relative to it, joined with the
    /// separator. See [`Node::path_segments_of`].
    pub fn path_of(&self, key: Option<&str>) -> Option<String> {
        let separator = self.separator();
        self.path_segments_of(key)
            .map(|segments| segments.join(separator.as_str()))
    }

    /// The path of this node from the root, or of `key` relative to it.
    ///
    /// Without a key (or with a key whose final segment is empty) this is
    /// the node's own path. With a key, the owning node is resolved without
    /// creating anything and the key's final segment is appended, provided
    /// that segment is present; otherwise `None`.
    ///
    /// ```
    /// use onode::Node;
    ///
    /// let root = Node::new();
    /// root.set("a.b.c", 1);
    /// assert_eq!(root.path_of(Some("a.b.c")).as_deref(), Some("a.b.c"));
    /// assert_eq!(root.path_of(Some("a.b.x")), None);
    /// ```
    pub fn path_segments_of(&self, key: Option<&str>) -> Option<Vec<String>> {
        let own_path = || self.0.borrow().path.clone();

        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return Some(own_path());
        };

        let separator = self.0.borrow().separator.clone();
        let (owner_path, last) = match key.rsplit_once(&*separator) {
            Some((owner_path, last)) => (Some(owner_path), last),
            None => (None, key),
        };
        if last.is_empty() {
            return Some(own_path());
        }

        let owner = match owner_path {
            None => self.clone(),
            Some(owner_path) => match self.get(owner_path, false) {
                Ok(Some(Property::Child(node))) => node,
                _ => return None,
            },
        };

        if !owner.contains_key(last) {
            return None;
        }
        let mut segments = owner.0.borrow().path.clone();
        segments.push(last.to_string());
        Some(segments)
    }

    fn lookup(&self, key: &str) -> Option<Property> {
        self.0.borrow().properties.get(key).cloned()
    }

    fn insert(&self, key: String, property: Property) {
        self.0.borrow_mut().properties.insert(key, property);
    }

    /// Store a fresh empty child at `key`, discarding anything there.
    fn materialize(&self, key: &str) -> Option<Node> {
        if key.is_empty() {
            debug!("refusing to materialize node at empty segment");
            return None;
        }

        let child = {
            let inner = self.0.borrow();
            let mut path = inner.path.clone();
            path.push(key.to_string());
            Node(Rc::new(RefCell::new(NodeInner {
                separator: Rc::clone(&inner.separator),
                parent: Rc::downgrade(&self.0),
                name: Some(key.to_string()),
                path,
                properties: IndexMap::new(),
            })))
        };
        debug!(path = ?child.0.borrow().path, "materialized node");

        self.insert(key.to_string(), Property::Child(child.clone()));
        Some(child)
    }

    pub(crate) fn inner(&self) -> std::cell::Ref<'_, NodeInner> {
        self.0.borrow()
    }
}

impl NodeInner {
    pub(crate) fn path(&self) -> &[String] {
        &self.path
    }

    pub(crate) fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles compare equal when they refer to the same node.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Node")
            .field("path", &inner.path)
            .field("properties", &inner.properties)
            .finish()
    }
}
