//! Error types for object tree operations.

use thiserror::Error;

/// Errors that can occur while resolving or merging into a node tree.
///
/// Malformed path strings are deliberately *not* errors: lookups through an
/// empty path yield `Ok(None)` and writes through one are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A path walk had to continue past a leaf value.
    #[error("cannot traverse leaf at {segment:?} while resolving {path:?}")]
    NonTraversableSegment { path: String, segment: String },

    /// A merge destination resolved to an existing leaf.
    #[error("merge destination {path:?} holds a leaf, not a node")]
    NotANode { path: String },

    /// The merge source was not an object.
    #[error("merge source must be an object, found {found}")]
    MalformedMergeSource { found: &'static str },

    /// A node was configured with an empty separator.
    #[error("path separator must not be empty")]
    InvalidSeparator,
}

/// Convenience type alias for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
