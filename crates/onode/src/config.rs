use serde::{Deserialize, Serialize};

use crate::error::{NodeError, Result};

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Construction settings for a root [`Node`](crate::Node).
///
/// Every descendant inherits the root's separator; it cannot be changed
/// after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Delimiter used to split and join paths.
    pub separator: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl NodeConfig {
    /// A configuration using `separator` instead of `"."`.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Check that the configuration can be used to build a tree.
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(NodeError::InvalidSeparator);
        }
        Ok(())
    }
}
