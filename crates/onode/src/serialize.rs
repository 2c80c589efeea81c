//! Converting a node tree back into a plain JSON object.

use onode_glob::Matcher;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::node::Node;
use crate::property::Property;

/// How `check` patterns select leaves during [`Node::to_object`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Keep only leaves whose path matches a pattern.
    Pick,
    /// Drop leaves whose path matches a pattern.
    Omit,
}

/// Options for [`Node::to_object`].
///
/// Deserializes from the camelCase form used by callers passing options as
/// JSON, e.g. `{"check": ["a.*"], "mode": "pick", "omitEmpty": true}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToObjectOptions {
    /// Wildcard patterns tested against each leaf's full path.
    pub check: Option<Vec<String>>,
    /// What a match means; without a mode, `check` has no effect.
    /// Unrecognized mode names deserialize to `None`.
    #[serde(deserialize_with = "deserialize_mode")]
    pub mode: Option<FilterMode>,
    /// Prune empty values even when serializing a non-root node.
    pub omit_empty: bool,
    /// Wildcard syntax used for `check`.
    pub matcher: Matcher,
}

impl ToObjectOptions {
    /// Keep only leaves matching one of `patterns`.
    pub fn pick<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::filtered(patterns, FilterMode::Pick)
    }

    /// Drop leaves matching one of `patterns`.
    pub fn omit<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::filtered(patterns, FilterMode::Omit)
    }

    fn filtered<I, S>(patterns: I, mode: FilterMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            check: Some(patterns.into_iter().map(Into::into).collect()),
            mode: Some(mode),
            ..Self::default()
        }
    }

    /// Also prune empty values below non-root nodes.
    pub fn with_omit_empty(self) -> Self {
        Self {
            omit_empty: true,
            ..self
        }
    }

    /// Whether the leaf at `path` is left out of the output.
    fn excludes(&self, path: &str) -> bool {
        let Some(patterns) = &self.check else {
            return false;
        };
        let matched = self.matcher.matches_any(patterns, path);
        match self.mode {
            Some(FilterMode::Pick) => !matched,
            Some(FilterMode::Omit) => matched,
            None => false,
        }
    }
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<Option<FilterMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(match name.as_deref() {
        Some("pick") => Some(FilterMode::Pick),
        Some("omit") => Some(FilterMode::Omit),
        _ => None,
    })
}

impl Node {
    /// Serialize this node into a plain JSON object, keeping key order.
    ///
    /// Child nodes are always serialized recursively; `check`/`mode`
    /// filtering only ever drops leaves, so a node whose own path is
    /// omitted still contributes its unfiltered leaves. A root, or any node
    /// when `omit_empty` is set, has empty values pruned at every depth.
    pub fn to_object(&self, options: &ToObjectOptions) -> Value {
        let plain = self.to_plain(options);
        if !self.is_root() && !options.omit_empty {
            return Value::Object(plain);
        }
        Value::Object(onode_prune::prune_map(plain))
    }

    fn to_plain(&self, options: &ToObjectOptions) -> Map<String, Value> {
        let inner = self.inner();
        let mut plain = Map::with_capacity(inner.properties.len());

        for (key, property) in &inner.properties {
            match property {
                Property::Child(child) => {
                    plain.insert(key.clone(), child.to_object(options));
                }
                Property::Leaf(value) => {
                    let mut segments = inner.path().to_vec();
                    segments.push(key.clone());
                    let path = segments.join(inner.separator());

                    if options.excludes(&path) {
                        trace!(path = %path, "leaf filtered out");
                        continue;
                    }
                    plain.insert(key.clone(), value.clone());
                }
            }
        }

        plain
    }
}
