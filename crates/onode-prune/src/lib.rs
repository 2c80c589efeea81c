//! Deep removal of empty values from plain JSON structures.
//!
//! A value is *empty* when it is `null`, the empty string, an empty array or
//! an empty object. [`prune`] drops every empty value at every depth, then
//! drops containers that became empty as a result. Numbers (zero included)
//! and booleans are never considered empty.
//!
//! ```
//! use onode_prune::prune;
//! use serde_json::json;
//!
//! let pruned = prune(json!({"a": {"b": null}, "c": [1, "", {}], "d": 0}));
//! assert_eq!(pruned, json!({"c": [1], "d": 0}));
//! ```

use serde_json::{Map, Value};

/// Returns `true` if `value` is empty on its own, without looking inside it.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Recursively remove empty values from `value`.
///
/// The outermost value itself is always returned, even when pruning leaves
/// it empty: pruning `{"a": null}` yields `{}`, not `null`.
pub fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(prune_map(map)),
        Value::Array(items) => Value::Array(prune_items(items)),
        other => other,
    }
}

/// Recursively remove empty fields from a mapping, keeping key order.
pub fn prune_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter_map(|(key, value)| prune_nested(value).map(|v| (key, v)))
        .collect()
}

fn prune_items(items: Vec<Value>) -> Vec<Value> {
    items.into_iter().filter_map(prune_nested).collect()
}

/// Prune a value found inside a container; `None` means drop it.
fn prune_nested(value: Value) -> Option<Value> {
    let pruned = prune(value);
    if is_empty_value(&pruned) {
        None
    } else {
        Some(pruned)
    }
}
