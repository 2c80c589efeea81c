//! Path-addressable object trees.
//!
//! A [`Node`] is a tree vertex holding named leaf values and child nodes,
//! addressed through separator-delimited paths such as `"a.b.c"`.
//!
//! ```
//! use onode::{Node, ToObjectOptions};
//! use serde_json::json;
//!
//! let root = Node::new();
//! root.set("server.port", 8080);
//! root.extend(&json!({"server": {"host": "localhost"}, "debug": null}), None)?;
//!
//! assert_eq!(root.get_value("server.port")?, Some(json!(8080)));
//! assert_eq!(
//!     root.to_object(&ToObjectOptions::default()),
//!     json!({"server": {"port": 8080, "host": "localhost"}}),
//! );
//! # Ok::<(), onode::NodeError>(())
//! ```
//!
//! # Modules
//!
//! - [`node`] — The [`Node`] handle: construction, `get`/`set`, `path_of`
//! - [`merge`] — Deep merge of plain objects with [`Node::extend`]
//! - [`serialize`] — [`Node::to_object`] with pick/omit filtering
//! - [`property`] — The [`Property`] leaf-or-node union
//! - [`config`] — [`NodeConfig`] construction settings
//! - [`error`] — Error types
//!
//! Trees are single-threaded: [`Node`] is neither `Send` nor `Sync`.
//! Callers sharing a tree across threads must serialize access to the
//! whole tree themselves.

pub mod config;
pub mod error;
pub mod merge;
pub mod node;
pub mod property;
pub mod serialize;

pub use config::{NodeConfig, DEFAULT_SEPARATOR};
pub use error::{NodeError, Result};
pub use node::Node;
pub use onode_glob::Matcher;
pub use property::Property;
pub use serialize::{FilterMode, ToObjectOptions};
