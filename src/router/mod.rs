//! # Router Module
//!
//! Path matching and route resolution for `trierouter`.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Keeping one segment trie per HTTP method
//! - Matching incoming request paths against registered patterns
//! - Extracting `:name` and `*name` path parameters from the winning pattern
//! - Handing back the handler registered for `(method, pattern)`
//!
//! ## Architecture
//!
//! 1. **Registration**: at startup, each `(method, pattern, handler)` is inserted
//!    into the method's [`PathTrie`] and the handler is stored under the key
//!    `"{method}-{pattern}"`.
//!
//! 2. **Resolution**: for each request, the path is split into segments, the
//!    trie is searched, and the matched node's pattern is re-split and bound
//!    positionally against the request segments.
//!
//! ## Example
//!
//! ```rust
//! use trierouter::router::RouteTable;
//!
//! let mut table = RouteTable::new();
//! table.register("GET", "/hello/:name", "hello");
//! table.register("GET", "/assets/*filepath", "assets");
//!
//! let m = table.resolve("GET", "/hello/geektutu").unwrap();
//! assert_eq!(*m.handler, "hello");
//! assert_eq!(m.params.get("name"), Some("geektutu"));
//!
//! let m = table.resolve("GET", "/assets/css/a/b.css").unwrap();
//! assert_eq!(m.params.get("filepath"), Some("css/a/b.css"));
//!
//! assert!(table.resolve("POST", "/hello/geektutu").is_none());
//! ```
//!
//! ## Concurrency
//!
//! A [`RouteTable`] is immutable once serving starts and can be shared by
//! reference across coroutines. [`SharedRouteTable`] covers the case where
//! routes change while serving, by publishing whole snapshots.

mod core;
mod shared;
mod trie;

pub use core::{bind_params, ParamVec, Params, RouteMatch, RouteTable, MAX_INLINE_PARAMS};
pub use shared::SharedRouteTable;
pub use trie::{split_path, MatchPolicy, PathTrie, Segments, TrieNode, MAX_INLINE_SEGMENTS};
