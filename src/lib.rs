//! # trierouter
//!
//! **trierouter** is a small coroutine-powered HTTP framework for Rust built
//! around a per-method path-segment trie.
//!
//! ## Overview
//!
//! Routes are registered as `METHOD` + pattern, where a pattern is a
//! `/`-separated list of segments:
//!
//! - a literal segment (`hello`) matches exactly that text
//! - `:name` matches any single segment and binds it to `name`
//! - `*name` matches the remainder of the path (one or more segments) and binds
//!   it, joined by `/`, to `name`
//!
//! Resolution walks the trie depth-first and the first complete match wins.
//! How siblings are shared and ordered is controlled by
//! [`router::MatchPolicy`].
//!
//! ## Architecture
//!
//! - **[`router`]** - Trie, route table, parameter binding, shared snapshots
//! - **[`context`]** - Per-request state and response helpers
//! - **[`engine`]** - Route registration and request dispatch
//! - **[`server`]** - HTTP server built on `may_minihttp`
//! - **[`demo`]** - Demo application routes
//! - **[`cli`]** - The `trierouter` command line
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - Environment-based configuration
//!
//! ## Example
//!
//! ```rust
//! use trierouter::{Context, Engine};
//!
//! let mut engine = Engine::new();
//! engine.get("/assets/*filepath", |c: &mut Context| {
//!     let path = c.param("filepath").to_string();
//!     c.string(200, path);
//! });
//!
//! let mut c = Context::from_parts("GET", "/assets/css/site.css");
//! engine.handle(&mut c);
//! assert_eq!(c.response_body(), b"css/site.css");
//! ```
//!
//! Serving it is `engine.run("0.0.0.0:9999")`, which blocks until the server
//! coroutine exits.

pub mod cli;
pub mod context;
pub mod demo;
pub mod engine;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use context::Context;
pub use engine::{Engine, HandlerFunc};
pub use router::{MatchPolicy, Params, RouteMatch, RouteTable, SharedRouteTable};
pub use runtime_config::RuntimeConfig;
