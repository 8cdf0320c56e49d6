//! Route table - hot path for request routing.
//!
//! Maps each HTTP method to its own [`PathTrie`] and each `(method, pattern)`
//! pair to a handler. Resolution is a two-step process: the trie decides
//! *whether* a route matches, then the winning pattern is re-split and bound
//! positionally against the request segments to decide *what* the captured
//! parameter values are.

#![deny(clippy::inefficient_to_string)]
#![deny(clippy::format_push_string)]
#![deny(clippy::unnecessary_to_owned)]

use smallvec::SmallVec;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::trie::{split_path, MatchPolicy, PathTrie};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the hot path.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// Path parameters captured for a matched route, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(ParamVec);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a binding. Duplicate names are kept; lookups see the last one.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Get a parameter by name
    ///
    /// Uses "last write wins" semantics when a pattern repeats a name.
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rfind(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert to a `HashMap`. Allocates; prefer [`Params::get`] in hot paths.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0.iter().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Bind the placeholders of `pattern` against the request `segments`.
///
/// `:name` binds the request segment at the same index. `*name` binds every
/// remaining request segment joined with `/` and ends binding; a bare `*`
/// captures nothing.
#[must_use]
pub fn bind_params(pattern: &str, segments: &[&str]) -> Params {
    let mut params = Params::new();
    for (index, part) in split_path(pattern).iter().enumerate() {
        if let Some(name) = part.strip_prefix(':') {
            if let Some(value) = segments.get(index) {
                params.push(name, *value);
            }
        } else if let Some(name) = part.strip_prefix('*') {
            if !name.is_empty() {
                let rest = segments.get(index..).unwrap_or_default();
                params.push(name, rest.join("/"));
            }
            break;
        }
    }
    params
}

/// Successful resolution of a request.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// Handler registered for `(method, pattern)`
    pub handler: &'a H,
    /// The winning registration pattern
    pub pattern: &'a str,
    /// Captured placeholder values
    pub params: Params,
}

/// Per-method tries plus the `(method, pattern)` handler map.
///
/// Built once at startup, then read-only: `resolve` takes `&self` and needs no
/// locking. See [`super::SharedRouteTable`] for publishing updates to running
/// readers.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    roots: HashMap<String, PathTrie>,
    handlers: HashMap<String, H>,
    policy: MatchPolicy,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::with_policy(MatchPolicy::default())
    }
}

fn handler_key(method: &str, pattern: &str) -> String {
    let mut key = String::with_capacity(method.len() + pattern.len() + 1);
    key.push_str(method);
    key.push('-');
    key.push_str(pattern);
    key
}

impl<H> RouteTable<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self {
            roots: HashMap::new(),
            handlers: HashMap::new(),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Number of `(method, pattern)` handler bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The trie for `method`, if any route was registered for it.
    #[must_use]
    pub fn trie(&self, method: &str) -> Option<&PathTrie> {
        self.roots.get(method)
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// The pattern is not validated beyond segment splitting. Registering the
    /// same pair again replaces the previous handler.
    pub fn register(&mut self, method: &str, pattern: &str, handler: H) {
        let policy = self.policy;
        self.roots
            .entry(method.to_string())
            .or_insert_with(|| PathTrie::new(policy))
            .insert(pattern);

        if self
            .handlers
            .insert(handler_key(method, pattern), handler)
            .is_some()
        {
            warn!(method = %method, pattern = %pattern, "Route re-registered, previous handler replaced");
        } else {
            info!(method = %method, pattern = %pattern, "Route registered");
        }
    }

    /// Resolve `method` and `path` to a handler and its parameters.
    ///
    /// Returns `None` when the method has no routes or no pattern matches.
    ///
    /// # Panics
    ///
    /// Panics if the trie reports a terminal pattern with no handler entry. Both
    /// are written together in [`RouteTable::register`], so this only happens if
    /// that invariant is broken.
    #[must_use]
    #[allow(clippy::panic)]
    pub fn resolve(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        debug!(method = %method, path = %path, policy = self.policy.as_str(), "Route match attempt");
        let match_start = Instant::now();

        let Some(trie) = self.roots.get(method) else {
            warn!(method = %method, path = %path, "No routes registered for method");
            return None;
        };

        let segments = split_path(path);
        let Some(pattern) = trie.search(&segments).and_then(|node| node.pattern()) else {
            warn!(
                method = %method,
                path = %path,
                duration_us = match_start.elapsed().as_micros(),
                "No route matched"
            );
            return None;
        };

        let key = handler_key(method, pattern);
        let Some(handler) = self.handlers.get(&key) else {
            panic!("route table inconsistent: trie matched `{key}` but no handler is registered");
        };
        let params = bind_params(pattern, &segments);

        let match_duration = match_start.elapsed();
        if match_duration > Duration::from_millis(1) {
            warn!(
                method = %method,
                path = %path,
                route_pattern = %pattern,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            debug!(
                method = %method,
                path = %path,
                route_pattern = %pattern,
                path_params = ?params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        Some(RouteMatch {
            handler,
            pattern,
            params,
        })
    }

    /// All registered `(method, pattern)` pairs, sorted by method then pattern.
    #[must_use]
    pub fn routes(&self) -> Vec<(&str, &str)> {
        let mut routes: Vec<(&str, &str)> = self
            .roots
            .iter()
            .flat_map(|(method, trie)| {
                trie.routes()
                    .into_iter()
                    .map(move |pattern| (method.as_str(), pattern))
            })
            .collect();
        routes.sort_unstable();
        routes
    }

    /// Log every registered route at info level.
    pub fn dump_routes(&self) {
        info!(
            routes_count = self.len(),
            policy = self.policy.as_str(),
            "Routing table"
        );
        for (method, pattern) in self.routes() {
            info!(method = %method, pattern = %pattern, "route");
        }
    }
}
