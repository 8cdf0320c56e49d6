//! Segment trie for HTTP route matching
//!
//! Each HTTP method owns one [`PathTrie`]. A trie node stands for a single
//! `/`-delimited path segment; a route is registered by walking (and extending)
//! the tree one segment at a time and marking the final node with the full
//! pattern string.
//!
//! ## Segment kinds
//!
//! - Literal segments (e.g. `hello`) match the request segment verbatim
//! - Named parameters (e.g. `:name`) match exactly one request segment
//! - Catch-all parameters (e.g. `*filepath`) absorb every remaining segment
//!
//! ## Example
//!
//! ```rust
//! use trierouter::router::{split_path, MatchPolicy, PathTrie};
//!
//! let mut trie = PathTrie::new(MatchPolicy::InsertionOrder);
//! trie.insert("/hello/:name");
//! trie.insert("/assets/*filepath");
//!
//! let node = trie.search(&split_path("/hello/geektutu")).unwrap();
//! assert_eq!(node.pattern(), Some("/hello/:name"));
//!
//! let node = trie.search(&split_path("/assets/css/a/b.css")).unwrap();
//! assert_eq!(node.pattern(), Some("/assets/*filepath"));
//! ```
//!
//! ## Sibling order
//!
//! Children keep their insertion order and search is depth-first,
//! first-match-wins. Under [`MatchPolicy::InsertionOrder`] a wildcard child is
//! reused for *any* later segment inserted at the same level, so an early
//! `/hello/:name` absorbs a later `/hello/world`. [`MatchPolicy::StaticFirst`]
//! keeps literal and wildcard siblings apart and prefers literals during search.

use smallvec::SmallVec;
use std::sync::Arc;

/// Number of path segments kept inline before spilling to the heap.
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// Request or pattern segments produced by [`split_path`].
pub type Segments<'a> = SmallVec<[&'a str; MAX_INLINE_SEGMENTS]>;

/// How sibling nodes are deduplicated on insert and ordered on search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// A child matches if its text equals the segment or it is a wildcard.
    /// Siblings are tried strictly in insertion order.
    #[default]
    InsertionOrder,
    /// Literal children are only reused for identical text and are tried before
    /// wildcard children during search.
    StaticFirst,
}

impl MatchPolicy {
    /// Parse a policy name, falling back to [`MatchPolicy::InsertionOrder`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "static-first" | "static_first" | "static" => MatchPolicy::StaticFirst,
            _ => MatchPolicy::InsertionOrder,
        }
    }

    /// Canonical, kebab-case name of the policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPolicy::InsertionOrder => "insertion-order",
            MatchPolicy::StaticFirst => "static-first",
        }
    }
}

/// Split a path or pattern into its non-empty segments.
///
/// Empty segments are dropped, so `"/a//b/"` and `"/a/b"` are equivalent.
/// Splitting stops after the first segment that starts with `*`: a catch-all
/// consumes the remainder of the path as a single unit.
#[must_use]
pub fn split_path(path: &str) -> Segments<'_> {
    let mut segments = Segments::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        segments.push(segment);
        if segment.starts_with('*') {
            break;
        }
    }
    segments
}

fn is_wildcard_segment(segment: &str) -> bool {
    segment.starts_with(':') || segment.starts_with('*')
}

/// A single level of the trie.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    segment: String,
    /// Full registration pattern; only set on terminal nodes
    pattern: Option<Arc<str>>,
    is_wildcard: bool,
    children: Vec<TrieNode>,
}

impl TrieNode {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            pattern: None,
            is_wildcard: is_wildcard_segment(segment),
            children: Vec::new(),
        }
    }

    /// Segment text for this level (empty for the root).
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Registration pattern if this node terminates a route.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// True for `:name` and `*name` segments.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[TrieNode] {
        &self.children
    }

    fn is_catch_all(&self) -> bool {
        self.segment.starts_with('*')
    }

    /// Index of the child that `insert` should descend into for `segment`.
    fn match_child(&self, segment: &str, policy: MatchPolicy) -> Option<usize> {
        match policy {
            MatchPolicy::InsertionOrder => self
                .children
                .iter()
                .position(|child| child.segment == segment || child.is_wildcard),
            MatchPolicy::StaticFirst if is_wildcard_segment(segment) => {
                let sigil = segment.as_bytes()[0];
                self.children
                    .iter()
                    .position(|child| child.is_wildcard && child.segment.as_bytes()[0] == sigil)
            }
            MatchPolicy::StaticFirst => self
                .children
                .iter()
                .position(|child| !child.is_wildcard && child.segment == segment),
        }
    }

    fn insert(&mut self, pattern: &Arc<str>, segments: &[&str], policy: MatchPolicy) {
        let Some((segment, remaining)) = segments.split_first() else {
            self.pattern = Some(Arc::clone(pattern));
            return;
        };

        let index = match self.match_child(segment, policy) {
            Some(index) => index,
            None => {
                self.children.push(TrieNode::new(segment));
                self.children.len() - 1
            }
        };
        self.children[index].insert(pattern, remaining, policy);
    }

    fn search(&self, segments: &[&str], policy: MatchPolicy) -> Option<&TrieNode> {
        if segments.is_empty() || self.is_catch_all() {
            return self.pattern.is_some().then_some(self);
        }

        let segment = segments[0];
        let remaining = &segments[1..];

        match policy {
            MatchPolicy::InsertionOrder => self
                .children
                .iter()
                .filter(|child| child.segment == segment || child.is_wildcard)
                .find_map(|child| child.search(remaining, policy)),
            MatchPolicy::StaticFirst => self
                .children
                .iter()
                .filter(|child| !child.is_wildcard && child.segment == segment)
                .chain(self.children.iter().filter(|child| child.is_wildcard))
                .find_map(|child| child.search(remaining, policy)),
        }
    }

    fn collect_patterns<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(pattern) = self.pattern.as_deref() {
            out.push(pattern);
        }
        for child in &self.children {
            child.collect_patterns(out);
        }
    }
}

/// Trie of registered patterns for a single HTTP method.
#[derive(Debug, Clone, Default)]
pub struct PathTrie {
    root: TrieNode,
    policy: MatchPolicy,
}

impl PathTrie {
    /// Create an empty trie using the given sibling policy.
    #[must_use]
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            root: TrieNode::default(),
            policy,
        }
    }

    /// Register `pattern`. The root pattern `/` binds directly on the root node.
    ///
    /// Registering the same structural pattern again overwrites the terminal
    /// node's pattern; the trie shape is unchanged.
    pub fn insert(&mut self, pattern: &str) {
        let segments = split_path(pattern);
        let pattern: Arc<str> = Arc::from(pattern);
        self.root.insert(&pattern, &segments, self.policy);
    }

    /// Find the terminal node matching `segments`, if any.
    #[must_use]
    pub fn search(&self, segments: &[&str]) -> Option<&TrieNode> {
        self.root.search(segments, self.policy)
    }

    /// The synthetic root node.
    #[must_use]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    #[must_use]
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Every pattern stored on a terminal node, depth-first in insertion order.
    #[must_use]
    pub fn routes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_patterns(&mut out);
        out
    }
}
