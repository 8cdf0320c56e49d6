//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the router and its coroutine
//! runtime.
//!
//! ## Environment Variables
//!
//! ### `TRIER_STACK_SIZE`
//!
//! Sets the stack size for request coroutines. Accepts values in:
//! - Decimal: `16384` (16 KB)
//! - Hexadecimal: `0x4000` (16 KB)
//!
//! Default: `0x4000` (16 KB)
//!
//! ### `TRIER_MATCH_POLICY`
//!
//! Sibling ordering used by the route tries:
//! - `insertion-order` (default): first registered matching sibling wins, and
//!   a wildcard sibling absorbs later literals at the same level
//! - `static-first`: literal siblings are kept apart from wildcards and tried first
//!
//! ## Usage
//!
//! ```rust
//! use trierouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;

use crate::router::MatchPolicy;

const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes (default: 16 KB / 0x4000)
    pub stack_size: usize,
    /// Sibling policy for newly built route tables
    pub match_policy: MatchPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            match_policy: MatchPolicy::default(),
        }
    }
}

fn parse_stack_size(val: &str) -> usize {
    let parsed = match val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => val.parse().ok(),
    };
    parsed.unwrap_or(DEFAULT_STACK_SIZE)
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let stack_size = lookup("TRIER_STACK_SIZE")
            .map(|v| parse_stack_size(v.trim()))
            .unwrap_or(DEFAULT_STACK_SIZE);
        let match_policy = lookup("TRIER_MATCH_POLICY")
            .map(|v| MatchPolicy::parse(v.trim()))
            .unwrap_or_default();
        Self {
            stack_size,
            match_policy,
        }
    }

    /// Apply the coroutine settings to the `may` runtime.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}
