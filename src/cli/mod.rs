//! # CLI Module
//!
//! Command-line entry point for the `trierouter` binary.
//!
//! ## Commands
//!
//! ### `serve`
//!
//! Run the demo application:
//!
//! ```bash
//! trierouter serve --addr 127.0.0.1:9999 --policy static-first
//! ```
//!
//! ### `routes`
//!
//! Print every registered `METHOD PATTERN` pair:
//!
//! ```bash
//! trierouter routes
//! ```
//!
//! ### `resolve`
//!
//! Show which pattern a request would hit and the captured parameters:
//!
//! ```bash
//! trierouter resolve --method GET /assets/css/site.css
//! # GET /assets/css/site.css -> /assets/*filepath filepath=css/site.css
//! ```
//!
//! `--policy` on any command overrides `TRIER_MATCH_POLICY`.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run, run_cli, Cli, Commands, PolicyArg};
